mod booking_service;

pub use booking_service::create_booking;

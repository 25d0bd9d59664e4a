pub mod auth;
pub mod booking;
pub mod commands;
pub mod gym_class;
pub mod invoice;
pub mod member;
pub mod plan;
pub mod profile;
pub mod schedule;
pub mod value_objects;

pub use value_objects::*;

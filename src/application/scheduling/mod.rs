mod class_service;
mod schedule_service;

pub use class_service::{create_class, list_classes};
pub use schedule_service::{
    create_schedule, delete_schedule, list_schedules, schedules_within, update_schedule,
    upcoming_schedules,
};

mod member_service;
mod plan_service;
mod profile_service;

pub use member_service::{delete_member, list_members, register_member, update_member};
pub use plan_service::{create_plan, list_plans};
pub use profile_service::{MemberProfile, member_profile};

mod auth_service;
mod password;

pub use auth_service::{
    LoginGrant, logout, member_login, register_staff, resolve_session, set_member_password,
    staff_login,
};

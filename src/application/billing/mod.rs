mod billing_service;

pub use billing_service::{PlanAssignment, assign_plan, list_invoices, pay_invoice};

pub mod error;
pub mod handlers;
pub mod responses;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use responses::*;
pub use router::create_router;
pub use types::*;

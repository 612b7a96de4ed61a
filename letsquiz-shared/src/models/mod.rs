pub mod api;
pub mod user;

pub use api::{ApiResponse, LoginRequest, SUCCESS_MESSAGE};
pub use user::{User, UserRole};

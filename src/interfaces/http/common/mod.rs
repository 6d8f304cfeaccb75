//! Shared HTTP plumbing: response envelope, error mapping, extractors

pub mod api_response;
pub mod current_user;
pub mod error;
pub mod params;
pub mod validated_json;

pub use api_response::{ApiResponse, PaginatedResponse};
pub use current_user::{CurrentUser, USER_ID_HEADER};
pub use error::ApiError;
pub use validated_json::ValidatedJson;

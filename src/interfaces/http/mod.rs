//! HTTP REST API
//!
//! - `common`: response envelope, error mapping and extractors
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, OpenAPI document and middleware stack

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};

//! Inquiry aggregate
//!
//! An inquiry fans out to one `InquiryResponse` per recipient.

pub mod model;
pub mod repository;

pub use model::{Inquiry, InquiryResponse, InquiryResponseStatus, InquiryTargetType};
pub use repository::InquiryRepository;

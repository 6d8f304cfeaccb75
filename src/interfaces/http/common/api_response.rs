//! Common response envelope and paginated list DTO

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PaginatedResult;

/// Standard API response wrapper
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "error": "...", "code": "SELF_BOOKING"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    /// Human-readable error. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: None,
        }
    }

    pub fn error_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::error(message)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<S>(result: PaginatedResult<S>, f: impl FnMut(S) -> T) -> Self {
        let mapped = result.map(f);
        Self {
            items: mapped.items,
            total: mapped.total,
            page: mapped.page,
            limit: mapped.limit,
            total_pages: mapped.total_pages,
        }
    }
}

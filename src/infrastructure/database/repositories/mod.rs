//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.
//! Money is stored as integer minor units (two decimal places).

pub mod booking_repository;
pub mod catalog_repository;
pub mod inquiry_repository;
pub mod provider_stats_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::provider::ResponseStats;
use crate::domain::{DomainError, DomainResult};

const MINOR_UNIT_SCALE: u32 = 2;

pub(crate) fn from_minor(amount: i64) -> Decimal {
    Decimal::new(amount, MINOR_UNIT_SCALE)
}

pub(crate) fn to_minor(amount: Decimal) -> DomainResult<i64> {
    amount
        .checked_mul(Decimal::from(100))
        .and_then(|minor| {
            minor
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| DomainError::Storage(format!("Amount {} does not fit in minor units", amount)))
}

pub(crate) fn stats_from_columns(avg: Option<i32>, count: i32) -> ResponseStats {
    ResponseStats {
        avg_response_time_minutes: avg,
        response_count: count,
    }
}

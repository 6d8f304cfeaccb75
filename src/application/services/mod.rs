//! Application services

mod availability;
mod booking;
mod entity_lookup;
mod inquiry;
mod inquiry_expiry;
mod response_time;

pub use availability::{
    capacity_check, date_rule_violation, AvailabilityChecker, AvailabilityResult, UNLIMITED_SPOTS,
};
pub use booking::{BookingService, DirectBookingRequest, NewBooking};
pub use entity_lookup::{EntityLookup, EntityRecord};
pub use inquiry::{InquiryService, InquiryThread, NewInquiry};
pub use inquiry_expiry::{expire_stale_responses, start_inquiry_expiry_task};
pub use response_time::{response_minutes, ResponseTimeTracker};

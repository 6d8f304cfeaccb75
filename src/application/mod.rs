pub mod services;

// Re-export key types for convenience
pub use services::{
    expire_stale_responses, start_inquiry_expiry_task, AvailabilityChecker, AvailabilityResult,
    BookingService, DirectBookingRequest, EntityLookup, InquiryService, InquiryThread, NewBooking,
    NewInquiry, ResponseTimeTracker,
};

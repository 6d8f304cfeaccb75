//! Database entities module

pub mod bookings;
pub mod companies;
pub mod drivers;
pub mod guides;
pub mod inquiries;
pub mod inquiry_responses;
pub mod tours;
pub mod users;

pub use bookings::Entity as Bookings;
pub use companies::Entity as Companies;
pub use drivers::Entity as Drivers;
pub use guides::Entity as Guides;
pub use inquiries::Entity as Inquiries;
pub use inquiry_responses::Entity as InquiryResponses;
pub use tours::Entity as Tours;
pub use users::Entity as Users;

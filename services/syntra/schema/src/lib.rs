//! sea-orm entities for the Syntra service.

pub mod otp_codes;
pub mod users;
pub mod verification_requests;

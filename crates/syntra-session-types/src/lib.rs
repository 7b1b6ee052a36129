//! Session-claim types shared between the token issuer and its consumers.
//!
//! Provides the JWT claims format, token validation, cookie builders, and the
//! `Identity` request extractor read by handlers behind the access gate.

pub mod claims;
pub mod cookie;
pub mod identity;

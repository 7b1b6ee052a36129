//! Test utilities for the Syntra service.
//!
//! Provides `MockSession` for minting real session tokens in tests.
//! Import in `#[cfg(test)]` blocks and `tests/` targets only — never in
//! production code.

pub mod session;

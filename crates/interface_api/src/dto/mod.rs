//! Request and response bodies

pub mod billing;
pub mod claims;

//! Request handlers

pub mod billing;
pub mod claims;
pub mod health;

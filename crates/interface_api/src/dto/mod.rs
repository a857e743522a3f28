//! Request and response bodies

pub mod account;
pub mod policy;
pub mod claims;
pub mod users;

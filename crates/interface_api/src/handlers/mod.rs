//! Request handlers, one module per resource

pub mod account;
pub mod catalog;
pub mod policy;
pub mod claims;
pub mod users;
pub mod health;

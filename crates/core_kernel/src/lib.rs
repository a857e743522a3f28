//! Core Kernel - Foundational types shared by every claims desk crate
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for records held in the CMS
//! - The explicit session context passed to every port call
//! - Port abstractions (errors, health checks) for the hexagonal adapters

pub mod identifiers;
pub mod session;
pub mod ports;
pub mod error;

pub use identifiers::{PolicyId, ClaimId, UserId, Username};
pub use session::SessionContext;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;

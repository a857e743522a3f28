//! Account Domain
//!
//! User accounts are owned by the CMS: it issues the bearer tokens, stores
//! the admin and blocked flags, and embeds each user's held policies. This
//! crate validates what is sent to it and turns a token into the
//! [`SessionContext`](core_kernel::SessionContext) every other domain
//! operation receives.
//!
//! # Session resolution
//!
//! ```text
//! bearer token -> PartyPort::current_user -> blocked? -> SessionContext
//! ```

pub mod account;
pub mod registration;
pub mod ports;
pub mod service;
pub mod error;

pub use account::UserAccount;
pub use registration::{LoginOutcome, LoginRequest, RegistrationRequest};
pub use ports::PartyPort;
pub use service::AccountService;
pub use error::PartyError;

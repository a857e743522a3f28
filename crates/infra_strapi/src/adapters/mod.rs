//! Port adapters backed by the Strapi client

pub mod claims;
pub mod policy;
pub mod party;

pub use claims::StrapiClaimsAdapter;
pub use policy::StrapiPolicyAdapter;
pub use party::StrapiPartyAdapter;

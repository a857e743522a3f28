//! User management DTOs

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SetBlockedRequest {
    pub blocked: bool,
}

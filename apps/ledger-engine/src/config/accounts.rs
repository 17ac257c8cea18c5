//! Accounts seeded at startup.
//!
//! Registration lives outside this service, so a deployment lists the
//! accounts it serves here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One account to open at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    /// Account id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Opening cash balance.
    #[serde(default)]
    pub balance: Decimal,
}

//! Business logic services for the shift-logging API.
//!
//! # Services
//!
//! - `policy` - Role-based authorization gate, checked before every
//!   ledger/stats call
//! - `ledger` - Shift lifecycle (clock-in/out state machine + geofence)
//! - `stats` - Dashboard metric derivation over shift records

pub mod ledger;
pub mod policy;
pub mod stats;

pub use ledger::ShiftLedger;
pub use policy::{Operation, authorize};
pub use stats::StatsAggregator;

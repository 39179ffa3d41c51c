//! Domain models for the shift-logging service.

pub mod facility;
pub mod shift;
pub mod worker;

pub use facility::FacilityLocation;
pub use shift::ShiftRecord;
pub use worker::{CurrentWorker, Worker};

//! Domain entities mirroring the debt-tracker API payloads.

pub mod client;
pub mod debt;
pub mod payment;
pub mod report;
pub mod types;
pub mod user;

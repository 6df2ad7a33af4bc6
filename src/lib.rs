//! Mumbai electricity bill calculator.
//!
//! Implements the published multi-slab tariff schedules, statutory levies,
//! and rebate rules of Mumbai's distribution licensees as a stateless
//! calculation from bill inputs to an itemised breakdown.

#[cfg(feature = "api")]
pub mod api;
/// Bill calculation pipeline and its data model.
pub mod bill;
pub mod cli;
pub mod config;
pub mod io;
/// Tariff schedules and the registry that resolves them.
pub mod tariff;

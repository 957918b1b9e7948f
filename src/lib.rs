//! Payroll and termination-settlement engine for a multi-location restaurant chain
//!
//! This crate turns raw attendance events into monetary adjustments, aggregates
//! them into monthly payroll records split between bank and hand payment, and
//! computes the final settlement owed to departing employees. Storage is
//! reached only through the [`store::PayrollStore`] trait.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

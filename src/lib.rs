//! Time Evaluation Engine
//!
//! This crate turns an employee's resolved booking pairs into daily time
//! values and aggregates those into monthly values with a flextime balance
//! carried from month to month. A month can be closed, which freezes it
//! against recalculation until it is reopened.
//!
//! The pure calculations live in [`calculation`]; [`service`] runs the month
//! lifecycle against the traits in [`repository`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

//! Progressive Tax Calculator
//!
//! This crate computes income tax over a fixed table of marginal brackets and
//! serves it over HTTP, together with per-user tax records and employee
//! registration.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

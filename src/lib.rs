//! # Quoter
//!
//! Library for the implementation of the studio quote service: a package catalog, an
//! exchange-rate oracle with a static fallback, and the quote computation and export pipeline
//! behind the site's quote builder.

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod rates;
pub mod rpc;
pub mod serde;
pub mod spawn;
pub mod types;

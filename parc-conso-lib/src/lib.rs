#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for parc-conso
//!
//! This library merges the CSV billing exports of a telecom operator into one
//! Excel workbook and summarizes monthly mobile data consumption per subscriber.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`ingest`]: Source discovery and CSV/ZIP reading
//! - [`table`]: In-memory tables, numeric normalization and merging
//! - [`volume`]: Data volume text codec (`"8 Go 206 Mo 523 Ko"`)
//! - [`consumption`]: Per-subscriber monthly consumption summary
//! - [`reports`]: Excel workbook output

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod consumption;
#[cfg(not(any(debug_assertions, test)))]
mod consumption;

#[cfg(any(debug_assertions, test))]
pub mod ingest;
#[cfg(not(any(debug_assertions, test)))]
mod ingest;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod table;
#[cfg(not(any(debug_assertions, test)))]
mod table;

#[cfg(any(debug_assertions, test))]
pub mod volume;
#[cfg(not(any(debug_assertions, test)))]
mod volume;

pub use crate::commands::{Host, run};

//! Work-log aggregation engine.
//!
//! This crate turns a YAML log of work intervals into daily, ISO-week and
//! pay-period totals, reconciles logged hours against contracted hours
//! (flex time), and renders console and CSV reports.
//!
//! The pipeline is: [`config::DocumentLoader`] reads the document,
//! [`worklog::WorkLog`] normalizes and aggregates it once, and the
//! functions in [`report`] render views of that snapshot.

#![warn(missing_docs)]

pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod worklog;

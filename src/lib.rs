//! Timesheet Engine for the plant management dashboard.
//!
//! This crate provides the monthly attendance grid (cell status cycling and
//! worked-hour totals), the batch export of individual timesheets for a
//! selected set of employees, and the boundary to the hosted AI service
//! used by the dashboard's assistant features.

#![warn(missing_docs)]

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod timesheet;

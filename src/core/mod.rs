//! Core domain logic for logcheck
//!
//! ## Architecture
//!
//! - `models/` - Domain types (checks, scan configuration, boundaries, status)
//! - `services/` - Reverse reading, date handling, scanning, evaluation
//! - `ports/` - Traits for the clock and diagnostic logging

pub mod models;
pub mod ports;
pub mod services;

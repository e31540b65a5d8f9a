//! # Roster Server Library
//!
//! Wiring, logging setup and startup utilities for the Roster server.

pub mod app;
pub mod logging;
pub mod startup;

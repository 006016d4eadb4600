//! `flightplot` - Flight telemetry log plotting
//!
//! This library provides the core functionality for parsing line-delimited
//! JSON flight telemetry logs, smoothing the recorded series with a
//! valid-mode moving average, and rendering the four-panel chart.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod plot;
pub mod reader;
pub mod record;
pub mod smoothing;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reader::{FlightLog, FlightStats};
pub use record::FlightRecord;
pub use smoothing::{moving_average, smoothed_axis};

//! Core library for the `metar` CLI.
//!
//! This crate defines:
//! - Decoding of METAR/TAF codes (wind, visibility, clouds, present weather)
//! - Boxed, color-coded report formatting
//! - Fetching reports from aviationweather.gov
//! - Configuration handling
//!
//! It is used by `metar-cli`, but the decoder and formatter are pure and can be
//! reused anywhere reports are already in memory.

pub mod config;
pub mod decoder;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod station;
pub mod style;

pub use config::Config;
pub use error::FetchError;
pub use model::{ChangeIndicator, CloudLayer, Coded, FlightCategory, Metar, Taf, TafPeriod};
pub use provider::{ReportSource, provider_from_config};
pub use report::{decode, decode_forecast};
pub use station::StationCode;
pub use style::Theme;

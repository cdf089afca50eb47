use thiserror::Error;

/// Why a report could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid ICAO code {code:?}: {reason}")]
    InvalidStation { code: String, reason: &'static str },

    #[error("no ICAO codes provided")]
    NoStations,

    #[error("no {kind} found for {stations} - check the ICAO code")]
    NotFound { kind: &'static str, stations: String },

    #[error("failed to fetch {kind}: {source}")]
    Transport {
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("failed to parse {kind} response: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True when the caller asked for something malformed, as opposed to the
    /// data or the network letting us down.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, FetchError::InvalidStation { .. } | FetchError::NoStations)
    }
}

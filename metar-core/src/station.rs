use std::{fmt, str::FromStr};

use crate::error::FetchError;

/// A validated, uppercase four-character ICAO airport code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    pub fn parse(code: &str) -> Result<Self, FetchError> {
        // ICAO codes are ASCII; checked before case folding so "ß" can't become "SS".
        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(FetchError::InvalidStation {
                code: code.to_string(),
                reason: "must contain only letters and numbers",
            });
        }

        if code.len() != 4 {
            return Err(FetchError::InvalidStation {
                code: code.to_string(),
                reason: "must be 4 characters",
            });
        }

        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Validate every code, failing on the first bad one.
    pub fn parse_all<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Self>, FetchError> {
        if codes.is_empty() {
            return Err(FetchError::NoStations);
        }
        codes.iter().map(|c| Self::parse(c.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StationCode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comma-joined codes, the form the API takes for a batch request.
pub fn join(stations: &[StationCode]) -> String {
    stations.iter().map(StationCode::as_str).collect::<Vec<_>>().join(",")
}

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A field the API sends either as a number, as a text token, or not at all.
///
/// `wdir` is `270` or `"VRB"`, `visib` is `3` or `"10+"`. Anything that is
/// neither a number nor a string (null, missing, bool, object) reads as
/// [`Coded::Absent`] instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Coded {
    Numeric(f64),
    Token(String),
    #[default]
    Absent,
}

impl Coded {
    pub fn is_absent(&self) -> bool {
        matches!(self, Coded::Absent)
    }
}

impl<'de> Deserialize<'de> for Coded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().map_or(Coded::Absent, Coded::Numeric),
            Value::String(s) => Coded::Token(s),
            _ => Coded::Absent,
        })
    }
}

/// Wind direction in degrees true, or `"VRB"`.
pub type WindDirection = Coded;

/// Prevailing visibility in statute miles, or an open-ended token like `"10+"`.
pub type Visibility = Coded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    Unknown(String),
}

impl FlightCategory {
    pub fn as_str(&self) -> &str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Unknown(s) => s,
        }
    }
}

impl Default for FlightCategory {
    fn default() -> Self {
        FlightCategory::Unknown(String::new())
    }
}

impl From<String> for FlightCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "VFR" => FlightCategory::Vfr,
            "MVFR" => FlightCategory::Mvfr,
            "IFR" => FlightCategory::Ifr,
            "LIFR" => FlightCategory::Lifr,
            _ => FlightCategory::Unknown(value),
        }
    }
}

impl<'de> Deserialize<'de> for FlightCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.map(FlightCategory::from).unwrap_or_default())
    }
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cloud layer. `base` is feet above ground, 0 when not reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloudLayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base: u32,
}

impl CloudLayer {
    pub fn new(cover: impl Into<String>, base: u32) -> Self {
        Self { cover: cover.into(), base }
    }
}

/// A single METAR observation, as returned by `/api/data/metar?format=json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metar {
    #[serde(rename = "rawOb", default, deserialize_with = "null_as_default")]
    pub raw: String,
    #[serde(rename = "icaoId", default, deserialize_with = "null_as_default")]
    pub station_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "temp", default, deserialize_with = "null_as_default")]
    pub temperature_c: f64,
    #[serde(rename = "dewp", default, deserialize_with = "null_as_default")]
    pub dewpoint_c: f64,
    #[serde(rename = "wdir", default)]
    pub wind_direction: WindDirection,
    #[serde(rename = "wspd", default, deserialize_with = "null_as_default")]
    pub wind_speed_kt: u32,
    #[serde(rename = "wgst", default, deserialize_with = "null_as_default")]
    pub wind_gust_kt: u32,
    #[serde(rename = "visib", default)]
    pub visibility: Visibility,
    #[serde(rename = "altim", default, deserialize_with = "null_as_default")]
    pub altimeter_hpa: f64,
    #[serde(rename = "fltcat", default)]
    pub flight_category: FlightCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clouds: Vec<CloudLayer>,
    #[serde(rename = "obsTime", default, deserialize_with = "null_as_default")]
    pub observed_at: i64,
}

/// TAF change group indicator (`fcstChange`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeIndicator {
    #[default]
    Initial,
    From,
    Tempo,
    Becoming,
    Probability,
}

impl<'de> Deserialize<'de> for ChangeIndicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(match value.as_deref() {
            Some("FM") => ChangeIndicator::From,
            Some("TEMPO") => ChangeIndicator::Tempo,
            Some("BECMG") => ChangeIndicator::Becoming,
            Some("PROB") => ChangeIndicator::Probability,
            _ => ChangeIndicator::Initial,
        })
    }
}

/// One forecast period inside a TAF.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TafPeriod {
    #[serde(rename = "timeFrom", default, deserialize_with = "null_as_default")]
    pub time_from: i64,
    #[serde(rename = "timeTo", default, deserialize_with = "null_as_default")]
    pub time_to: i64,
    #[serde(rename = "fcstChange", default)]
    pub change: ChangeIndicator,
    #[serde(default)]
    pub probability: Option<u32>,
    #[serde(rename = "wdir", default)]
    pub wind_direction: WindDirection,
    #[serde(rename = "wspd", default, deserialize_with = "null_as_default")]
    pub wind_speed_kt: u32,
    #[serde(rename = "wgst", default)]
    pub wind_gust_kt: Option<u32>,
    #[serde(rename = "visib", default)]
    pub visibility: Visibility,
    #[serde(rename = "wxString", default, deserialize_with = "null_as_default")]
    pub weather: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clouds: Vec<CloudLayer>,
}

/// A terminal aerodrome forecast, as returned by `/api/data/taf?format=json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Taf {
    #[serde(rename = "icaoId", default, deserialize_with = "null_as_default")]
    pub station_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "rawTAF", default, deserialize_with = "null_as_default")]
    pub raw: String,
    #[serde(rename = "validTimeFrom", default, deserialize_with = "null_as_default")]
    pub valid_from: i64,
    #[serde(rename = "validTimeTo", default, deserialize_with = "null_as_default")]
    pub valid_to: i64,
    #[serde(rename = "fcsts", default, deserialize_with = "null_as_default")]
    pub periods: Vec<TafPeriod>,
}

/// The API sends `null` for unreported values; treat those like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Translation of coded METAR/TAF values into plain language.
//!
//! Every function here is total: unrecognized input falls back to a fixed
//! placeholder or is passed through unchanged.

use crate::model::{CloudLayer, Coded};

const CLOUD_COVER: &[(&str, &str)] = &[
    ("SKC", "Clear"),
    ("CLR", "Clear"),
    ("FEW", "Few"),
    ("SCT", "Scattered"),
    ("BKN", "Broken"),
    ("OVC", "Overcast"),
    ("OVX", "Obscured"),
];

const WEATHER_CODES: &[(&str, &str)] = &[
    // Descriptor
    ("MI", "Shallow"),
    ("PR", "Partial"),
    ("BC", "Patches"),
    ("DR", "Drifting"),
    ("BL", "Blowing"),
    ("SH", "Showers"),
    ("TS", "Thunderstorm"),
    ("FZ", "Freezing"),
    // Precipitation
    ("DZ", "Drizzle"),
    ("RA", "Rain"),
    ("SN", "Snow"),
    ("SG", "Snow Grains"),
    ("IC", "Ice Crystals"),
    ("PL", "Ice Pellets"),
    ("GR", "Hail"),
    ("GS", "Small Hail"),
    ("UP", "Unknown Precip"),
    // Obscuration
    ("BR", "Mist"),
    ("FG", "Fog"),
    ("FU", "Smoke"),
    ("VA", "Volcanic Ash"),
    ("DU", "Dust"),
    ("SA", "Sand"),
    ("HZ", "Haze"),
    ("PY", "Spray"),
    // Other
    ("PO", "Dust Whirls"),
    ("SQ", "Squalls"),
    ("FC", "Funnel Cloud"),
    ("SS", "Sandstorm"),
    ("DS", "Duststorm"),
];

const VARIABLE_WIND: &str = "VRB";
const VICINITY: &str = "VC";

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

/// "270° at 10 kt, gusting 20 kt", "Variable at 5 kt" or "Calm".
pub fn format_wind(direction: &Coded, speed_kt: u32, gust_kt: u32) -> String {
    if speed_kt == 0 {
        return "Calm".to_string();
    }

    let mut out = match direction {
        Coded::Token(t) if t == VARIABLE_WIND => format!("Variable at {speed_kt} kt"),
        Coded::Token(t) => format!("{t}° at {speed_kt} kt"),
        Coded::Numeric(deg) => format!("{deg:.0}° at {speed_kt} kt"),
        Coded::Absent => format!("{speed_kt} kt"),
    };

    if gust_kt > 0 {
        out.push_str(&format!(", gusting {gust_kt} kt"));
    }

    out
}

/// Visibility in statute miles. Anything at or above 10 SM reads "10+ SM".
pub fn format_visibility(value: &Coded) -> String {
    match value {
        Coded::Token(t) => format!("{t} SM"),
        Coded::Numeric(v) if *v >= 10.0 => "10+ SM".to_string(),
        Coded::Numeric(v) => format!("{v:.0} SM"),
        Coded::Absent => "Unknown".to_string(),
    }
}

pub fn expand_cloud_cover(cover: &str) -> &str {
    lookup(CLOUD_COVER, cover).unwrap_or(cover)
}

/// "Scattered @ 2500 ft, Broken @ 5000 ft". Empty input gives an empty string.
pub fn format_clouds(layers: &[CloudLayer]) -> String {
    layers
        .iter()
        .map(|layer| {
            let cover = expand_cloud_cover(&layer.cover);
            if layer.base > 0 {
                format!("{cover} @ {} ft", layer.base)
            } else {
                cover.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode a present-weather string such as `"-RA BR"` into "Light Rain, Mist".
pub fn decode_weather(code: &str) -> String {
    code.split_whitespace().map(decode_weather_group).collect::<Vec<_>>().join(", ")
}

/// Decode one weather group, e.g. `"+TSRA"` into "Heavy Thunderstorm Rain".
///
/// Reads an optional intensity sign, an optional `VC`, then two-character
/// codes left to right. Unknown codes and an odd trailing character are kept
/// as-is, so malformed input degrades to partially decoded text.
pub fn decode_weather_group(code: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut rest = code;

    if let Some(stripped) = rest.strip_prefix('-') {
        parts.push("Light".to_string());
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        parts.push("Heavy".to_string());
        rest = stripped;
    }

    if let Some(stripped) = rest.strip_prefix(VICINITY) {
        parts.push("Vicinity".to_string());
        rest = stripped;
    }

    let chars: Vec<char> = rest.chars().collect();
    for chunk in chars.chunks(2) {
        let piece: String = chunk.iter().collect();
        match lookup(WEATHER_CODES, &piece) {
            Some(desc) => parts.push(desc.to_string()),
            None => parts.push(piece),
        }
    }

    parts.join(" ")
}

//! Full METAR and TAF reports, boxed and colored for the terminal.

use chrono::{DateTime, Utc};

use crate::{
    decoder::{decode_weather, format_clouds, format_visibility, format_wind},
    model::{ChangeIndicator, Coded, FlightCategory, Metar, Taf, TafPeriod},
    style::{Line, Role, Theme},
};

const IN_HG_PER_HPA: f64 = 0.02953;
const PERIOD_RULE_WIDTH: usize = 28;

/// Render one METAR observation as a boxed report.
pub fn decode(metar: &Metar, theme: &Theme) -> String {
    theme.boxed(&metar_lines(metar))
}

/// Render a TAF with all its forecast periods as a boxed report.
pub fn decode_forecast(taf: &Taf, theme: &Theme) -> String {
    theme.boxed(&taf_lines(taf))
}

fn metar_lines(m: &Metar) -> Vec<Line> {
    let clouds = if m.clouds.is_empty() { "Clear".to_string() } else { format_clouds(&m.clouds) };

    [
        Some(station_line(&m.station_id, &m.name)),
        utc(m.observed_at)
            .map(|t| field("Time", format!("{} UTC", t.format("%d %b %Y %H:%M")))),
        Some(flight_line(&m.flight_category)),
        Some(field("Wind", format_wind(&m.wind_direction, m.wind_speed_kt, m.wind_gust_kt))),
        Some(field("Visibility", format_visibility(&m.visibility))),
        Some(field(
            "Temp",
            format!("{:.0}°C (Dewpoint: {:.0}°C)", m.temperature_c, m.dewpoint_c),
        )),
        Some(field(
            "Altimeter",
            format!("{:.2} inHg / {:.0} hPa", m.altimeter_hpa * IN_HG_PER_HPA, m.altimeter_hpa),
        )),
        Some(field("Clouds", clouds)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn taf_lines(t: &Taf) -> Vec<Line> {
    let valid = match (utc(t.valid_from), utc(t.valid_to)) {
        (Some(from), Some(to)) => Some(field(
            "Valid",
            format!("{} to {} UTC", from.format("%d %b %H:%M"), to.format("%d %b %H:%M")),
        )),
        _ => None,
    };

    let mut lines: Vec<Line> = [
        Some(station_line(&t.station_id, &t.name)),
        Some(Line::new().push(Role::TafHeader, "TAF FORECAST")),
        valid,
    ]
    .into_iter()
    .flatten()
    .collect();

    for (i, period) in t.periods.iter().enumerate() {
        if i > 0 {
            lines.push(Line::new().push(Role::Separator, "─".repeat(PERIOD_RULE_WIDTH)));
        }
        lines.extend(period_lines(period));
    }

    lines
}

fn period_lines(p: &TafPeriod) -> Vec<Line> {
    let has_visibility = match &p.visibility {
        Coded::Absent => false,
        Coded::Token(t) => !t.is_empty(),
        Coded::Numeric(_) => true,
    };

    [
        Some(Line::new().push(Role::Header, period_header(p))),
        (p.wind_speed_kt > 0).then(|| {
            indented(
                "Wind",
                format_wind(&p.wind_direction, p.wind_speed_kt, p.wind_gust_kt.unwrap_or(0)),
            )
        }),
        has_visibility.then(|| indented("Visib", format_visibility(&p.visibility))),
        (!p.weather.is_empty()).then(|| indented("Weather", decode_weather(&p.weather))),
        (!p.clouds.is_empty()).then(|| indented("Clouds", format_clouds(&p.clouds))),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// "From  Sun 18:00 - Mon 00:00"
fn period_header(p: &TafPeriod) -> String {
    let prefix = match (p.change, p.probability) {
        (ChangeIndicator::Initial, _) => "Init  ".to_string(),
        (ChangeIndicator::From, _) => "From  ".to_string(),
        (ChangeIndicator::Tempo, _) => "Tempo ".to_string(),
        (ChangeIndicator::Becoming, _) => "Becmg ".to_string(),
        (ChangeIndicator::Probability, Some(pct)) => format!("Prob{pct:<2}"),
        (ChangeIndicator::Probability, None) => "Prob  ".to_string(),
    };

    let from = utc(p.time_from).unwrap_or_default();
    let to = utc(p.time_to).unwrap_or_default();

    format!("{prefix}{} - {}", from.format("%a %H:%M"), to.format("%a %H:%M"))
}

fn station_line(id: &str, name: &str) -> Line {
    let line = Line::new().push(Role::Station, id);
    if name.is_empty() {
        line
    } else {
        line.push(Role::Label, " · ").push(Role::Value, name)
    }
}

fn flight_line(category: &FlightCategory) -> Line {
    let role = match category {
        FlightCategory::Vfr => Role::Vfr,
        FlightCategory::Mvfr => Role::Mvfr,
        FlightCategory::Ifr => Role::Ifr,
        FlightCategory::Lifr => Role::Lifr,
        FlightCategory::Unknown(_) => Role::Value,
    };

    Line::new().push(Role::Label, format!("{:<11}", "Flight")).push(role, category.as_str())
}

fn field(label: &str, value: String) -> Line {
    Line::new().push(Role::Label, format!("{label:<11}")).push(Role::Value, value)
}

fn indented(label: &str, value: String) -> Line {
    Line::new().push(Role::Label, format!("  {label:<9}")).push(Role::Value, value)
}

/// Epoch seconds to UTC; 0 means the timestamp was not reported.
fn utc(ts: i64) -> Option<DateTime<Utc>> {
    if ts == 0 { None } else { DateTime::from_timestamp(ts, 0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloudLayer, Coded};

    // 2024-03-15 12:51:00 UTC, a Friday
    const OBS_TIME: i64 = 1_710_507_060;

    fn kjfk() -> Metar {
        Metar {
            raw: "KJFK 151251Z 27010KT 10SM FEW050 15/10 A2992".into(),
            station_id: "KJFK".into(),
            name: "New York/JF Kennedy Intl, NY, US".into(),
            temperature_c: 15.0,
            dewpoint_c: 10.0,
            wind_direction: Coded::Numeric(270.0),
            wind_speed_kt: 10,
            wind_gust_kt: 0,
            visibility: Coded::Numeric(10.0),
            altimeter_hpa: 1013.25,
            flight_category: FlightCategory::Vfr,
            clouds: vec![CloudLayer::new("FEW", 5000)],
            observed_at: OBS_TIME,
        }
    }

    fn plain_lines(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn metar_report_contains_every_field() {
        let out = decode(&kjfk(), &Theme::plain());

        for needle in ["KJFK", "VFR", "270° at 10 kt", "10+ SM", "15°C", "10°C", "Few @ 5000 ft"] {
            assert!(out.contains(needle), "missing {needle:?} in\n{out}");
        }
    }

    #[test]
    fn metar_lines_in_order() {
        assert_eq!(
            plain_lines(&metar_lines(&kjfk())),
            vec![
                "KJFK · New York/JF Kennedy Intl, NY, US",
                "Time       15 Mar 2024 12:51 UTC",
                "Flight     VFR",
                "Wind       270° at 10 kt",
                "Visibility 10+ SM",
                "Temp       15°C (Dewpoint: 10°C)",
                "Altimeter  29.92 inHg / 1013 hPa",
                "Clouds     Few @ 5000 ft",
            ]
        );
    }

    #[test]
    fn metar_without_time_name_or_clouds() {
        let metar = Metar {
            name: String::new(),
            observed_at: 0,
            clouds: vec![],
            wind_speed_kt: 0,
            visibility: Coded::Absent,
            flight_category: FlightCategory::Unknown(String::new()),
            ..kjfk()
        };

        let lines = plain_lines(&metar_lines(&metar));

        assert_eq!(lines[0], "KJFK");
        assert!(lines.iter().all(|l| !l.starts_with("Time")));
        assert!(lines.contains(&"Wind       Calm".to_string()));
        assert!(lines.contains(&"Visibility Unknown".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Clouds     Clear"));
    }

    #[test]
    fn flight_categories_are_painted_by_category() {
        colored::control::set_override(true);
        let theme = Theme::colored();
        let label = theme.paint(Role::Label, &format!("{:<11}", "Flight"));

        let cases = [
            (FlightCategory::Vfr, Role::Vfr),
            (FlightCategory::Mvfr, Role::Mvfr),
            (FlightCategory::Ifr, Role::Ifr),
            (FlightCategory::Lifr, Role::Lifr),
            (FlightCategory::Unknown("XX".into()), Role::Value),
        ];
        for (category, role) in &cases {
            let rendered = theme.render_line(&flight_line(category));
            assert!(rendered.contains('\u{1b}'), "{category} not painted: {rendered:?}");
            assert_eq!(rendered, format!("{label}{}", theme.paint(*role, category.as_str())));
        }

        let swatches: Vec<String> = cases.iter().map(|(_, role)| theme.paint(*role, "X")).collect();
        for (i, a) in swatches.iter().enumerate() {
            for b in &swatches[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn metar_box_has_no_trailing_newline() {
        let out = decode(&kjfk(), &Theme::plain());

        assert!(out.starts_with('╭'));
        assert!(out.ends_with('╯'));
        assert_eq!(out.lines().count(), 10);
        assert!(out.contains("│ Clouds     Few @ 5000 ft"));
    }

    #[test]
    fn rendering_is_repeatable() {
        colored::control::set_override(true);
        let metar = kjfk();
        assert_eq!(decode(&metar, &Theme::plain()), decode(&metar, &Theme::plain()));
        assert_eq!(decode(&metar, &Theme::colored()), decode(&metar, &Theme::colored()));

        let taf = sample_taf();
        assert_eq!(decode_forecast(&taf, &Theme::plain()), decode_forecast(&taf, &Theme::plain()));
    }

    // Valid 2024-03-15 12:00 to 2024-03-16 18:00 UTC.
    const VALID_FROM: i64 = 1_710_504_000;
    const VALID_TO: i64 = 1_710_612_000;
    const HOUR: i64 = 3600;

    fn sample_taf() -> Taf {
        Taf {
            station_id: "KJFK".into(),
            name: "New York/JF Kennedy Intl, NY, US".into(),
            raw: "TAF KJFK 151120Z 1512/1618 ...".into(),
            valid_from: VALID_FROM,
            valid_to: VALID_TO,
            periods: vec![
                TafPeriod {
                    time_from: VALID_FROM,
                    time_to: VALID_FROM + 6 * HOUR,
                    change: ChangeIndicator::Initial,
                    wind_direction: Coded::Numeric(270.0),
                    wind_speed_kt: 12,
                    wind_gust_kt: Some(22),
                    visibility: Coded::Token("6+".into()),
                    clouds: vec![CloudLayer::new("SCT", 2500)],
                    ..TafPeriod::default()
                },
                TafPeriod {
                    time_from: VALID_FROM + 2 * HOUR,
                    time_to: VALID_FROM + 4 * HOUR,
                    change: ChangeIndicator::Probability,
                    probability: Some(30),
                    weather: "-RA BR".into(),
                    ..TafPeriod::default()
                },
            ],
        }
    }

    #[test]
    fn taf_lines_in_order() {
        assert_eq!(
            plain_lines(&taf_lines(&sample_taf())),
            vec![
                "KJFK · New York/JF Kennedy Intl, NY, US",
                "TAF FORECAST",
                "Valid      15 Mar 12:00 to 16 Mar 18:00 UTC",
                "Init  Fri 12:00 - Fri 18:00",
                "  Wind     270° at 12 kt, gusting 22 kt",
                "  Visib    6+ SM",
                "  Clouds   Scattered @ 2500 ft",
                "────────────────────────────",
                "Prob30Fri 14:00 - Fri 16:00",
                "  Weather  Light Rain, Mist",
            ]
        );
    }

    #[test]
    fn taf_box_ends_on_last_period_without_newline() {
        let out = decode_forecast(&sample_taf(), &Theme::plain());
        let last_content = out.lines().rev().nth(1).unwrap();

        assert!(last_content.starts_with("│   Weather  Light Rain, Mist"));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn taf_without_valid_window_skips_the_line() {
        let taf = Taf { valid_to: 0, ..sample_taf() };
        let lines = plain_lines(&taf_lines(&taf));

        assert!(lines.iter().all(|l| !l.starts_with("Valid")));
        assert_eq!(lines[2], "Init  Fri 12:00 - Fri 18:00");
    }

    #[test]
    fn period_prefixes() {
        let header = |change, probability| {
            period_header(&TafPeriod {
                time_from: VALID_FROM,
                time_to: VALID_FROM + HOUR,
                change,
                probability,
                ..TafPeriod::default()
            })
        };

        assert_eq!(header(ChangeIndicator::Initial, None), "Init  Fri 12:00 - Fri 13:00");
        assert_eq!(header(ChangeIndicator::From, None), "From  Fri 12:00 - Fri 13:00");
        assert_eq!(header(ChangeIndicator::Tempo, None), "Tempo Fri 12:00 - Fri 13:00");
        assert_eq!(header(ChangeIndicator::Becoming, None), "Becmg Fri 12:00 - Fri 13:00");
        assert_eq!(header(ChangeIndicator::Probability, None), "Prob  Fri 12:00 - Fri 13:00");
        assert_eq!(header(ChangeIndicator::Probability, Some(40)), "Prob40Fri 12:00 - Fri 13:00");
    }

    #[test]
    fn period_skips_empty_fields() {
        let period = TafPeriod {
            time_from: VALID_FROM,
            time_to: VALID_FROM + HOUR,
            change: ChangeIndicator::Becoming,
            visibility: Coded::Token(String::new()),
            ..TafPeriod::default()
        };

        let lines = plain_lines(&period_lines(&period));
        assert_eq!(lines, vec!["Becmg Fri 12:00 - Fri 13:00"]);
    }
}

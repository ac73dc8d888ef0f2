//! SVG graphics embedded in the structured guide: the hexagonal "course
//! demands" radar chart and the training phase bars.

use crate::lookup::{as_f64, get, text_or};
use serde_json::Value;
use std::fmt::{self, Write};

/// One spoke of the radar chart.
struct Axis {
    /// Key of the score in the `radar_chart` object.
    key: &'static str,

    /// Alternate key accepted for the same score.
    alias: Option<&'static str>,

    /// Label drawn next to the spoke.
    label: &'static str,

    /// Angle of the spoke in degrees, clockwise from the positive x axis.
    angle: f64,

    /// Label position and text anchor.
    label_x: i32,
    label_y: i32,
    anchor: &'static str,
}

const AXES: [Axis; 6] = [
    Axis {
        key: "elevation",
        alias: None,
        label: "ELEVATION",
        angle: 270.0,
        label_x: 200,
        label_y: 25,
        anchor: "middle",
    },
    Axis {
        key: "length",
        alias: None,
        label: "LENGTH",
        angle: 330.0,
        label_x: 330,
        label_y: 95,
        anchor: "start",
    },
    Axis {
        key: "technical",
        alias: Some("technicality"),
        label: "TECHNICAL",
        angle: 30.0,
        label_x: 330,
        label_y: 230,
        anchor: "start",
    },
    Axis {
        key: "climate",
        alias: None,
        label: "CLIMATE",
        angle: 90.0,
        label_x: 200,
        label_y: 305,
        anchor: "middle",
    },
    Axis {
        key: "altitude",
        alias: None,
        label: "ALTITUDE",
        angle: 150.0,
        label_x: 70,
        label_y: 230,
        anchor: "end",
    },
    Axis {
        key: "adventure",
        alias: None,
        label: "ADVENTURE",
        angle: 210.0,
        label_x: 70,
        label_y: 95,
        anchor: "end",
    },
];

/// Scores run from 1 to 5; the outermost ring is a 5.
const MAX_SCORE: f64 = 5.0;

/// Score used for an axis that has no entry.
const DEFAULT_SCORE: f64 = 1.0;

/// Geometry of the radar chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Radar {
    pub center_x: f64,
    pub center_y: f64,
    pub max_radius: f64,
}

impl Default for Radar {
    fn default() -> Self {
        Radar {
            center_x: 200.0,
            center_y: 160.0,
            max_radius: 120.0,
        }
    }
}

impl Radar {
    /// Computes the integer polygon vertices for a set of scores, one per
    /// axis in elevation, length, technical, climate, altitude, adventure
    /// order. Rounding is half-to-even so the same input always lands on the
    /// same pixel.
    pub fn points(&self, scores: &Value) -> [(i64, i64); 6] {
        let mut points = [(0, 0); 6];
        for (point, axis) in points.iter_mut().zip(AXES.iter()) {
            let radius = self.max_radius * (score(scores, axis) / MAX_SCORE);
            let theta = axis.angle.to_radians();
            let x = self.center_x + radius * theta.cos();
            let y = self.center_y + radius * theta.sin();
            *point = (x.round_ties_even() as i64, y.round_ties_even() as i64);
        }
        points
    }
}

/// Finds the score for an axis. A score may be a bare number or an object with
/// a `score` field.
fn score(scores: &Value, axis: &Axis) -> f64 {
    let raw = get(scores, &[axis.key]).or_else(|| axis.alias.and_then(|a| get(scores, &[a])));
    raw.and_then(|v| match v {
        Value::Object(_) => get(v, &["score"]).and_then(as_f64),
        v => as_f64(v),
    })
    .unwrap_or(DEFAULT_SCORE)
}

/// Formats a score for a label: `3` rather than `3.0`.
fn score_label(value: f64) -> String {
    match value.fract() == 0.0 {
        true => format!("{}", value as i64),
        false => format!("{}", value),
    }
}

/// Writes the course demands radar chart into `w`.
pub fn write_radar_svg<W: Write + ?Sized>(w: &mut W, scores: &Value) -> fmt::Result {
    let radar = Radar::default();
    let points = radar.points(scores);
    let polygon = points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    w.write_str(
        r##"            <svg viewBox="0 0 400 350" width="400" height="350">
                <rect x="0" y="0" width="400" height="350" fill="white"/>
"##,
    )?;
    for r in [120, 96, 72, 48, 24] {
        writeln!(
            w,
            r##"                <circle cx="200" cy="160" r="{}" fill="none" stroke="#e0e0e0" stroke-width="1"/>"##,
            r
        )?;
    }
    for (x, y) in spokes(&radar) {
        writeln!(
            w,
            r##"                <line x1="200" y1="160" x2="{}" y2="{}" stroke="#ccc" stroke-width="1"/>"##,
            x, y
        )?;
    }
    writeln!(
        w,
        r##"                <polygon points="{}" fill="rgba(78, 205, 196, 0.3)" stroke="#4ecdc4" stroke-width="3"/>"##,
        polygon
    )?;
    for (x, y) in points.iter() {
        writeln!(
            w,
            r##"                <circle cx="{}" cy="{}" r="6" fill="#4ecdc4" stroke="#2c2c2c" stroke-width="2"/>"##,
            x, y
        )?;
    }
    for axis in AXES.iter() {
        writeln!(
            w,
            r#"                <text x="{}" y="{}" text-anchor="{}" font-family="Sometype Mono, monospace" font-size="12" font-weight="700">{} ({}/5)</text>"#,
            axis.label_x,
            axis.label_y,
            axis.anchor,
            axis.label,
            score_label(score(scores, axis)),
        )?;
    }
    w.write_str("            </svg>")
}

/// End points of the six spokes: the vertices of a chart where every score is
/// the maximum.
fn spokes(radar: &Radar) -> [(i64, i64); 6] {
    let full: serde_json::Map<String, Value> = AXES
        .iter()
        .map(|axis| (axis.key.to_owned(), Value::from(MAX_SCORE)))
        .collect();
    radar.points(&Value::Object(full))
}

/// Horizontal positions of the phase bars; bars beyond the fourth keep the
/// same spacing.
fn phase_x(index: usize) -> usize {
    50 + 125 * index
}

/// Renders one bar per training phase. Each phase needs `name`, `weeks` and
/// `color`.
pub fn phase_bars(phases: &[Value]) -> String {
    phases
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            let x = phase_x(i);
            format!(
                r##"                <rect x="{x}" y="30" width="100" height="50" fill="{color}" stroke="#2c2c2c" stroke-width="2"/>
                <text x="{mid}" y="60" text-anchor="middle" font-family="Sometype Mono, monospace" font-size="14" font-weight="700">{name}</text>
                <text x="{mid}" y="100" text-anchor="middle" font-family="Sometype Mono, monospace" font-size="11">Weeks {weeks}</text>"##,
                x = x,
                mid = x + 50,
                color = text_or(phase, &["color"], ""),
                name = text_or(phase, &["name"], ""),
                weeks = text_or(phase, &["weeks"], ""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

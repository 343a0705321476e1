use crate::go::{Color, Point};
use std::str::FromStr;

/// The token that introduces each candidate move in an analysis report.
pub const MARKER: &str = "info";

/// Whether a line carries an analysis report.
pub fn is_analysis(line: &str) -> bool {
    line.split_whitespace().any(|t| t == MARKER)
}

/// The engine's preferred continuation, extracted from an analysis report.
///
/// Every field is independently absent if the report doesn't carry it in a usable form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Analysis {
    /// The best move, absent if the engine prefers to pass.
    pub best: Option<Point>,
    /// The probability of winning for Black, in percent.
    pub winrate: Option<f64>,
    pub visits: Option<u64>,
    /// The principal variation, up to the first token that isn't a point.
    pub pv: Option<Vec<Point>>,
}

impl Analysis {
    /// Parses a report for the position where `turn` is to move on a board of the given size.
    ///
    /// Only the candidate ranked first (`order 0`) is considered.
    pub fn parse(line: &str, turn: Color, size: u8) -> Self {
        let tokens: Vec<_> = line.split_whitespace().collect();

        let best = tokens
            .split(|&t| t == MARKER)
            .filter(|s| !s.is_empty())
            .find(|s| s.windows(2).any(|w| w == ["order", "0"]));

        let Some(fields) = best else {
            return Analysis::default();
        };

        // Hundredths of a percent, for the side to move.
        let winrate = field::<u32>(fields, "winrate").map(|w| w.min(10000));

        Analysis {
            best: after(fields, "move")
                .and_then(|t| t.first())
                .and_then(|t| Point::from_vertex(t, size)),

            winrate: winrate.map(|w| match turn {
                Color::Black => f64::from(w) / 100.,
                Color::White => f64::from(10000 - w) / 100.,
            }),

            visits: field(fields, "visits"),

            pv: after(fields, "pv").map(|ts| {
                ts.iter()
                    .map_while(|t| Point::from_vertex(t, size))
                    .collect()
            }),
        }
    }
}

/// The tokens that follow the first occurrence of `key`.
fn after<'a>(fields: &'a [&'a str], key: &str) -> Option<&'a [&'a str]> {
    let i = fields.iter().position(|&t| t == key)?;
    Some(&fields[i + 1..])
}

fn field<T: FromStr>(fields: &[&str], key: &str) -> Option<T> {
    after(fields, key)?.first()?.parse().ok()
}

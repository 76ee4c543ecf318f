// Chart dataset and formatting rules shared by the chart factories
use serde::Deserialize;

pub const CURRENCY_GLYPH: &str = "฿";

/// Slice colors for the job type pie, cycled by slice index.
pub const PIE_PALETTE: [&str; 6] = [
    "rgba(255, 99, 132, 0.7)",
    "rgba(54, 162, 235, 0.7)",
    "rgba(255, 206, 86, 0.7)",
    "rgba(75, 192, 192, 0.7)",
    "rgba(153, 102, 255, 0.7)",
    "rgba(255, 159, 64, 0.7)",
];

pub const BAR_FILL: &str = "rgba(54, 162, 235, 0.6)";
pub const BAR_STROKE: &str = "rgba(54, 162, 235, 1)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Parallel label/value sequences synthesized by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartDataset {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl ChartDataset {
    /// Both sequences present, non-empty and paired one to one.
    pub fn is_renderable(&self) -> bool {
        !self.labels.is_empty() && !self.values.is_empty() && self.labels.len() == self.values.len()
    }
}

pub fn slice_color(index: usize) -> &'static str {
    PIE_PALETTE[index % PIE_PALETTE.len()]
}

/// Value axis tick such as `฿1,234.5`: thousands separators, at most three fraction digits.
pub fn format_currency_tick(value: f64) -> String {
    format!("{}{}", CURRENCY_GLYPH, group_thousands(value))
}

fn group_thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

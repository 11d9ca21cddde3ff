// Cancellation chart composition and rendering policy
use super::cancellation::{CancellationRecord, RecordKind};
use super::layout::AxisLayout;
use serde::Serialize;

/// Unit shown after the count in bar tooltips.
pub const UNIT_LABEL: &str = "cancelled";

/// Yearly averages that predate the scraper. They never change.
const HISTORICAL_AVERAGES: [(&str, u64); 4] = [
    ("2022", 11),
    ("2023", 12),
    ("2024", 20),
    ("Nov '24", 40),
];

/// Compiled-in averages followed by the spacer that separates them from
/// recent bars.
pub fn historical_averages() -> Vec<CancellationRecord> {
    HISTORICAL_AVERAGES
        .iter()
        .map(|(label, count)| CancellationRecord::average(*label, *count))
        .chain(std::iter::once(CancellationRecord::spacer()))
        .collect()
}

/// Concatenate `historical` and `recent` in order. `recent` is neither
/// sorted, deduplicated nor validated.
pub fn compose(historical: &[CancellationRecord], recent: &[CancellationRecord]) -> Vec<CancellationRecord> {
    let mut records = Vec::with_capacity(historical.len() + recent.len());
    records.extend_from_slice(historical);
    records.extend_from_slice(recent);
    records
}

pub fn compose_chart_data(recent: &[CancellationRecord]) -> Vec<CancellationRecord> {
    compose(&historical_averages(), recent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Gray,
    Transparent,
    Accent,
}

impl BarColor {
    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Gray => "#475569",
            BarColor::Transparent => "transparent",
            BarColor::Accent => "#f43f5e",
        }
    }
}

pub fn bar_color(kind: RecordKind) -> BarColor {
    match kind {
        RecordKind::Avg => BarColor::Gray,
        RecordKind::Spacer => BarColor::Transparent,
        RecordKind::Recent => BarColor::Accent,
    }
}

pub fn tooltip(count: u64) -> String {
    format!("{} {}", count, UNIT_LABEL)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub count: u64,
    pub kind: RecordKind,
    pub color: &'static str,
    pub tooltip: String,
}

impl From<CancellationRecord> for ChartBar {
    fn from(record: CancellationRecord) -> Self {
        Self {
            color: bar_color(record.kind).css(),
            tooltip: tooltip(record.count),
            label: record.label,
            count: record.count,
            kind: record.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

pub fn legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            label: "Historical Average",
            color: BarColor::Gray.css(),
        },
        LegendEntry {
            label: "Recent Total",
            color: BarColor::Accent.css(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub bars: Vec<ChartBar>,
    pub axis: AxisLayout,
    pub legend: Vec<LegendEntry>,
}

impl ChartView {
    pub fn new(recent: &[CancellationRecord], axis: AxisLayout) -> Self {
        Self {
            bars: compose_chart_data(recent)
                .into_iter()
                .map(ChartBar::from)
                .collect(),
            axis,
            legend: legend(),
        }
    }

    /// Tallest bar, never below 1 so an all-zero chart still has a scale.
    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1)
    }
}

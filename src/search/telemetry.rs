use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

/// Counters accumulated over one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTelemetry {
    /// Distinct states created, the root included. Successors that merged
    /// into an existing state are not counted here.
    pub generated: u64,
    /// Nodes popped from the frontier and expanded (or returned as the
    /// solution).
    pub popped: u64,
    /// Successors that collapsed into an already-known state.
    pub merged: u64,
    /// Cheaper-path reattachments applied during the run.
    pub relaxations: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

/// Renders the run counters as a text table.
pub fn render_telemetry_table(telemetry: &SearchTelemetry) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Count")]));

    let rows: [(&str, u64); 5] = [
        ("Nodes generated", telemetry.generated),
        ("Nodes popped", telemetry.popped),
        ("Duplicates merged", telemetry.merged),
        ("Path relaxations", telemetry.relaxations),
        ("Peak frontier size", telemetry.peak_frontier as u64),
    ];
    for (label, count) in rows {
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&count.to_string()),
        ]));
    }

    table.to_string()
}

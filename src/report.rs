//! Plain-text rendering of analysis results for the terminal.

use crate::services::AnalysisRun;
use crate::types::{TrendDirection, TrendResult};
use std::fmt::Write;

fn direction_label(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "UP",
        TrendDirection::Down => "DOWN",
        TrendDirection::Undefined => "UNDEFINED",
    }
}

/// Render a trend result block.
pub fn render_result(result: &TrendResult) -> String {
    let mut out = String::new();
    let ind = &result.indicators;

    let _ = writeln!(out, "Trend:            {}", direction_label(result.classification));
    let _ = writeln!(out, "Score:            {:.2}/100", result.score);
    let _ = writeln!(out, "Probability up:   {:.2}%", result.probability_up);
    let _ = writeln!(out, "Probability down: {:.2}%", result.probability_down);
    let _ = writeln!(out, "Confidence:       {:.2}", ind.confidence);
    let _ = writeln!(
        out,
        "Indicators:       change {:+.4}%, RSI {:.2}, momentum {:+.4}, volatility {:.4}",
        ind.price_change * 100.0,
        ind.rsi,
        ind.momentum,
        ind.volatility
    );
    let _ = write!(out, "Data:             {}", result.source_reference);
    out
}

/// Render a completed run, including its header line.
pub fn render_run(run: &AnalysisRun) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Run {}: {} periods, {} queries",
        run.run_id,
        run.windows.len(),
        run.request_count
    );
    if run.placeholder_count > 0 {
        let _ = writeln!(
            out,
            "Warning: {} samples used simulated data",
            run.placeholder_count
        );
    }
    out.push_str(&render_result(&run.result));
    out
}

/// Render (parameter, value) rows as an aligned two-column table.
pub fn render_table(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(name, value)| format!("{:<width$}  {}", name, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the saved-file listing.
pub fn render_file_list(files: &[String]) -> String {
    if files.is_empty() {
        return "No saved CSV files".to_string();
    }
    files
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>3}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

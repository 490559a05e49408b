//! Charts component renderer.
//!
//! Draws the output-length histogram and the pass-rate bars for the loaded
//! page as horizontal block bars.

use crate::domain::stats::PASS_THRESHOLD;
use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChartsInfo;

/// Width of the label column in front of each bar.
const LABEL_WIDTH: usize = 14;

/// Room kept right of each bar for its value.
const VALUE_WIDTH: usize = 18;

/// Renders both charts starting at `row`, stopping before `last_row`.
///
/// Returns the next free row.
pub fn render_charts(row: usize, last_row: usize, charts: &ChartsInfo, theme: &Theme, cols: usize) -> usize {
    let bar_width = cols.saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2);
    let mut current_row = row;

    current_row = render_title(current_row, "Output length (characters)", theme, cols);
    if charts.histogram.is_empty() {
        current_row = render_plain(current_row, "  no results on this page", theme, cols);
    }
    let tallest = charts.histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &charts.histogram {
        if current_row >= last_row {
            return current_row;
        }
        let label = format!("{}-{}", bucket.start, bucket.end.saturating_sub(1));
        let value = format!("{}", bucket.count);
        current_row = render_bar(
            current_row,
            &label,
            &bar(fraction(bucket.count, tallest), bar_width),
            &value,
            &theme.colors.chart_bar,
            theme,
            cols,
        );
    }

    current_row += 1;
    if current_row >= last_row {
        return current_row;
    }
    current_row = render_title(current_row, &format!("Pass rate (score >= {PASS_THRESHOLD})"), theme, cols);

    let rates = [
        ("Auto eval", charts.pass_rates.auto_rate, charts.pass_rates.auto_count),
        ("Human eval", charts.pass_rates.human_rate, charts.pass_rates.human_count),
    ];
    for (label, rate, count) in rates {
        if current_row >= last_row {
            break;
        }
        let color = match rate {
            Some(r) if r >= PASS_THRESHOLD => &theme.colors.pass_fg,
            Some(_) => &theme.colors.fail_fg,
            None => &theme.colors.text_dim,
        };
        current_row = render_bar(
            current_row,
            label,
            &bar(rate.unwrap_or(0.0), bar_width),
            &format_rate(rate, count),
            color,
            theme,
            cols,
        );
    }

    current_row
}

fn render_title(row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&format!(" {title}"), cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_plain(row: usize, text: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", pad(text, cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_bar(
    row: usize,
    label: &str,
    bar: &str,
    value: &str,
    color: &str,
    theme: &Theme,
    cols: usize,
) -> usize {
    let line_len = LABEL_WIDTH + 1 + bar.chars().count() + 1 + value.chars().count();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{} ", pad(&format!("  {label}"), LABEL_WIDTH));
    print!("{}", Theme::fg(color));
    print!("{bar}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" {value}");
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}

#[allow(clippy::cast_precision_loss)]
fn fraction(count: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        count as f64 / max as f64
    }
}

/// A bar of `width` cells, `fraction` of them filled.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn format_rate(rate: Option<f64>, count: usize) -> String {
    match rate {
        Some(rate) => format!("{:.0}% of {count}", rate * 100.0),
        None => "n/a (no scores)".to_string(),
    }
}

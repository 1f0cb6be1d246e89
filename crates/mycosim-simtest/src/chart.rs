//! Terminal rendering — health progress bar and horizontal bar chart.

use mycosim_logic::display::DisplayPoint;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Number of filled cells for a value, with the value clamped to [0, 1].
/// Values above 1 are still printed in full next to the bar.
fn filled_cells(value: f64, width: usize) -> usize {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    ((v * width as f64).round() as usize).min(width)
}

/// `[█████░░░░░]  50%`
pub fn render_progress(score: f64, width: usize) -> String {
    let filled = filled_cells(score, width);
    let bar: String = std::iter::repeat(FILLED)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(width - filled))
        .collect();
    format!("[{}] {:>3.0}%", bar, score * 100.0)
}

/// One line per point: label, bar, value.
pub fn render_bar_chart(title: &str, series: &[DisplayPoint], width: usize) -> String {
    let label_width = series
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for p in series {
        let filled = filled_cells(p.value, width);
        let bar: String = std::iter::repeat(FILLED).take(filled).collect();
        out.push_str(&format!(
            "  {:<lw$} │{:<w$} {:.2}\n",
            p.label,
            bar,
            p.value,
            lw = label_width,
            w = width
        ));
    }
    out
}

use crate::components::html_escape;
use crate::fmt::format_compact;
use std::fmt::Write;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 24.0;

/// Small inline trend line for a metric card. Blank under two points.
pub fn sparkline(values: &[f64]) -> String {
    if values.len() < 2 {
        return String::new();
    }
    let width = 80.0;
    let height = 24.0;
    let padding = 2.0;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let step = (width - padding * 2.0) / (values.len() - 1) as f64;
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = padding + i as f64 * step;
            let y = padding + (1.0 - (v - min) / range) * (height - padding * 2.0);
            format!("{x:.1},{y:.1}")
        })
        .collect();

    format!(
        r#"<svg class="sparkline" viewBox="0 0 {width:.0} {height:.0}" preserveAspectRatio="none"><polyline points="{}" fill="none" stroke="currentColor" stroke-width="1.5" /></svg>"#,
        points.join(" ")
    )
}

/// Full-width trend chart: grid ticks, zero baseline, line path, point
/// markers, thinned x labels. Null points leave gaps in the line.
pub fn line_chart(title: &str, labels: &[String], values: &[Option<f64>]) -> String {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.len() < 2 {
        return format!(
            r#"<div class="chart-card"><div class="chart-card__title">{}</div><div class="chart-card__empty">Not enough data</div></div>"#,
            html_escape(title)
        );
    }

    let mut min = present.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
    let mut max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(0.0);
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    let range = max - min;

    let count = values.len();
    let x_step = if count > 1 {
        (CHART_WIDTH - PADDING_X * 2.0) / (count - 1) as f64
    } else {
        0.0
    };
    let scale_y = (CHART_HEIGHT - TOP - PADDING_Y) / range;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| CHART_HEIGHT - PADDING_Y - (value - min) * scale_y;

    // Gap-aware path: restart the stroke after every missing point.
    let mut path = String::new();
    let mut pen_down = false;
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                let _ = write!(path, "{cmd} {:.2} {:.2} ", x(i), y(*v));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }

    let ticks = 4;
    let mut grid = String::new();
    for i in 0..=ticks {
        let value = min + range * i as f64 / ticks as f64;
        let y_pos = y(value);
        let _ = write!(
            grid,
            r#"<line class="chart-grid" x1="{PADDING_X:.0}" y1="{y_pos:.1}" x2="{:.0}" y2="{y_pos:.1}" />"#,
            CHART_WIDTH - PADDING_X
        );
        let _ = write!(
            grid,
            r#"<text class="chart-label" x="{:.0}" y="{:.1}" text-anchor="end">{}</text>"#,
            PADDING_X - 10.0,
            y_pos + 4.0,
            format_compact(Some(value))
        );
    }

    let label_every = (count / 8).max(1);
    let mut x_labels = String::new();
    for (i, label) in labels.iter().enumerate() {
        if i % label_every != 0 {
            continue;
        }
        let _ = write!(
            x_labels,
            r#"<text class="chart-label" x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x(i),
            CHART_HEIGHT - PADDING_Y + 18.0,
            html_escape(label)
        );
    }

    let mut circles = String::new();
    for (i, value) in values.iter().enumerate() {
        if let Some(v) = value {
            let _ = write!(
                circles,
                r#"<circle class="chart-point" cx="{:.1}" cy="{:.1}" r="3" />"#,
                x(i),
                y(*v)
            );
        }
    }

    let zero_line = format!(
        r#"<line class="chart-axis" x1="{PADDING_X:.0}" y1="{:.1}" x2="{:.0}" y2="{:.1}" />"#,
        y(0.0),
        CHART_WIDTH - PADDING_X,
        y(0.0)
    );

    format!(
        r#"<div class="chart-card"><div class="chart-card__title">{}</div><svg viewBox="0 0 {CHART_WIDTH:.0} {CHART_HEIGHT:.0}" role="img" aria-label="{}">{grid}{zero_line}<path class="chart-line" d="{}" />{circles}{x_labels}</svg></div>"#,
        html_escape(title),
        html_escape(title),
        path.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_needs_two_points() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[5.0]), "");
        assert!(sparkline(&[1.0, 2.0, 3.0]).contains("<polyline"));
    }

    #[test]
    fn sparkline_handles_flat_series() {
        let svg = sparkline(&[7.0, 7.0, 7.0]);
        assert!(svg.contains("<polyline"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn line_chart_breaks_path_at_gaps() {
        let labels: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let svg = line_chart("Views", &labels, &[Some(1.0), None, Some(3.0), Some(4.0)]);
        // Two M commands: stroke restarts after the gap.
        assert_eq!(svg.matches("M ").count(), 2);
        assert!(svg.contains("Views"));
    }

    #[test]
    fn line_chart_with_sparse_data_is_placeholder() {
        let labels = vec!["a".to_string()];
        let svg = line_chart("Views", &labels, &[Some(1.0)]);
        assert!(svg.contains("Not enough data"));
    }
}

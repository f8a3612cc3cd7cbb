use crate::models::{Prediction, TrendModel};
use crate::series::Series;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 24.0;
const TICKS: usize = 4;

/// Renders consumption over time as an inline SVG line chart, with the fitted
/// trend drawn through to the forecast point.
pub fn render_chart(series: &Series, model: &TrendModel, prediction: &Prediction) -> String {
    let offsets: Vec<i64> = series.offsets().collect();
    let x_max = prediction.target_offset.max(1) as f64;

    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for value in series
        .samples()
        .iter()
        .map(|sample| sample.consumption)
        .chain([model.predict(0), prediction.value])
    {
        min = min.min(value);
        max = max.max(value);
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    // Halved bounds keep `max - min` finite for values near f64::MAX.
    let half_range = max / 2.0 - min / 2.0;
    let plot_height = HEIGHT - TOP - PADDING_Y;
    let x = |offset: i64| PADDING_X + offset as f64 / x_max * (WIDTH - PADDING_X * 2.0);
    let y = |value: f64| HEIGHT - PADDING_Y - (value / 2.0 - min / 2.0) / half_range * plot_height;

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Energy consumption over time">"#
    );

    for i in 0..=TICKS {
        let t = i as f64 / TICKS as f64;
        let value = min * (1.0 - t) + max * t;
        let y_pos = y(value);
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{right}" y2="{y_pos:.2}" /><text class="chart-label" x="{label_x}" y="{text_y:.2}" text-anchor="end">{label}</text>"#,
            right = WIDTH - PADDING_X,
            label_x = PADDING_X - 10.0,
            text_y = y_pos + 4.0,
            label = format_axis_value(value),
        ));
    }

    svg.push_str(&format!(
        r#"<line class="chart-axis" x1="{PADDING_X}" y1="{zero:.2}" x2="{right}" y2="{zero:.2}" />"#,
        zero = y(0.0),
        right = WIDTH - PADDING_X,
    ));

    svg.push_str(&format!(
        r#"<line class="chart-trend" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" />"#,
        x(0),
        y(model.predict(0)),
        x(prediction.target_offset),
        y(prediction.value),
    ));

    let path = series
        .samples()
        .iter()
        .zip(&offsets)
        .enumerate()
        .map(|(index, (sample, offset))| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {:.2} {:.2}", x(*offset), y(sample.consumption))
        })
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(r#"<path class="chart-line" d="{path}" />"#));

    for (sample, offset) in series.samples().iter().zip(&offsets) {
        svg.push_str(&format!(
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" />"#,
            x(*offset),
            y(sample.consumption),
        ));
    }

    svg.push_str(&format!(
        r#"<circle class="chart-forecast" cx="{:.2}" cy="{:.2}" r="5" />"#,
        x(prediction.target_offset),
        y(prediction.value),
    ));

    let mut labelled: Vec<(i64, String)> = series
        .samples()
        .iter()
        .zip(&offsets)
        .map(|(sample, offset)| (*offset, sample.date.format("%m-%d").to_string()))
        .collect();
    labelled.dedup_by_key(|(offset, _)| *offset);
    let label_every = if labelled.len() > 8 { 2 } else { 1 };
    let label_y = HEIGHT - PADDING_Y + 18.0;
    for (offset, label) in labelled.iter().step_by(label_every) {
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{label_y}" text-anchor="middle">{label}</text>"#,
            x(*offset),
        ));
    }
    svg.push_str(&format!(
        r#"<text class="chart-label chart-label-forecast" x="{:.2}" y="{label_y}" text-anchor="middle">{}</text>"#,
        x(prediction.target_offset),
        prediction.target_date.format("%m-%d"),
    ));

    svg.push_str("</svg>");
    svg
}

fn format_axis_value(value: f64) -> String {
    if value.abs() >= 1e6 {
        return format!("{value:.1e}");
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

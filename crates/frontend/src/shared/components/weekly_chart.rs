//! Inline SVG chart for the seven-day overview.
//!
//! Every dataset is drawn in its own panel and scaled to its own maximum,
//! since sessions and kWh have unrelated ranges.

use contracts::dashboards::overview::{ChartDataset, WeeklyChart};
use leptos::prelude::*;

pub const CHART_WIDTH: f64 = 560.0;
pub const CHART_HEIGHT: f64 = 160.0;
const PAD_X: f64 = 32.0;
const PAD_Y: f64 = 16.0;

const FALLBACK_COLORS: [&str; 2] = ["#3b82f6", "#10b981"];

/// Plot coordinates for `data` inside a `width` x `height` box.
///
/// Points are spread evenly on x; y is scaled so the maximum touches the
/// top padding. An all-zero series lies on the baseline.
pub fn chart_points(data: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = data.iter().copied().fold(0.0, f64::max);
    let inner_w = width - 2.0 * PAD_X;
    let inner_h = height - 2.0 * PAD_Y;
    let step = if data.len() > 1 {
        inner_w / (data.len() - 1) as f64
    } else {
        0.0
    };
    data.iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if data.len() > 1 { PAD_X + step * i as f64 } else { width / 2.0 };
            let ratio = if max > 0.0 { v.max(0.0) / max } else { 0.0 };
            let y = height - PAD_Y - ratio * inner_h;
            (x, y)
        })
        .collect()
}

/// `points` attribute for an SVG polyline.
pub fn polyline_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Closed polygon under the line, for filled datasets.
pub fn area_attr(points: &[(f64, f64)], height: f64) -> String {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            let baseline = height - PAD_Y;
            format!(
                "{:.1},{:.1} {} {:.1},{:.1}",
                first.0,
                baseline,
                polyline_attr(points),
                last.0,
                baseline
            )
        }
        _ => String::new(),
    }
}

fn dataset_color(dataset: &ChartDataset, index: usize) -> String {
    if dataset.border_color.trim().is_empty() {
        FALLBACK_COLORS[index % FALLBACK_COLORS.len()].to_string()
    } else {
        dataset.border_color.clone()
    }
}

fn format_point(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[component]
fn DatasetPanel(labels: Vec<String>, dataset: ChartDataset, index: usize) -> impl IntoView {
    let color = dataset_color(&dataset, index);
    let points = chart_points(&dataset.data, CHART_WIDTH, CHART_HEIGHT);
    let line = polyline_attr(&points);
    let area = dataset.fill.then(|| area_attr(&points, CHART_HEIGHT));
    let total = format_point(dataset.total());
    let max = format_point(dataset.max_value());

    let markers = points
        .iter()
        .map(|(x, y)| {
            view! {
                <circle cx=format!("{:.1}", x) cy=format!("{:.1}", y) r="3" fill=color.clone() />
            }
        })
        .collect_view();

    let axis_labels = points
        .iter()
        .zip(labels.iter())
        .map(|((x, _), label)| {
            view! {
                <text x=format!("{:.1}", x) y=format!("{:.1}", CHART_HEIGHT - 2.0) text-anchor="middle" class="weekly-chart__axis">
                    {label.clone()}
                </text>
            }
        })
        .collect_view();

    view! {
        <div class="weekly-chart__panel">
            <div class="weekly-chart__legend">
                <span class="weekly-chart__swatch" style=format!("background: {}", color)></span>
                <span class="weekly-chart__label">{dataset.label.clone()}</span>
                <span class="weekly-chart__meta">{format!("total {} · max {}", total, max)}</span>
            </div>
            <svg
                class="weekly-chart__svg"
                viewBox=format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)
                preserveAspectRatio="none"
                role="img"
            >
                {area.map(|a| view! { <polygon points=a fill=color.clone() fill-opacity="0.15" /> })}
                <polyline points=line fill="none" stroke=color.clone() stroke-width="2" />
                {markers}
                {axis_labels}
            </svg>
        </div>
    }
}

#[component]
pub fn WeeklyChartView(#[prop(into)] chart: Signal<WeeklyChart>) -> impl IntoView {
    view! {
        <div class="weekly-chart">
            {move || {
                let chart = chart.get();
                if chart.is_empty() {
                    view! { <div class="weekly-chart__empty">"No data for the last 7 days"</div> }
                        .into_any()
                } else {
                    let labels = chart.labels.clone();
                    chart
                        .datasets
                        .into_iter()
                        .enumerate()
                        .map(|(i, ds)| view! { <DatasetPanel labels=labels.clone() dataset=ds index=i /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_has_no_points() {
        assert!(chart_points(&[], CHART_WIDTH, CHART_HEIGHT).is_empty());
        assert_eq!(polyline_attr(&[]), "");
        assert_eq!(area_attr(&[], CHART_HEIGHT), "");
    }

    #[test]
    fn points_span_width_and_scale_to_max() {
        let pts = chart_points(&[0.0, 5.0, 10.0], 100.0 + 2.0 * PAD_X, 100.0 + 2.0 * PAD_Y);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], (PAD_X, 100.0 + PAD_Y));
        assert_eq!(pts[1], (PAD_X + 50.0, 50.0 + PAD_Y));
        assert_eq!(pts[2], (PAD_X + 100.0, PAD_Y));
    }

    #[test]
    fn zero_series_lies_on_baseline() {
        let pts = chart_points(&[0.0; 7], CHART_WIDTH, CHART_HEIGHT);
        assert!(pts.iter().all(|(_, y)| *y == CHART_HEIGHT - PAD_Y));
    }

    #[test]
    fn single_point_is_centered() {
        let pts = chart_points(&[4.0], CHART_WIDTH, CHART_HEIGHT);
        assert_eq!(pts, vec![(CHART_WIDTH / 2.0, PAD_Y)]);
    }

    #[test]
    fn polyline_and_area_format() {
        let pts = vec![(10.0, 20.0), (30.5, 40.0)];
        assert_eq!(polyline_attr(&pts), "10.0,20.0 30.5,40.0");
        assert_eq!(
            area_attr(&pts, 100.0),
            format!("10.0,{:.1} 10.0,20.0 30.5,40.0 30.5,{:.1}", 100.0 - PAD_Y, 100.0 - PAD_Y)
        );
    }

    #[test]
    fn fallback_color_when_missing() {
        let ds = ChartDataset::default();
        assert_eq!(dataset_color(&ds, 1), "#10b981");
        let ds = ChartDataset {
            border_color: "#ff0000".into(),
            ..Default::default()
        };
        assert_eq!(dataset_color(&ds, 0), "#ff0000");
    }
}

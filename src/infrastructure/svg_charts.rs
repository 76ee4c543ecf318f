// SVG chart factory - server-side drawing of the report bar and pie charts
use crate::application::chart_renderer::{BarChartSpec, ChartFactory, ChartHandle, PieChartSpec, RenderedChart};
use crate::domain::chart::{format_currency_tick, ChartKind};
use anyhow::{ensure, Result};
use maud::{html, Markup};
use std::f64::consts::PI;
use std::sync::Arc;

const TICK_COUNT: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct SvgChartFactory {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgChartFactory {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
        }
    }
}

struct Plot {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    y_min: f64,
    y_max: f64,
}

impl Plot {
    fn y(&self, value: f64) -> f64 {
        let span = self.y_max - self.y_min;
        self.bottom - (value - self.y_min) / span * (self.bottom - self.top)
    }
}

impl ChartFactory for SvgChartFactory {
    fn bar(&self, spec: &BarChartSpec) -> Result<ChartHandle> {
        ensure!(
            !spec.values.is_empty() && spec.labels.len() == spec.values.len(),
            "bar chart needs one value per label"
        );
        ensure!(spec.values.iter().all(|v| v.is_finite()), "bar chart values must be finite");

        let (y_min, y_max, step) = value_axis(&spec.values);
        let plot = Plot {
            left: 80.0,
            right: self.width - 16.0,
            top: 16.0,
            bottom: self.height - 40.0,
            y_min,
            y_max,
        };
        let band = (plot.right - plot.left) / spec.values.len() as f64;
        let bar_width = band * 0.7;
        let baseline = plot.y(0.0);
        let tick_values: Vec<f64> = (0..)
            .map(|i| y_min + step * i as f64)
            .take_while(|v| *v <= y_max + step / 2.0)
            .collect();

        let markup = html! {
            svg.chart.bar-chart xmlns="http://www.w3.org/2000/svg" viewBox={ "0 0 " (self.width) " " (self.height) }
                role="img" aria-label=(spec.dataset_label) {
                @for tick in &tick_values {
                    line.grid x1=(px(plot.left)) x2=(px(plot.right)) y1=(px(plot.y(*tick))) y2=(px(plot.y(*tick)))
                        stroke="#e5e5e5" {}
                    text.tick x=(px(plot.left - 8.0)) y=(px(plot.y(*tick) + 4.0)) text-anchor="end" font-size="11" {
                        (format_currency_tick(*tick))
                    }
                }
                @for (index, (label, value)) in spec.labels.iter().zip(&spec.values).enumerate() {
                    @let x = plot.left + band * index as f64 + (band - bar_width) / 2.0;
                    @let top = plot.y(*value).min(baseline);
                    rect x=(px(x)) y=(px(top)) width=(px(bar_width)) height=(px((plot.y(*value) - baseline).abs()))
                        fill=(spec.fill) stroke=(spec.stroke) stroke-width="1" {
                        title { (label) ": " (format_currency_tick(*value)) }
                    }
                    text.category x=(px(x + bar_width / 2.0)) y=(px(plot.bottom + 18.0)) text-anchor="middle" font-size="11" {
                        (label)
                    }
                }
            }
        };

        Ok(rendered(ChartKind::Bar, &spec.dataset_label, &spec.labels, vec![spec.fill.to_string()], markup))
    }

    fn pie(&self, spec: &PieChartSpec) -> Result<ChartHandle> {
        ensure!(
            !spec.values.is_empty() && spec.labels.len() == spec.values.len(),
            "pie chart needs one value per label"
        );
        let total: f64 = spec.values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
        ensure!(total > 0.0, "pie chart has no positive values");

        let radius = self.height / 2.0 - 16.0;
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        let mut start = -PI / 2.0;
        let mut slices = Vec::with_capacity(spec.values.len());
        for (index, value) in spec.values.iter().enumerate() {
            if !value.is_finite() || *value <= 0.0 {
                continue;
            }
            let sweep = value / total * 2.0 * PI;
            slices.push((index, start, sweep));
            start += sweep;
        }

        let markup = html! {
            svg.chart.pie-chart xmlns="http://www.w3.org/2000/svg" viewBox={ "0 0 " (self.width) " " (self.height) }
                role="img" aria-label=(spec.dataset_label) {
                @for (index, start, sweep) in &slices {
                    @let color = spec.colors.get(*index).copied().unwrap_or("#999");
                    @if *sweep >= 2.0 * PI - f64::EPSILON {
                        circle cx=(px(cx)) cy=(px(cy)) r=(px(radius)) fill=(color) stroke="#fff" {
                            title { (spec.labels[*index]) }
                        }
                    } @else {
                        path d=(arc_path(cx, cy, radius, *start, *sweep)) fill=(color) stroke="#fff" stroke-width="1" {
                            title { (spec.labels[*index]) }
                        }
                    }
                }
            }
        };

        let colors = spec.colors.iter().map(|c| c.to_string()).collect();
        Ok(rendered(ChartKind::Pie, &spec.dataset_label, &spec.labels, colors, markup))
    }
}

fn rendered(kind: ChartKind, dataset_label: &str, labels: &[String], colors: Vec<String>, markup: Markup) -> ChartHandle {
    Arc::new(RenderedChart {
        kind,
        dataset_label: dataset_label.to_string(),
        labels: labels.to_vec(),
        colors,
        markup: markup.into_string(),
    })
}

/// Zero-based value axis rounded out to a readable step.
fn value_axis(values: &[f64]) -> (f64, f64, f64) {
    let low = values.iter().copied().fold(0.0_f64, f64::min);
    let high = values.iter().copied().fold(0.0_f64, f64::max);
    let step = nice_step((high - low) / TICK_COUNT);
    let y_min = (low / step).floor() * step;
    let mut y_max = (high / step).ceil() * step;
    if y_max <= y_min {
        y_max = y_min + step;
    }
    (y_min, y_max, step)
}

fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

fn arc_path(cx: f64, cy: f64, radius: f64, start: f64, sweep: f64) -> String {
    let end = start + sweep;
    let large_arc = if sweep > PI { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        px(cx),
        px(cy),
        px(cx + radius * start.cos()),
        px(cy + radius * start.sin()),
        px(radius),
        px(radius),
        large_arc,
        px(cx + radius * end.cos()),
        px(cy + radius * end.sin()),
    )
}

fn px(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{slice_color, BAR_FILL, BAR_STROKE, PIE_PALETTE};

    fn bar_spec(values: Vec<f64>) -> BarChartSpec {
        BarChartSpec {
            labels: (1..=values.len()).map(|m| format!("2024-{:02}", m)).collect(),
            values,
            dataset_label: "cost".to_string(),
            fill: BAR_FILL,
            stroke: BAR_STROKE,
        }
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(180.0), 200.0);
        assert_eq!(nice_step(2100.0), 2500.0);
        assert_eq!(nice_step(7.0), 10.0);
    }

    #[test]
    fn test_value_axis_begins_at_zero() {
        let (y_min, y_max, step) = value_axis(&[1200.0, 850.0]);
        assert_eq!(y_min, 0.0);
        assert_eq!(step, 250.0);
        assert_eq!(y_max, 1250.0);
    }

    #[test]
    fn test_bar_chart_markup() {
        let chart = SvgChartFactory::default().bar(&bar_spec(vec![1200.0, 850.5])).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.markup.matches("<rect").count(), 2);
        assert!(chart.markup.contains("฿1,250"));
        assert!(chart.markup.contains("฿0"));
        assert!(chart.markup.contains("2024-02"));
        assert_eq!(chart.colors, vec![BAR_FILL.to_string()]);
    }

    #[test]
    fn test_bar_chart_rejects_mismatched_lengths() {
        let mut spec = bar_spec(vec![1.0, 2.0]);
        spec.labels.pop();
        assert!(SvgChartFactory::default().bar(&spec).is_err());
    }

    #[test]
    fn test_pie_chart_slices() {
        let labels: Vec<String> = (0..7).map(|i| format!("job-{}", i)).collect();
        let spec = PieChartSpec {
            labels: labels.clone(),
            values: vec![1.0; 7],
            dataset_label: "jobs".to_string(),
            colors: (0..7).map(slice_color).collect(),
        };
        let chart = SvgChartFactory::default().pie(&spec).unwrap();

        assert_eq!(chart.markup.matches("<path").count(), 7);
        assert_eq!(chart.colors[6], PIE_PALETTE[0]);
        assert_eq!(chart.labels, labels);
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let spec = PieChartSpec {
            labels: vec!["repair".to_string()],
            values: vec![4.0],
            dataset_label: "jobs".to_string(),
            colors: vec![slice_color(0)],
        };
        let chart = SvgChartFactory::default().pie(&spec).unwrap();
        assert!(chart.markup.contains("<circle"));
        assert!(!chart.markup.contains("<path"));
    }

    #[test]
    fn test_pie_without_positive_values_fails() {
        let spec = PieChartSpec {
            labels: vec!["a".to_string()],
            values: vec![0.0],
            dataset_label: "jobs".to_string(),
            colors: vec![slice_color(0)],
        };
        assert!(SvgChartFactory::default().pie(&spec).is_err());
    }
}

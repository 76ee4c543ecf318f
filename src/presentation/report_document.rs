// Report page: two chart cards with canvas/placeholder toggles and a legend
use crate::application::chart_renderer::{ChartHandle, ChartSlot, ChartSurface, ChartsReady};
use crate::domain::chart::ChartKind;
use crate::domain::locale;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct ReportState {
    charts: HashMap<ChartSlot, ChartHandle>,
    canvases: HashSet<ChartSlot>,
    placeholders: HashSet<ChartSlot>,
}

#[derive(Default)]
pub struct ReportDocument {
    state: Mutex<ReportState>,
}

impl ReportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn canvas_visible(&self, slot: ChartSlot) -> bool {
        self.lock().canvases.contains(&slot)
    }

    #[cfg(test)]
    pub fn placeholder_visible(&self, slot: ChartSlot) -> bool {
        self.lock().placeholders.contains(&slot)
    }

    /// Renders the page; the legend is only drawn once charts were announced ready.
    pub fn render(&self, ready: Option<&ChartsReady>) -> Markup {
        html! {
            (DOCTYPE)
            html lang="th" {
                head {
                    meta charset="UTF-8";
                    title { "รายงานการซ่อมบำรุง" }
                    style { (PreEscaped(CSS)) }
                }
                body {
                    div.container-fluid {
                        h2 { "รายงานการซ่อมบำรุง" }
                        div.row {
                            (self.chart_card(ChartSlot::CostOverTime, "costChart", "ค่าใช้จ่ายรายเดือน"))
                            (self.chart_card(ChartSlot::JobTypes, "jobTypeChart", "ประเภทงาน"))
                        }
                        @if let Some(ready) = ready {
                            (legend(ready))
                        }
                    }
                }
            }
        }
    }

    fn chart_card(&self, slot: ChartSlot, canvas_id: &str, heading: &str) -> Markup {
        let state = self.lock();
        let chart = state.charts.get(&slot);
        let canvas_shown = state.canvases.contains(&slot);
        let placeholder_shown = state.placeholders.contains(&slot);

        html! {
            div.col-md-6 {
                div.card {
                    div.card-body {
                        h5.card-title { (heading) }
                        div.chart-canvas.hidden[!canvas_shown] id=(canvas_id) {
                            @if let Some(chart) = chart {
                                (PreEscaped(&chart.markup))
                            }
                        }
                        p.text-muted.text-center.hidden[!placeholder_shown] id={ (canvas_id) "Placeholder" } {
                            (locale::NO_CHART_DATA)
                        }
                    }
                }
            }
        }
    }
}

impl ChartSurface for ReportDocument {
    fn mount(&self, slot: ChartSlot, chart: ChartHandle) {
        self.lock().charts.insert(slot, chart);
    }

    fn set_canvas_visible(&self, slot: ChartSlot, visible: bool) {
        let mut state = self.lock();
        if visible {
            state.canvases.insert(slot);
        } else {
            state.canvases.remove(&slot);
        }
    }

    fn set_placeholder_visible(&self, slot: ChartSlot, visible: bool) {
        let mut state = self.lock();
        if visible {
            state.placeholders.insert(slot);
        } else {
            state.placeholders.remove(&slot);
        }
    }
}

fn legend(ready: &ChartsReady) -> Markup {
    let charts = [ready.cost.as_ref(), ready.job_types.as_ref()];
    html! {
        div.chart-legend id="chart-legend" {
            @for chart in charts.into_iter().flatten() {
                div.legend-group {
                    @match chart.kind {
                        ChartKind::Bar => {
                            (swatch(chart.colors.first().map(String::as_str), &chart.dataset_label))
                        }
                        ChartKind::Pie => {
                            strong { (chart.dataset_label) }
                            ul {
                                @for (label, color) in chart.labels.iter().zip(&chart.colors) {
                                    li { (swatch(Some(color.as_str()), label)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn swatch(color: Option<&str>, label: &str) -> Markup {
    html! {
        span.swatch style={ "background-color: " (color.unwrap_or("#999")) } {}
        " " (label)
    }
}

const CSS: &str = r#"
.hidden { display: none; }
.chart-canvas svg { width: 100%; height: auto; }
.chart-legend ul { list-style: none; padding-left: 0; display: flex; flex-wrap: wrap; gap: 0.75rem; }
.swatch { display: inline-block; width: 12px; height: 12px; border-radius: 2px; }
"#;

// Chart renderer - builds the report charts once from page-embedded JSON
use crate::domain::chart::{slice_color, ChartDataset, ChartKind, BAR_FILL, BAR_STROKE};
use crate::domain::locale;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Parses embedded JSON, yielding the empty value instead of failing.
///
/// Empty text and a lone `[` (what a template emits for a missing list) are
/// treated as "no data" without a warning.
pub fn safe_parse<T: DeserializeOwned + Default>(raw: &str) -> T {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "[" {
        return T::default();
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "embedded chart data is not valid JSON, rendering empty chart");
            T::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    CostOverTime,
    JobTypes,
}

#[derive(Debug, Clone)]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub dataset_label: String,
    pub fill: &'static str,
    pub stroke: &'static str,
}

#[derive(Debug, Clone)]
pub struct PieChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub dataset_label: String,
    pub colors: Vec<&'static str>,
}

/// A constructed chart as handed back by the factory.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
    pub markup: String,
}

pub type ChartHandle = Arc<RenderedChart>;

pub trait ChartFactory: Send + Sync {
    fn bar(&self, spec: &BarChartSpec) -> anyhow::Result<ChartHandle>;

    fn pie(&self, spec: &PieChartSpec) -> anyhow::Result<ChartHandle>;
}

/// Canvas and placeholder elements of the report page.
pub trait ChartSurface: Send + Sync {
    fn mount(&self, slot: ChartSlot, chart: ChartHandle);

    fn set_canvas_visible(&self, slot: ChartSlot, visible: bool);

    fn set_placeholder_visible(&self, slot: ChartSlot, visible: bool);
}

/// Published once at least one chart exists.
#[derive(Debug, Clone, Default)]
pub struct ChartsReady {
    pub cost: Option<ChartHandle>,
    pub job_types: Option<ChartHandle>,
}

pub struct ChartRenderer {
    factory: Arc<dyn ChartFactory>,
    surface: Arc<dyn ChartSurface>,
    ready: watch::Sender<Option<Arc<ChartsReady>>>,
}

impl ChartRenderer {
    pub fn new(factory: Arc<dyn ChartFactory>, surface: Arc<dyn ChartSurface>) -> Self {
        let (ready, _) = watch::channel(None);
        Self { factory, surface, ready }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ChartsReady>>> {
        self.ready.subscribe()
    }

    /// Runs once per page load; consumes the renderer.
    pub fn render(self, cost_raw: &str, job_types_raw: &str) -> Option<Arc<ChartsReady>> {
        let cost = self.render_bar(&safe_parse(cost_raw));
        let job_types = self.render_pie(&safe_parse(job_types_raw));

        if cost.is_none() && job_types.is_none() {
            return None;
        }

        info!(
            cost = cost.is_some(),
            job_types = job_types.is_some(),
            "report charts ready"
        );
        let ready = Arc::new(ChartsReady { cost, job_types });
        self.ready.send_replace(Some(Arc::clone(&ready)));
        Some(ready)
    }

    fn render_bar(&self, data: &ChartDataset) -> Option<ChartHandle> {
        let slot = ChartSlot::CostOverTime;
        if !data.is_renderable() {
            self.show_empty(slot);
            return None;
        }

        let spec = BarChartSpec {
            labels: data.labels.clone(),
            values: data.values.clone(),
            dataset_label: locale::COST_DATASET_LABEL.to_string(),
            fill: BAR_FILL,
            stroke: BAR_STROKE,
        };
        self.mount_or_empty(slot, self.factory.bar(&spec))
    }

    fn render_pie(&self, data: &ChartDataset) -> Option<ChartHandle> {
        let slot = ChartSlot::JobTypes;
        if !data.is_renderable() {
            self.show_empty(slot);
            return None;
        }

        let spec = PieChartSpec {
            labels: data.labels.clone(),
            values: data.values.clone(),
            dataset_label: locale::JOB_TYPE_DATASET_LABEL.to_string(),
            colors: (0..data.values.len()).map(slice_color).collect(),
        };
        self.mount_or_empty(slot, self.factory.pie(&spec))
    }

    fn mount_or_empty(&self, slot: ChartSlot, built: anyhow::Result<ChartHandle>) -> Option<ChartHandle> {
        match built {
            Ok(chart) => {
                self.surface.mount(slot, Arc::clone(&chart));
                self.surface.set_canvas_visible(slot, true);
                self.surface.set_placeholder_visible(slot, false);
                Some(chart)
            }
            Err(err) => {
                warn!(?slot, "could not build chart: {:#}", err);
                self.show_empty(slot);
                None
            }
        }
    }

    fn show_empty(&self, slot: ChartSlot) {
        self.surface.set_canvas_visible(slot, false);
        self.surface.set_placeholder_visible(slot, true);
    }
}

// Extraction of JSON blobs embedded in server-rendered pages
use regex::Regex;
use tracing::debug;

pub const COST_CHART_DATA_ID: &str = "costChartData";
pub const JOB_TYPE_CHART_DATA_ID: &str = "jobTypeChartData";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedChartData {
    pub cost: String,
    pub job_types: String,
}

/// Both chart blobs; a missing script element yields empty text.
pub fn extract_chart_data(html: &str) -> EmbeddedChartData {
    EmbeddedChartData {
        cost: script_text(html, COST_CHART_DATA_ID).unwrap_or_default(),
        job_types: script_text(html, JOB_TYPE_CHART_DATA_ID).unwrap_or_default(),
    }
}

/// Text content of the `<script>` element carrying the given id.
pub fn script_text(html: &str, id: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)<script\b[^>]*\bid\s*=\s*["']{}["'][^>]*>(.*?)</script>"#,
        regex::escape(id)
    );
    let re = Regex::new(&pattern).ok()?;
    let text = re.captures(html)?.get(1)?.as_str().trim().to_string();
    debug!(id, bytes = text.len(), "found embedded script data");
    Some(text)
}

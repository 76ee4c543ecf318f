// Backend API trait consumed by the detail page controller
use crate::domain::asset::{Asset, AssetId, DetailPoint, DetailPointForm, DetailPointId, MaintenanceEntry, NewMaintenance};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Response of the asset fetch: the record plus the caller's role and PM flag.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEnvelope {
    pub asset: Asset,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub is_pm_due: bool,
}

#[derive(Debug, Deserialize)]
pub struct DetailPointsEnvelope {
    #[serde(default)]
    pub detail_points: Vec<DetailPoint>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEnvelope {
    #[serde(default)]
    pub history: Vec<MaintenanceEntry>,
}

/// Body of successful mutations and, with `error`, of failed ones.
#[derive(Debug, Default, Deserialize)]
pub struct MessageEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Application { status: u16, message: Option<String> },

    /// A success response whose body did not have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the error banner: the server message when it sent one, else the fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application { message: Some(message), .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

#[async_trait]
pub trait MaintenanceApi: Send + Sync {
    async fn fetch_asset(&self, asset_id: AssetId) -> Result<AssetEnvelope, ApiError>;

    async fn fetch_detail_points(&self, asset_id: AssetId) -> Result<Vec<DetailPoint>, ApiError>;

    async fn fetch_maintenance_history(&self, asset_id: AssetId) -> Result<Vec<MaintenanceEntry>, ApiError>;

    /// Multipart post of the form with `asset_id` appended. Returns the server message.
    async fn add_detail_point(&self, asset_id: AssetId, form: &DetailPointForm) -> Result<Option<String>, ApiError>;

    async fn add_maintenance(&self, entry: &NewMaintenance) -> Result<Option<String>, ApiError>;

    async fn delete_detail_point(&self, point_id: DetailPointId) -> Result<Option<String>, ApiError>;

    /// Server-rendered report page carrying the embedded chart data.
    async fn fetch_report_page(&self) -> Result<String, ApiError>;
}

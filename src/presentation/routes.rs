// Link builder for backend pages and page host actions
use crate::domain::asset::{AssetId, DetailPointId};

#[derive(Debug, Clone, Default)]
pub struct Routes {
    backend: String,
}

impl Routes {
    /// `public_url` prefixes links to backend-rendered pages; empty means same origin.
    pub fn new(public_url: &str) -> Self {
        Self {
            backend: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn upload(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.backend, urlencoding::encode(filename))
    }

    pub fn edit_asset(&self, asset_id: AssetId) -> String {
        format!("{}/edit_asset/{}", self.backend, asset_id)
    }

    pub fn perform_pm(&self, asset_id: AssetId) -> String {
        format!("{}/perform_pm/{}", self.backend, asset_id)
    }

    pub fn export_history(&self, asset_id: AssetId) -> String {
        format!("{}/export_asset_history/{}", self.backend, asset_id)
    }

    pub fn edit_detail_point_page(&self, point_id: DetailPointId) -> String {
        format!("{}/edit_detail_point/{}", self.backend, point_id)
    }

    pub fn asset_page(&self, asset_id: AssetId) -> String {
        format!("/asset/{}", asset_id)
    }

    pub fn add_detail_point_action(&self, asset_id: AssetId) -> String {
        format!("/asset/{}/detail-points", asset_id)
    }

    pub fn add_maintenance_action(&self, asset_id: AssetId) -> String {
        format!("/asset/{}/maintenance", asset_id)
    }

    pub fn delete_detail_point_action(&self, asset_id: AssetId, point_id: DetailPointId) -> String {
        format!("/asset/{}/detail-points/{}/delete", asset_id, point_id)
    }

    pub fn edit_detail_point_action(&self, asset_id: AssetId, point_id: DetailPointId) -> String {
        format!("/asset/{}/detail-points/{}/edit", asset_id, point_id)
    }
}

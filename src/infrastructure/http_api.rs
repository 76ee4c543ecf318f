// Backend API client over reqwest
use crate::application::maintenance_api::{
    ApiError, AssetEnvelope, DetailPointsEnvelope, HistoryEnvelope, MaintenanceApi, MessageEnvelope,
};
use crate::domain::asset::{AssetId, DetailPoint, DetailPointForm, DetailPointId, MaintenanceEntry, NewMaintenance};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpMaintenanceApi {
    base_url: String,
    client: Client,
}

impl HttpMaintenanceApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies may carry {"error": "..."}; anything else is ignored.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error);
        Err(ApiError::Application {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "fetching");
        let response = self.send(self.client.get(&url).header(ACCEPT, "application/json")).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn message_of(response: Response) -> Result<Option<String>, ApiError> {
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: MessageEnvelope = serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.message)
    }
}

#[async_trait]
impl MaintenanceApi for HttpMaintenanceApi {
    async fn fetch_asset(&self, asset_id: AssetId) -> Result<AssetEnvelope, ApiError> {
        self.get_json(&format!("/api/asset/{}", asset_id)).await
    }

    async fn fetch_detail_points(&self, asset_id: AssetId) -> Result<Vec<DetailPoint>, ApiError> {
        let envelope: DetailPointsEnvelope = self.get_json(&format!("/api/asset/{}/detail-points", asset_id)).await?;
        Ok(envelope.detail_points)
    }

    async fn fetch_maintenance_history(&self, asset_id: AssetId) -> Result<Vec<MaintenanceEntry>, ApiError> {
        let envelope: HistoryEnvelope = self
            .get_json(&format!("/api/asset/{}/maintenance-history", asset_id))
            .await?;
        Ok(envelope.history)
    }

    async fn add_detail_point(&self, asset_id: AssetId, form: &DetailPointForm) -> Result<Option<String>, ApiError> {
        let mut multipart = Form::new()
            .text("title", form.title.clone())
            .text("description", form.description.clone())
            .text("location_detail", form.location_detail.clone());

        if let Some(image) = &form.image {
            let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            if let Some(content_type) = &image.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
            }
            multipart = multipart.part("point_image", part);
        }
        let multipart = multipart.text("asset_id", asset_id.to_string());

        let request = self
            .client
            .post(self.url("/api/detail-point"))
            .header(ACCEPT, "application/json")
            .multipart(multipart);
        Self::message_of(self.send(request).await?).await
    }

    async fn add_maintenance(&self, entry: &NewMaintenance) -> Result<Option<String>, ApiError> {
        let request = self
            .client
            .post(self.url("/api/maintenance"))
            .header(ACCEPT, "application/json")
            .json(entry);
        Self::message_of(self.send(request).await?).await
    }

    async fn delete_detail_point(&self, point_id: DetailPointId) -> Result<Option<String>, ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/detail-point/{}", point_id)))
            .header(ACCEPT, "application/json");
        Self::message_of(self.send(request).await?).await
    }

    async fn fetch_report_page(&self) -> Result<String, ApiError> {
        let response = self.send(self.client.get(self.url("/reports"))).await?;
        response.text().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::ImageUpload;
    use axum::extract::{Multipart, Path};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetches_decode_envelopes() {
        let router = Router::new()
            .route(
                "/api/asset/:id",
                get(|Path(id): Path<i64>| async move {
                    Json(json!({
                        "asset": {"id": id, "name": "Pump", "location": "P1"},
                        "user_role": "admin",
                        "is_pm_due": true
                    }))
                }),
            )
            .route(
                "/api/asset/:id/maintenance-history",
                get(|| async {
                    Json(json!({"history": [{"date": "2024-06-01 09:00:00", "description": "Oil", "cost": 12.5}]}))
                }),
            );
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);

        let envelope = api.fetch_asset(7).await.unwrap();
        assert_eq!(envelope.asset.id, 7);
        assert_eq!(envelope.user_role.as_deref(), Some("admin"));
        assert!(envelope.is_pm_due);

        let history = api.fetch_maintenance_history(7).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].cost, Some(12.5));
    }

    #[tokio::test]
    async fn test_error_body_message_is_kept() {
        let router = Router::new().route(
            "/api/asset/:id/detail-points",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "ไม่พบเครื่องจักร"}))) }),
        );
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);

        match api.fetch_detail_points(9).await {
            Err(ApiError::Application { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("ไม่พบเครื่องจักร"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let router = Router::new().route(
            "/api/detail-point/:id",
            delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);

        let err = api.delete_detail_point(4).await.unwrap_err();
        assert!(matches!(err, ApiError::Application { status: 500, message: None }));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let api = HttpMaintenanceApi::new("http://127.0.0.1:1".to_string());
        assert!(api.fetch_asset(1).await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_add_maintenance_sends_null_cost() {
        let received = Arc::new(Mutex::new(Value::Null));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/maintenance",
            post(move |Json(body): Json<Value>| async move {
                *sink.lock().unwrap() = body;
                (StatusCode::CREATED, Json(json!({"message": "saved"})))
            }),
        );
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);

        let message = api
            .add_maintenance(&NewMaintenance {
                asset_id: 5,
                description: "Replaced belt".to_string(),
                cost: None,
            })
            .await
            .unwrap();

        assert_eq!(message.as_deref(), Some("saved"));
        assert_eq!(
            *received.lock().unwrap(),
            json!({"asset_id": 5, "description": "Replaced belt", "cost": null})
        );
    }

    #[tokio::test]
    async fn test_add_detail_point_multipart_fields() {
        let received = Arc::new(Mutex::new(Vec::<(String, String)>::new()));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/detail-point",
            post(move |mut multipart: Multipart| async move {
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let value = match field.file_name() {
                        Some(file_name) => file_name.to_string(),
                        None => field.text().await.unwrap(),
                    };
                    sink.lock().unwrap().push((name, value));
                }
                Json(json!({"message": "added"}))
            }),
        );
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);

        let form = DetailPointForm {
            title: "Bearing".to_string(),
            description: "Left".to_string(),
            location_detail: String::new(),
            image: Some(ImageUpload {
                file_name: "bearing.png".to_string(),
                content_type: Some("image/png".to_string()),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        };
        let message = api.add_detail_point(12, &form).await.unwrap();

        assert_eq!(message.as_deref(), Some("added"));
        let fields = received.lock().unwrap().clone();
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["title", "description", "location_detail", "point_image", "asset_id"]);
        assert!(fields.contains(&("point_image".to_string(), "bearing.png".to_string())));
        assert!(fields.contains(&("asset_id".to_string(), "12".to_string())));
    }

    #[tokio::test]
    async fn test_report_page_is_raw_html() {
        let router = Router::new().route("/reports", get(|| async { "<html>report</html>" }));
        let api = HttpMaintenanceApi::new(spawn_backend(router).await);
        assert_eq!(api.fetch_report_page().await.unwrap(), "<html>report</html>");
    }
}

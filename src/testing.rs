// In-memory backend used by controller and handler tests
use crate::application::maintenance_api::{ApiError, AssetEnvelope, MaintenanceApi};
use crate::domain::asset::{AssetId, DetailPoint, DetailPointForm, DetailPointId, MaintenanceEntry, NewMaintenance};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    FetchAsset(AssetId),
    FetchDetailPoints(AssetId),
    FetchHistory(AssetId),
    AddDetailPoint(AssetId, String),
    AddMaintenance(NewMaintenance),
    DeletePoint(DetailPointId),
    FetchReportPage,
}

#[derive(Debug, Clone)]
enum Failure {
    Status(u16, Option<String>),
    Transport,
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::Status(status, message) => ApiError::Application {
                status: *status,
                message: message.clone(),
            },
            Failure::Transport => ApiError::Transport("connection refused".to_string()),
        }
    }
}

struct State {
    asset: Value,
    role: Option<String>,
    is_pm_due: bool,
    points: Vec<DetailPoint>,
    history: Vec<MaintenanceEntry>,
    next_point_id: DetailPointId,
    fail_asset: Option<Failure>,
    fail_points: Option<Failure>,
    fail_history: Option<Failure>,
    fail_mutations: Option<Failure>,
    report_page: String,
    requests: Vec<Request>,
}

pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn with_asset(asset: Value, role: impl Into<Option<&'static str>>, is_pm_due: bool) -> Self {
        Self {
            state: Mutex::new(State {
                asset,
                role: role.into().map(str::to_string),
                is_pm_due,
                points: Vec::new(),
                history: Vec::new(),
                next_point_id: 100,
                fail_asset: None,
                fail_points: None,
                fail_history: None,
                fail_mutations: None,
                report_page: String::new(),
                requests: Vec::new(),
            }),
        }
    }

    pub fn seed_points(&self, points: &[(DetailPointId, &str)]) {
        let mut state = self.state.lock().unwrap();
        state.points = points
            .iter()
            .map(|(id, title)| DetailPoint {
                id: *id,
                title: title.to_string(),
                description: None,
                location_detail: None,
                image_filename: None,
                created_at: "2024-07-01 12:00:00".to_string(),
            })
            .collect();
    }

    pub fn set_report_page(&self, html: &str) {
        self.state.lock().unwrap().report_page = html.to_string();
    }

    pub fn fail_asset(&self, status: u16) {
        self.state.lock().unwrap().fail_asset = Some(Failure::Status(status, None));
    }

    pub fn fail_detail_points(&self, status: u16, message: Option<&str>) {
        self.state.lock().unwrap().fail_points = Some(Failure::Status(status, message.map(str::to_string)));
    }

    pub fn fail_history(&self, status: u16, message: Option<&str>) {
        self.state.lock().unwrap().fail_history = Some(Failure::Status(status, message.map(str::to_string)));
    }

    pub fn fail_mutations(&self, status: u16, message: Option<&str>) {
        self.state.lock().unwrap().fail_mutations = Some(Failure::Status(status, message.map(str::to_string)));
    }

    pub fn fail_mutations_with_transport(&self) {
        self.state.lock().unwrap().fail_mutations = Some(Failure::Transport);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn reset_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    fn record(&self, request: Request) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state
    }
}

#[async_trait]
impl MaintenanceApi for FakeApi {
    async fn fetch_asset(&self, asset_id: AssetId) -> Result<AssetEnvelope, ApiError> {
        let state = self.record(Request::FetchAsset(asset_id));
        if let Some(failure) = &state.fail_asset {
            return Err(failure.to_error());
        }
        let asset = serde_json::from_value(state.asset.clone()).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(AssetEnvelope {
            asset,
            user_role: state.role.clone(),
            is_pm_due: state.is_pm_due,
        })
    }

    async fn fetch_detail_points(&self, asset_id: AssetId) -> Result<Vec<DetailPoint>, ApiError> {
        let state = self.record(Request::FetchDetailPoints(asset_id));
        match &state.fail_points {
            Some(failure) => Err(failure.to_error()),
            None => Ok(state.points.clone()),
        }
    }

    async fn fetch_maintenance_history(&self, asset_id: AssetId) -> Result<Vec<MaintenanceEntry>, ApiError> {
        let state = self.record(Request::FetchHistory(asset_id));
        match &state.fail_history {
            Some(failure) => Err(failure.to_error()),
            None => Ok(state.history.clone()),
        }
    }

    async fn add_detail_point(&self, asset_id: AssetId, form: &DetailPointForm) -> Result<Option<String>, ApiError> {
        let mut state = self.record(Request::AddDetailPoint(asset_id, form.title.clone()));
        if let Some(failure) = &state.fail_mutations {
            return Err(failure.to_error());
        }
        let id = state.next_point_id;
        state.next_point_id += 1;
        state.points.push(DetailPoint {
            id,
            title: form.title.clone(),
            description: Some(form.description.clone()),
            location_detail: Some(form.location_detail.clone()),
            image_filename: form.image.as_ref().map(|image| image.file_name.clone()),
            created_at: "2024-07-02 08:30:00".to_string(),
        });
        Ok(Some("เพิ่มจุดรายละเอียดเรียบร้อยแล้ว".to_string()))
    }

    async fn add_maintenance(&self, entry: &NewMaintenance) -> Result<Option<String>, ApiError> {
        let mut state = self.record(Request::AddMaintenance(entry.clone()));
        if let Some(failure) = &state.fail_mutations {
            return Err(failure.to_error());
        }
        state.history.insert(
            0,
            MaintenanceEntry {
                date: "2024-07-02 08:30:00".to_string(),
                description: entry.description.clone(),
                cost: entry.cost,
            },
        );
        Ok(Some("เพิ่มประวัติการซ่อมบำรุงเรียบร้อยแล้ว".to_string()))
    }

    async fn delete_detail_point(&self, point_id: DetailPointId) -> Result<Option<String>, ApiError> {
        let mut state = self.record(Request::DeletePoint(point_id));
        if let Some(failure) = &state.fail_mutations {
            return Err(failure.to_error());
        }
        state.points.retain(|point| point.id != point_id);
        Ok(Some("ลบจุดรายละเอียดเรียบร้อยแล้ว".to_string()))
    }

    async fn fetch_report_page(&self) -> Result<String, ApiError> {
        let state = self.record(Request::FetchReportPage);
        Ok(state.report_page.clone())
    }
}

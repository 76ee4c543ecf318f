// HTTP request handlers
use crate::application::chart_renderer::ChartRenderer;
use crate::application::detail_controller::{ActionOutcome, DetailController, PageCapabilities};
use crate::application::page::{FormId, ModalId};
use crate::domain::asset::{AssetId, DetailPointForm, DetailPointId, ImageUpload, MaintenanceForm};
use crate::infrastructure::embedded::extract_chart_data;
use crate::presentation::app_state::AppState;
use crate::presentation::document::{DocumentModel, FormConfirmation};
use crate::presentation::errors::HostError;
use crate::presentation::report_document::ReportDocument;
use crate::presentation::templates::MaudTemplates;
use axum::{
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub confirmed: bool,
}

/// One page load: the controller and the document it renders into.
struct Page {
    controller: DetailController,
    document: Arc<DocumentModel>,
}

impl Page {
    fn new(state: &AppState, asset_id: AssetId, confirmed: bool) -> Self {
        let document = Arc::new(DocumentModel::new(asset_id, state.routes.clone(), state.banner_ttl));
        let caps = PageCapabilities {
            page: document.clone(),
            templates: Arc::new(MaudTemplates::new(state.routes.clone())),
            modals: document.clone(),
            confirmer: Arc::new(FormConfirmation(confirmed)),
            navigator: document.clone(),
        };
        // the page script dismisses banners once the response is out
        let controller = DetailController::new(asset_id, state.api.clone(), caps).with_banner_timer(None);
        Self { controller, document }
    }

    async fn load(state: &AppState, asset_id: AssetId, confirmed: bool) -> Self {
        let mut page = Self::new(state, asset_id, confirmed);
        // a failed load is already on the page as a banner
        let _ = page.controller.initialize().await;
        page
    }

    fn html(&self) -> Html<String> {
        Html(self.document.render().into_string())
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn asset_page(Path(asset_id): Path<AssetId>, State(state): State<Arc<AppState>>) -> Html<String> {
    Page::load(&state, asset_id, false).await.html()
}

pub async fn add_detail_point(
    Path(asset_id): Path<AssetId>,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, HostError> {
    let form = read_detail_point_form(multipart).await?;
    let page = Page::load(&state, asset_id, false).await;

    if page.controller.is_interactive() {
        page.document.open_modal(ModalId::AddDetailPoint);
        page.document.fill_form(
            FormId::AddDetailPoint,
            [
                ("title".to_string(), form.title.clone()),
                ("description".to_string(), form.description.clone()),
                ("location_detail".to_string(), form.location_detail.clone()),
            ],
        );
        page.controller
            .select_point_image(form.image.as_ref().map(|image| image.file_name.as_str()));
        let outcome = page.controller.handle_add_detail_point(&form).await;
        info!(asset_id, ?outcome, "add detail point submitted");
    }

    Ok(page.html())
}

pub async fn add_maintenance(
    Path(asset_id): Path<AssetId>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<MaintenanceForm>,
) -> Html<String> {
    let page = Page::load(&state, asset_id, false).await;

    if page.controller.is_interactive() {
        page.document.fill_form(
            FormId::AddMaintenance,
            [
                ("description".to_string(), form.description.clone()),
                ("cost".to_string(), form.cost.clone()),
            ],
        );
        let outcome = page.controller.handle_add_maintenance(&form).await;
        info!(asset_id, ?outcome, "add maintenance submitted");
    }

    page.html()
}

pub async fn delete_detail_point(
    Path((asset_id, point_id)): Path<(AssetId, DetailPointId)>,
    State(state): State<Arc<AppState>>,
    Form(confirmation): Form<DeleteConfirmation>,
) -> Html<String> {
    let page = Page::load(&state, asset_id, confirmation.confirmed).await;

    if page.controller.is_interactive() {
        let outcome = page.controller.delete_detail_point(point_id).await;
        if outcome == ActionOutcome::Declined {
            page.document.ask_delete_confirmation(point_id);
        }
        info!(asset_id, point_id, ?outcome, "delete detail point submitted");
    }

    page.html()
}

pub async fn edit_detail_point(
    Path((asset_id, point_id)): Path<(AssetId, DetailPointId)>,
    State(state): State<Arc<AppState>>,
) -> Redirect {
    let page = Page::new(&state, asset_id, false);
    page.controller.edit_detail_point(point_id);

    let target = page
        .document
        .snapshot()
        .navigated_to
        .unwrap_or_else(|| state.routes.asset_page(asset_id));
    debug!(asset_id, point_id, %target, "redirecting to detail point editor");
    Redirect::to(&target)
}

pub async fn reports_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, HostError> {
    let source = state.api.fetch_report_page().await?;
    let embedded = extract_chart_data(&source);

    let document = Arc::new(ReportDocument::new());
    let renderer = ChartRenderer::new(state.chart_factory.clone(), document.clone());
    let mut ready = renderer.subscribe();
    renderer.render(&embedded.cost, &embedded.job_types);

    let charts = ready.borrow_and_update().clone();
    Ok(Html(document.render(charts.as_deref()).into_string()))
}

async fn read_detail_point_form(mut multipart: Multipart) -> Result<DetailPointForm, HostError> {
    let mut form = DetailPointForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await?,
            "description" => form.description = field.text().await?,
            "location_detail" => form.location_detail = field.text().await?,
            "point_image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // browsers send an empty part when no file was picked
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

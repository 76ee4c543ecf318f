// Detail page controller - fetch, render, submit, re-fetch
use crate::application::maintenance_api::{ApiError, MaintenanceApi};
use crate::application::page::{
    Banner, BannerId, BannerKind, Confirmer, Element, FormId, ModalController, ModalId, Navigator, PageSurface,
    PageTemplates, Region,
};
use crate::domain::asset::{
    Asset, AssetId, DetailPoint, DetailPointForm, DetailPointId, MaintenanceEntry, MaintenanceForm, NewMaintenance,
    UserRole,
};
use crate::domain::locale;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const DEFAULT_BANNER_TTL: Duration = Duration::from_secs(5);

/// Capabilities of the hosting page, injected by the composition root.
#[derive(Clone)]
pub struct PageCapabilities {
    pub page: Arc<dyn PageSurface>,
    pub templates: Arc<dyn PageTemplates>,
    pub modals: Arc<dyn ModalController>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed,
    /// The user declined the confirmation prompt; nothing was sent.
    Declined,
}

/// Failure of an action: the mutation itself, or the reload after it went through.
enum ActionError {
    Mutation(ApiError),
    Reload(ApiError),
}

pub struct DetailController {
    asset_id: AssetId,
    api: Arc<dyn MaintenanceApi>,
    caps: PageCapabilities,
    banner_timer: Option<Duration>,
    user_role: Option<UserRole>,
    interactive: bool,
}

impl DetailController {
    pub fn new(asset_id: AssetId, api: Arc<dyn MaintenanceApi>, caps: PageCapabilities) -> Self {
        Self {
            asset_id,
            api,
            caps,
            banner_timer: Some(DEFAULT_BANNER_TTL),
            user_role: None,
            interactive: false,
        }
    }

    /// Lifetime of the dismiss timer started with each banner; `None` leaves dismissal to the page.
    pub fn with_banner_timer(mut self, ttl: Option<Duration>) -> Self {
        self.banner_timer = ttl;
        self
    }

    /// True once every initial fetch succeeded and the forms are wired up.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn is_admin(&self) -> bool {
        self.user_role.as_ref().is_some_and(UserRole::is_admin)
    }

    /// Fetches asset, detail points and history one after another.
    /// The first failure stops the sequence; regions rendered before it stay.
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        if let Err(err) = self.load_all().await {
            error!(asset_id = self.asset_id, transport = err.is_transport(), "failed to initialize asset detail page: {}", err);
            self.show_error(locale::LOAD_ERROR);
            return Err(err);
        }

        self.interactive = true;
        Ok(())
    }

    async fn load_all(&mut self) -> Result<(), ApiError> {
        self.load_asset_data().await?;
        self.load_detail_points().await?;
        self.load_maintenance_history().await
    }

    pub async fn load_asset_data(&mut self) -> Result<(), ApiError> {
        let envelope = self.api.fetch_asset(self.asset_id).await?;
        self.user_role = envelope.user_role.map(UserRole::from);
        self.render_asset_info(&envelope.asset, envelope.is_pm_due);
        Ok(())
    }

    pub async fn load_detail_points(&self) -> Result<(), ApiError> {
        let points = self.api.fetch_detail_points(self.asset_id).await?;
        debug!(asset_id = self.asset_id, count = points.len(), "loaded detail points");
        self.render_detail_points(&points);
        Ok(())
    }

    pub async fn load_maintenance_history(&self) -> Result<(), ApiError> {
        let history = self.api.fetch_maintenance_history(self.asset_id).await?;
        debug!(asset_id = self.asset_id, count = history.len(), "loaded maintenance history");
        self.render_maintenance_history(&history);
        Ok(())
    }

    pub fn render_asset_info(&self, asset: &Asset, is_pm_due: bool) {
        let page = &self.caps.page;
        let templates = &self.caps.templates;
        page.set_title(&format!("{}{}", locale::TITLE_PREFIX, asset.name));

        if self.is_admin() {
            page.set_link(Element::EditAssetButton, &templates.edit_asset_link(asset.id));
            page.set_visible(Element::EditAssetButton, true);
        } else {
            page.set_visible(Element::EditAssetButton, false);
        }

        if is_pm_due {
            page.set_region(Region::PmDueAlert, templates.pm_due_alert(asset.id));
            page.set_visible(Element::PmDueAlert, true);
        } else {
            page.set_visible(Element::PmDueAlert, false);
        }

        page.set_region(Region::AssetImage, templates.asset_image(asset));
        page.set_region(Region::AssetDetails, templates.asset_details(asset));
        page.set_link(Element::ExportHistoryButton, &templates.export_history_link(asset.id));
    }

    pub fn render_detail_points(&self, points: &[DetailPoint]) {
        let markup = self.caps.templates.detail_points(points, self.asset_id, self.is_admin());
        self.caps.page.set_region(Region::DetailPoints, markup);
    }

    pub fn render_maintenance_history(&self, history: &[MaintenanceEntry]) {
        let markup = self.caps.templates.maintenance_history(history);
        self.caps.page.set_region(Region::MaintenanceHistory, markup);
    }

    /// Mirrors the file input into the "file chosen" label.
    pub fn select_point_image(&self, file_name: Option<&str>) {
        let text = file_name.filter(|name| !name.is_empty()).unwrap_or(locale::NO_FILE_CHOSEN);
        self.caps.page.set_text(Element::FileChosen, text);
    }

    pub async fn handle_add_detail_point(&self, form: &DetailPointForm) -> ActionOutcome {
        let result = async {
            let message = self
                .api
                .add_detail_point(self.asset_id, form)
                .await
                .map_err(ActionError::Mutation)?;
            self.show_success(message);
            self.caps.page.reset_form(FormId::AddDetailPoint);
            self.caps.page.set_text(Element::FileChosen, locale::NO_FILE_CHOSEN);
            self.caps.modals.hide(ModalId::AddDetailPoint);
            self.load_detail_points().await.map_err(ActionError::Reload)
        }
        .await;

        self.settle(result, "add detail point", locale::ADD_POINT_ERROR)
    }

    pub async fn handle_add_maintenance(&self, form: &MaintenanceForm) -> ActionOutcome {
        let entry = NewMaintenance::from_form(self.asset_id, form);
        let result = async {
            let message = self.api.add_maintenance(&entry).await.map_err(ActionError::Mutation)?;
            self.show_success(message);
            self.caps.page.reset_form(FormId::AddMaintenance);
            self.load_maintenance_history().await.map_err(ActionError::Reload)
        }
        .await;

        self.settle(result, "add maintenance", locale::ADD_MAINTENANCE_ERROR)
    }

    pub async fn delete_detail_point(&self, point_id: DetailPointId) -> ActionOutcome {
        if !self.caps.confirmer.confirm(locale::CONFIRM_DELETE_POINT) {
            debug!(point_id, "delete declined");
            return ActionOutcome::Declined;
        }

        let result = async {
            let message = self
                .api
                .delete_detail_point(point_id)
                .await
                .map_err(ActionError::Mutation)?;
            self.show_success(message);
            self.load_detail_points().await.map_err(ActionError::Reload)
        }
        .await;

        self.settle(result, "delete detail point", locale::DELETE_POINT_ERROR)
    }

    /// Editing happens on a server-rendered page.
    pub fn edit_detail_point(&self, point_id: DetailPointId) {
        self.caps
            .navigator
            .navigate(&self.caps.templates.edit_detail_point_link(point_id));
    }

    /// Server messages only reach the banner for a rejected mutation; a failed reload shows the fallback.
    fn settle(&self, result: Result<(), ActionError>, action: &str, fallback: &str) -> ActionOutcome {
        let message = match result {
            Ok(()) => return ActionOutcome::Succeeded,
            Err(ActionError::Mutation(err)) => {
                match &err {
                    ApiError::Application { status, .. } => {
                        warn!(asset_id = self.asset_id, status = *status, "{} rejected: {}", action, err)
                    }
                    _ => error!(asset_id = self.asset_id, "{} failed: {}", action, err),
                }
                err.user_message(fallback)
            }
            Err(ActionError::Reload(err)) => {
                error!(asset_id = self.asset_id, "{} went through but the reload failed: {}", action, err);
                fallback.to_string()
            }
        };

        self.show_error(&message);
        ActionOutcome::Failed
    }

    fn show_success(&self, message: Option<String>) {
        let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| locale::SAVED.to_string());
        self.show_banner(BannerKind::Success, message);
    }

    fn show_error(&self, message: &str) {
        self.show_banner(BannerKind::Danger, message.to_string());
    }

    /// Replaces the current banner and, with a timer configured, schedules its removal.
    pub fn show_banner(&self, kind: BannerKind, message: String) -> BannerId {
        let id = self.caps.page.show_banner(Banner { kind, message });

        if let Some(ttl) = self.banner_timer {
            let page = Arc::clone(&self.caps.page);
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                page.dismiss_banner(id);
            });
        }

        id
    }
}

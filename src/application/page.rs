// Page capabilities injected into the detail controller
use crate::domain::asset::{Asset, AssetId, DetailPoint, DetailPointId, MaintenanceEntry};
use maud::Markup;

/// Regions of the detail page whose content is replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    AssetImage,
    AssetDetails,
    PmDueAlert,
    DetailPoints,
    MaintenanceHistory,
}

/// Elements that are toggled or re-pointed rather than re-rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    EditAssetButton,
    PmDueAlert,
    ExportHistoryButton,
    FileChosen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    AddDetailPoint,
    AddMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    AddDetailPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Danger,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

pub type BannerId = u64;

/// Mutable view of the page the controller renders into.
pub trait PageSurface: Send + Sync {
    fn set_title(&self, title: &str);

    fn set_region(&self, region: Region, content: Markup);

    fn set_visible(&self, element: Element, visible: bool);

    fn set_link(&self, element: Element, href: &str);

    fn set_text(&self, element: Element, text: &str);

    fn reset_form(&self, form: FormId);

    /// Replaces any banner on the page and returns the new banner's id.
    fn show_banner(&self, banner: Banner) -> BannerId;

    /// Removes the banner if it is still the one identified by `id`.
    fn dismiss_banner(&self, id: BannerId) -> bool;
}

pub trait ModalController: Send + Sync {
    fn hide(&self, modal: ModalId);
}

pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, href: &str);
}

/// Region markup and backend links, supplied by the presentation layer.
pub trait PageTemplates: Send + Sync {
    fn asset_image(&self, asset: &Asset) -> Markup;

    fn asset_details(&self, asset: &Asset) -> Markup;

    fn pm_due_alert(&self, asset_id: AssetId) -> Markup;

    fn detail_points(&self, points: &[DetailPoint], asset_id: AssetId, is_admin: bool) -> Markup;

    fn maintenance_history(&self, history: &[MaintenanceEntry]) -> Markup;

    fn edit_asset_link(&self, asset_id: AssetId) -> String;

    fn export_history_link(&self, asset_id: AssetId) -> String;

    fn edit_detail_point_link(&self, point_id: DetailPointId) -> String;
}

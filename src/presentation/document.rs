// In-memory asset detail page: region contents, toggles, forms, modal and banner state
use crate::application::page::{
    Banner, BannerId, Confirmer, Element, FormId, ModalController, ModalId, Navigator, PageSurface, Region,
};
use crate::domain::asset::{AssetId, DetailPointId};
use crate::domain::locale;
use crate::presentation::routes::Routes;
use crate::presentation::templates;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DocumentState {
    pub title: String,
    regions: HashMap<Region, String>,
    visible: HashSet<Element>,
    links: HashMap<Element, String>,
    texts: HashMap<Element, String>,
    forms: HashMap<FormId, HashMap<String, String>>,
    open_modals: HashSet<ModalId>,
    pub banner: Option<(Banner, BannerId)>,
    next_banner_id: BannerId,
    pub pending_delete: Option<DetailPointId>,
    pub navigated_to: Option<String>,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            title: String::new(),
            regions: HashMap::new(),
            // edit button and PM alert start hidden until the asset says otherwise
            visible: HashSet::from([Element::ExportHistoryButton, Element::FileChosen]),
            links: HashMap::new(),
            texts: HashMap::new(),
            forms: HashMap::new(),
            open_modals: HashSet::new(),
            banner: None,
            next_banner_id: 1,
            pending_delete: None,
            navigated_to: None,
        }
    }
}

impl DocumentState {
    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or_default()
    }

    pub fn visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    pub fn link(&self, element: Element) -> Option<&str> {
        self.links.get(&element).map(String::as_str)
    }

    pub fn text(&self, element: Element) -> &str {
        match self.texts.get(&element) {
            Some(text) => text,
            None if element == Element::FileChosen => locale::NO_FILE_CHOSEN,
            None => "",
        }
    }

    pub fn modal_open(&self, modal: ModalId) -> bool {
        self.open_modals.contains(&modal)
    }

    pub fn form_value(&self, form: FormId, field: &str) -> &str {
        self.forms
            .get(&form)
            .and_then(|values| values.get(field))
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn region_markup(&self, region: Region) -> PreEscaped<&str> {
        PreEscaped(self.region(region))
    }
}

/// Page model for one load of the asset detail page.
pub struct DocumentModel {
    asset_id: AssetId,
    routes: Routes,
    banner_ttl: Duration,
    state: Mutex<DocumentState>,
}

impl DocumentModel {
    pub fn new(asset_id: AssetId, routes: Routes, banner_ttl: Duration) -> Self {
        Self {
            asset_id,
            routes,
            banner_ttl,
            state: Mutex::new(DocumentState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> DocumentState {
        self.lock().clone()
    }

    /// Values the user typed, kept until the form is reset.
    pub fn fill_form(&self, form: FormId, values: impl IntoIterator<Item = (String, String)>) {
        self.lock().forms.insert(form, values.into_iter().collect());
    }

    pub fn open_modal(&self, modal: ModalId) {
        self.lock().open_modals.insert(modal);
    }

    /// Shows the in-page confirmation step for deleting `point_id`.
    pub fn ask_delete_confirmation(&self, point_id: DetailPointId) {
        self.lock().pending_delete = Some(point_id);
    }

    pub fn render(&self) -> Markup {
        let state = self.snapshot();
        render_page(&state, self.asset_id, &self.routes, self.banner_ttl)
    }
}

impl PageSurface for DocumentModel {
    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
    }

    fn set_region(&self, region: Region, content: Markup) {
        self.lock().regions.insert(region, content.into_string());
    }

    fn set_visible(&self, element: Element, visible: bool) {
        let mut state = self.lock();
        if visible {
            state.visible.insert(element);
        } else {
            state.visible.remove(&element);
        }
    }

    fn set_link(&self, element: Element, href: &str) {
        self.lock().links.insert(element, href.to_string());
    }

    fn set_text(&self, element: Element, text: &str) {
        self.lock().texts.insert(element, text.to_string());
    }

    fn reset_form(&self, form: FormId) {
        self.lock().forms.remove(&form);
    }

    fn show_banner(&self, banner: Banner) -> BannerId {
        let mut state = self.lock();
        let id = state.next_banner_id;
        state.next_banner_id += 1;
        state.banner = Some((banner, id));
        id
    }

    fn dismiss_banner(&self, id: BannerId) -> bool {
        let mut state = self.lock();
        let current = state.banner.as_ref().map(|(_, current)| *current);
        if current == Some(id) {
            state.banner = None;
            true
        } else {
            false
        }
    }
}

impl ModalController for DocumentModel {
    fn hide(&self, modal: ModalId) {
        self.lock().open_modals.remove(&modal);
    }
}

impl Navigator for DocumentModel {
    fn navigate(&self, href: &str) {
        self.lock().navigated_to = Some(href.to_string());
    }
}

/// Confirmation answer carried by the submitted form.
pub struct FormConfirmation(pub bool);

impl Confirmer for FormConfirmation {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

fn render_page(state: &DocumentState, asset_id: AssetId, routes: &Routes, banner_ttl: Duration) -> Markup {
    let point_form = FormId::AddDetailPoint;
    let maintenance_form = FormId::AddMaintenance;

    html! {
        (DOCTYPE)
        html lang="th" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (state.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.container-fluid {
                    div id="main-content" {
                        @if let Some((banner, id)) = &state.banner {
                            (templates::banner(banner, *id, banner_ttl.as_millis() as u64))
                        }
                        @if let Some(point_id) = state.pending_delete {
                            (templates::delete_confirmation(asset_id, point_id, routes))
                        }
                        div.d-flex.justify-content-between.align-items-center.mb-3 {
                            h2 id="asset-title" { (state.title) }
                            a.btn.btn-primary.hidden-by-default[!state.visible(Element::EditAssetButton)] id="edit-asset-btn"
                                href=[state.link(Element::EditAssetButton)] { "แก้ไขข้อมูล" }
                        }
                        div.alert.alert-warning.hidden-by-default[!state.visible(Element::PmDueAlert)] id="pm-due-alert" {
                            (state.region_markup(Region::PmDueAlert))
                        }
                        div.row.mb-4 {
                            div.col-md-4 id="asset-image" { (state.region_markup(Region::AssetImage)) }
                            div.col-md-8 {
                                dl.row id="asset-details" { (state.region_markup(Region::AssetDetails)) }
                            }
                        }
                        section.mb-4 {
                            div.d-flex.justify-content-between.align-items-center {
                                h3 { "จุดรายละเอียดการบำรุงรักษา" }
                                button.btn.btn-outline-primary type="button"
                                    onclick="document.getElementById('addDetailPointModal').showModal()" { "เพิ่มจุดรายละเอียด" }
                            }
                            div id="detail-points-container" { (state.region_markup(Region::DetailPoints)) }
                        }
                        dialog id="addDetailPointModal" open[state.modal_open(ModalId::AddDetailPoint)] {
                            form id="add-detail-point-form" method="post" enctype="multipart/form-data"
                                action=(routes.add_detail_point_action(asset_id)) {
                                label for="title" { "ชื่อจุด" }
                                input.form-control id="title" type="text" name="title" required
                                    value=(state.form_value(point_form, "title"));
                                label for="description" { "รายละเอียด" }
                                textarea.form-control id="description" name="description" {
                                    (state.form_value(point_form, "description"))
                                }
                                label for="location_detail" { "ตำแหน่ง" }
                                input.form-control id="location_detail" type="text" name="location_detail"
                                    value=(state.form_value(point_form, "location_detail"));
                                input id="point_image" type="file" name="point_image" accept="image/*";
                                span id="file-chosen" data-empty=(locale::NO_FILE_CHOSEN) { (state.text(Element::FileChosen)) }
                                button.btn.btn-primary type="submit" { "บันทึก" }
                            }
                        }
                        section {
                            div.d-flex.justify-content-between.align-items-center {
                                h3 { "ประวัติการซ่อมบำรุง" }
                                a.btn.btn-outline-success id="export-history-btn" href=[state.link(Element::ExportHistoryButton)] {
                                    "ส่งออกประวัติ"
                                }
                            }
                            table.table {
                                thead {
                                    tr { th { "วันที่" } th { "รายละเอียด" } th { "ค่าใช้จ่าย" } }
                                }
                                tbody id="maintenance-history-tbody" { (state.region_markup(Region::MaintenanceHistory)) }
                            }
                            form id="add-maintenance-form" method="post" action=(routes.add_maintenance_action(asset_id)) {
                                input.form-control type="text" name="description" required
                                    value=(state.form_value(maintenance_form, "description"));
                                input.form-control type="number" name="cost" step="0.01" min="0"
                                    value=(state.form_value(maintenance_form, "cost"));
                                button.btn.btn-success type="submit" { "เพิ่มประวัติ" }
                            }
                        }
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

const CSS: &str = r#"
.hidden-by-default { display: none; }
.detail-point-card-img, .detail-point-placeholder { height: 180px; object-fit: cover; }
.dynamic-alert { margin-bottom: 1rem; }
dialog { border: none; border-radius: 8px; max-width: 520px; width: 100%; }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('.dynamic-alert').forEach(function (alert) {
  var delay = parseInt(alert.dataset.dismissMs, 10) || 5000;
  setTimeout(function () { if (alert.parentNode) { alert.remove(); } }, delay);
  var close = alert.querySelector('.btn-close');
  if (close) { close.addEventListener('click', function () { alert.remove(); }); }
});
var fileInput = document.getElementById('point_image');
var fileChosen = document.getElementById('file-chosen');
if (fileInput && fileChosen) {
  fileInput.addEventListener('change', function () {
    fileChosen.textContent = this.files.length > 0 ? this.files[0].name : fileChosen.dataset.empty;
  });
}
"#;

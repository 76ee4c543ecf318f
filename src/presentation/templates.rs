// Render functions mapping transfer shapes to markup
use crate::application::page::{Banner, BannerId, PageTemplates};
use crate::domain::asset::{Asset, AssetId, DetailPoint, DetailPointId, MaintenanceEntry};
use crate::domain::locale;
use crate::presentation::routes::Routes;
use maud::{html, Markup};

/// The detail page's region templates, bound to the link routes.
pub struct MaudTemplates {
    routes: Routes,
}

impl MaudTemplates {
    pub fn new(routes: Routes) -> Self {
        Self { routes }
    }
}

impl PageTemplates for MaudTemplates {
    fn asset_image(&self, asset: &Asset) -> Markup {
        asset_image(asset, &self.routes)
    }

    fn asset_details(&self, asset: &Asset) -> Markup {
        asset_details(asset)
    }

    fn pm_due_alert(&self, asset_id: AssetId) -> Markup {
        pm_due_alert(asset_id, &self.routes)
    }

    fn detail_points(&self, points: &[DetailPoint], asset_id: AssetId, is_admin: bool) -> Markup {
        detail_points(points, asset_id, is_admin, &self.routes)
    }

    fn maintenance_history(&self, history: &[MaintenanceEntry]) -> Markup {
        maintenance_history(history)
    }

    fn edit_asset_link(&self, asset_id: AssetId) -> String {
        self.routes.edit_asset(asset_id)
    }

    fn export_history_link(&self, asset_id: AssetId) -> String {
        self.routes.export_history(asset_id)
    }

    fn edit_detail_point_link(&self, point_id: DetailPointId) -> String {
        self.routes.edit_detail_point_page(point_id)
    }
}

pub fn asset_image(asset: &Asset, routes: &Routes) -> Markup {
    html! {
        @if let Some(filename) = asset.image() {
            img.img-fluid.rounded.shadow-sm src=(routes.upload(filename)) alt={ "รูปภาพของ " (asset.name) };
        } @else {
            div.d-flex.align-items-center.justify-content-center.bg-light.rounded.shadow-sm.text-muted style="height: 250px;" {
                span { (locale::NO_IMAGE) }
            }
        }
    }
}

/// Fixed rows first, then one row per custom data entry.
pub fn asset_details(asset: &Asset) -> Markup {
    html! {
        (detail_row("ชื่อ", &asset.name))
        (detail_row("แผนก", &asset.location))
        @if let Some(technician) = asset.technician() {
            (detail_row("ผู้รับผิดชอบ", technician))
        }
        @if let Some(next_pm) = asset.next_pm() {
            (detail_row("PM ครั้งถัดไป", next_pm))
        }
        @if let Some(days) = asset.pm_frequency() {
            (detail_row("ความถี่ PM", &format!("ทุกๆ {} วัน", days)))
        }
        @for (key, value) in asset.custom_rows() {
            (detail_row(&key, &value))
        }
    }
}

fn detail_row(label: &str, value: &str) -> Markup {
    html! {
        dt.col-sm-4 { (label) }
        dd.col-sm-8 { (value) }
    }
}

pub fn pm_due_alert(asset_id: AssetId, routes: &Routes) -> Markup {
    html! {
        h4.alert-heading { "ถึงกำหนดบำรุงรักษา!" }
        p { "เครื่องจักรนี้ถึงกำหนดการบำรุงรักษาเชิงป้องกัน (PM) แล้ว" }
        hr;
        form.d-inline action=(routes.perform_pm(asset_id)) method="post" {
            button.btn.btn-success type="submit" { "ยืนยันการทำ PM และเลื่อนกำหนดการ" }
        }
    }
}

pub fn detail_points(points: &[DetailPoint], asset_id: AssetId, is_admin: bool, routes: &Routes) -> Markup {
    if points.is_empty() {
        return html! {
            div.text-center.text-muted.py-4 {
                p { (locale::NO_DETAIL_POINTS) }
            }
        };
    }

    html! {
        div.row {
            @for point in points {
                (detail_point_card(point, asset_id, is_admin, routes))
            }
        }
    }
}

fn detail_point_card(point: &DetailPoint, asset_id: AssetId, is_admin: bool, routes: &Routes) -> Markup {
    html! {
        div.col-md-6.col-lg-4.mb-4 {
            div.card data-point-id=(point.id) {
                @if let Some(filename) = point.image() {
                    img.card-img-top.detail-point-card-img src=(routes.upload(filename)) alt=(point.title);
                } @else {
                    div.card-img-top.d-flex.align-items-center.justify-content-center.bg-light.text-muted.detail-point-placeholder {
                        span { (locale::NO_IMAGE) }
                    }
                }
                div.card-body {
                    h5.card-title { (point.title) }
                    @if let Some(location) = point.location() {
                        p.card-text {
                            small.text-muted { i.fas.fa-map-marker-alt {} " " (location) }
                        }
                    }
                    @if let Some(description) = point.description() {
                        p.card-text { (description) }
                    }
                    div.d-flex.justify-content-between.align-items-center {
                        small.text-muted { (point.created_date()) }
                        div {
                            a.btn.btn-sm.btn-outline-secondary href=(routes.edit_detail_point_action(asset_id, point.id)) { "แก้ไข" }
                            @if is_admin {
                                // without script the host asks for confirmation itself
                                form.d-inline method="post"
                                    action=(routes.delete_detail_point_action(asset_id, point.id))
                                    onsubmit=(format!(
                                        "if (!confirm('{}')) return false; this.elements.confirmed.value = 'true'; return true;",
                                        locale::CONFIRM_DELETE_POINT
                                    )) {
                                    input type="hidden" name="confirmed" value="false";
                                    button.btn.btn-sm.btn-outline-danger type="submit" { "ลบ" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn maintenance_history(history: &[MaintenanceEntry]) -> Markup {
    html! {
        @if history.is_empty() {
            tr {
                td.text-center.text-muted colspan="3" { (locale::NO_HISTORY) }
            }
        } @else {
            @for entry in history {
                tr {
                    td { (entry.day()) }
                    td { (entry.description) }
                    td { (entry.cost_label()) }
                }
            }
        }
    }
}

/// Confirmation step for a delete posted without the in-page prompt.
pub fn delete_confirmation(asset_id: AssetId, point_id: DetailPointId, routes: &Routes) -> Markup {
    html! {
        div.alert.alert-warning id="delete-confirmation" role="alert" {
            p { (locale::CONFIRM_DELETE_POINT) }
            form.d-inline method="post" action=(routes.delete_detail_point_action(asset_id, point_id)) {
                input type="hidden" name="confirmed" value="true";
                button.btn.btn-danger type="submit" { "ยืนยันการลบ" }
            }
            " "
            a.btn.btn-secondary href=(routes.asset_page(asset_id)) { "ยกเลิก" }
        }
    }
}

pub fn banner(banner: &Banner, id: BannerId, dismiss_after_ms: u64) -> Markup {
    html! {
        div class={ "alert alert-" (banner.kind.css_class()) " alert-dismissible fade show dynamic-alert" }
            role="alert" data-banner-id=(id) data-dismiss-ms=(dismiss_after_ms) {
            (banner.message)
            button.btn-close type="button" data-bs-dismiss="alert" aria-label="Close" {}
        }
    }
}

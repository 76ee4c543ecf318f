// Asset, detail point and maintenance history transfer shapes
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type AssetId = i64;
pub type DetailPointId = i64;

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub next_pm_date: Option<String>,
    #[serde(default)]
    pub pm_frequency_days: Option<i64>,
    #[serde(default)]
    pub asset_image_filename: Option<String>,
    /// Free-form mapping; only rendered when the server sends a JSON object.
    #[serde(default)]
    pub custom_data: Option<Value>,
}

impl Asset {
    pub fn technician(&self) -> Option<&str> {
        non_empty(&self.technician_name)
    }

    pub fn next_pm(&self) -> Option<&str> {
        non_empty(&self.next_pm_date)
    }

    pub fn pm_frequency(&self) -> Option<i64> {
        self.pm_frequency_days.filter(|days| *days != 0)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.asset_image_filename)
    }

    /// Custom data rows in the order the server sent them.
    pub fn custom_rows(&self) -> Vec<(String, String)> {
        match &self.custom_data {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), display_value(value)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Other(String),
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<String> for UserRole {
    fn from(role: String) -> Self {
        if role == "admin" {
            UserRole::Admin
        } else {
            UserRole::Other(role)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailPoint {
    pub id: DetailPointId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_detail: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    pub created_at: String,
}

impl DetailPoint {
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location_detail)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_filename)
    }

    pub fn created_date(&self) -> &str {
        date_portion(&self.created_at)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceEntry {
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl MaintenanceEntry {
    pub fn day(&self) -> &str {
        date_portion(&self.date)
    }

    pub fn cost_label(&self) -> String {
        format_cost(self.cost)
    }
}

/// Uploaded image attached to a new detail point.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct DetailPointForm {
    pub title: String,
    pub description: String,
    pub location_detail: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceForm {
    pub description: String,
    /// Raw text of the cost input; blank means no cost.
    #[serde(default)]
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMaintenance {
    pub asset_id: AssetId,
    pub description: String,
    pub cost: Option<f64>,
}

impl NewMaintenance {
    pub fn from_form(asset_id: AssetId, form: &MaintenanceForm) -> Self {
        Self {
            asset_id,
            description: form.description.clone(),
            cost: parse_cost(&form.cost),
        }
    }
}

/// Text before the first space of a timestamp such as `2024-03-01 08:15:00`.
pub fn date_portion(timestamp: &str) -> &str {
    timestamp.split(' ').next().unwrap_or_default()
}

/// Two decimals with ties rounded away from zero (`0.125` shows as `0.13`).
pub fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(value) => format!("{:.2}", (value * 100.0).round() / 100.0),
        None => "N/A".to_string(),
    }
}

/// Blank input means "no cost"; unparsable input is sent as null as well.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!(raw = trimmed, "cost field is not a number, sending null");
            None
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_portion() {
        assert_eq!(date_portion("2024-03-01 08:15:00"), "2024-03-01");
        assert_eq!(date_portion("2024-03-01"), "2024-03-01");
        assert_eq!(date_portion(""), "");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(Some(12.5)), "12.50");
        assert_eq!(format_cost(Some(0.0)), "0.00");
        assert_eq!(format_cost(None), "N/A");
    }

    #[test]
    fn test_format_cost_rounds_ties_up() {
        assert_eq!(format_cost(Some(0.125)), "0.13");
        assert_eq!(format_cost(Some(12.125)), "12.13");
        assert_eq!(format_cost(Some(0.375)), "0.38");
        // binary representation sits just below the tie
        assert_eq!(format_cost(Some(1.005)), "1.00");
        assert_eq!(format_cost(Some(2.675)), "2.67");
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost(""), None);
        assert_eq!(parse_cost("   "), None);
        assert_eq!(parse_cost("1500"), Some(1500.0));
        assert_eq!(parse_cost(" 12.75 "), Some(12.75));
        assert_eq!(parse_cost("abc"), None);
    }

    #[test]
    fn test_new_maintenance_blank_cost_is_null() {
        let form = MaintenanceForm {
            description: "Replaced belt".to_string(),
            cost: String::new(),
        };
        let body = serde_json::to_value(NewMaintenance::from_form(7, &form)).unwrap();
        assert_eq!(
            body,
            json!({"asset_id": 7, "description": "Replaced belt", "cost": null})
        );
    }

    #[test]
    fn test_custom_rows_keep_server_order() {
        let asset: Asset = serde_json::from_value(json!({
            "id": 1,
            "name": "Pump",
            "location": "Line 2",
            "custom_data": {"Serial": "X-1", "Brand": "Acme", "Power": 7.5}
        }))
        .unwrap();

        assert_eq!(
            asset.custom_rows(),
            vec![
                ("Serial".to_string(), "X-1".to_string()),
                ("Brand".to_string(), "Acme".to_string()),
                ("Power".to_string(), "7.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_data_as_text_is_ignored() {
        let asset: Asset = serde_json::from_value(json!({
            "id": 1,
            "name": "Pump",
            "location": "Line 2",
            "custom_data": "{\"Serial\": \"X-1\"}"
        }))
        .unwrap();
        assert!(asset.custom_rows().is_empty());
    }

    #[test]
    fn test_falsy_fields_are_absent() {
        let asset: Asset = serde_json::from_value(json!({
            "id": 1,
            "name": "Pump",
            "location": "Line 2",
            "technician_name": "",
            "pm_frequency_days": 0,
            "asset_image_filename": null
        }))
        .unwrap();
        assert_eq!(asset.technician(), None);
        assert_eq!(asset.pm_frequency(), None);
        assert_eq!(asset.image(), None);
    }

    #[test]
    fn test_user_role() {
        assert!(UserRole::from("admin".to_string()).is_admin());
        assert!(!UserRole::from("technician".to_string()).is_admin());
        assert!(!UserRole::from("Admin".to_string()).is_admin());
    }
}

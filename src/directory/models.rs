//! Order Directory API models.
//!
//! Upstream responses come in two dialects (plain JSON and the older
//! `hydra:`-prefixed hypermedia shape); serde aliases absorb the variance
//! here so nothing past this boundary branches on field names.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order as reported by the Directory API. Read-only on this side; orders
/// are only ever created, never edited in place.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "@id", default)]
    pub iri: Option<String>,
    #[serde(default)]
    pub id: i64,
    /// Decimal-as-string, passed through untouched
    #[serde(default)]
    pub fuel_amount: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
}

/// Navigation links of a paginated collection, as opaque URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionView {
    #[serde(default, alias = "hydra:first")]
    pub first: Option<String>,
    #[serde(default, alias = "hydra:last")]
    pub last: Option<String>,
    #[serde(default, alias = "hydra:next")]
    pub next: Option<String>,
    #[serde(default, alias = "hydra:previous")]
    pub previous: Option<String>,
}

/// One page of orders
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCollection {
    #[serde(default, alias = "hydra:member")]
    pub member: Vec<Order>,
    #[serde(default, rename = "totalItems", alias = "hydra:totalItems")]
    pub total_items: u64,
    #[serde(default, alias = "hydra:view")]
    pub view: Option<CollectionView>,
}

/// Clients listing, tolerating both collection dialects
#[derive(Debug, Clone, Deserialize)]
pub struct ClientCollection {
    #[serde(default, alias = "hydra:member")]
    pub member: Vec<ClientRecord>,
}

/// Client as reported by the Directory API
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "@id", default)]
    pub iri: Option<String>,
    /// Number or string depending on the response dialect
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Normalized client reference for the order-creation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientOption {
    pub id: String,
    /// IRI submitted as the foreign-key reference when creating an order
    pub iri: String,
    pub label: String,
}

impl ClientRecord {
    /// Normalize the record: id from the explicit field or the trailing IRI
    /// segment, label preferring name, then email, then a placeholder.
    pub fn normalize(self) -> ClientOption {
        let id = self
            .id
            .as_ref()
            .map(id_to_string)
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.iri
                    .as_deref()
                    .and_then(|iri| iri.rsplit('/').next())
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let iri = self
            .iri
            .clone()
            .unwrap_or_else(|| format!("/api/clients/{}", id));

        let label = self
            .name
            .or(self.full_name)
            .or(self.company)
            .or(self.email)
            .unwrap_or_else(|| format!("Client #{}", id));

        ClientOption { id, iri, label }
    }
}

/// Payload POSTed to create an order. `client` is an IRI reference and
/// `status` is always submitted as "scheduled".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub client: String,
    pub fuel_amount: String,
    pub delivery_address: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Map an order status onto its badge variant. The enumeration is open;
/// unknown statuses (including "scheduled") render neutrally.
pub fn status_variant(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "delivered" => "success",
        "pending" => "warning",
        "cancelled" | "canceled" => "danger",
        _ => "neutral",
    }
}

/// Format an upstream timestamp for display. Unparseable values pass
/// through raw; absent ones render as an em dash.
pub fn format_date(value: Option<&str>) -> String {
    match value {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| value.to_string()),
        None => "\u{2014}".to_string(),
    }
}

fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_collection_plain_shape() {
        let collection: OrderCollection = serde_json::from_value(json!({
            "member": [{ "id": 5, "status": "delivered", "fuelAmount": "40.5",
                         "deliveryAddress": "1 Main St", "createdAt": "2025-06-01T10:00:00+00:00" }],
            "totalItems": 1
        }))
        .unwrap();

        assert_eq!(collection.member.len(), 1);
        assert_eq!(collection.member[0].id, 5);
        assert_eq!(collection.member[0].fuel_amount, "40.5");
        assert_eq!(collection.total_items, 1);
        assert!(collection.view.is_none());
    }

    #[test]
    fn test_order_collection_hydra_shape() {
        let collection: OrderCollection = serde_json::from_value(json!({
            "hydra:member": [{ "id": 2, "status": "pending" }],
            "hydra:totalItems": 12,
            "hydra:view": { "hydra:next": "/api/orders?page=2" }
        }))
        .unwrap();

        assert_eq!(collection.member.len(), 1);
        assert_eq!(collection.total_items, 12);
        assert_eq!(
            collection.view.unwrap().next.as_deref(),
            Some("/api/orders?page=2")
        );
    }

    #[test]
    fn test_client_id_falls_back_to_iri_segment() {
        let record: ClientRecord = serde_json::from_value(json!({
            "@id": "/api/clients/42", "email": "x@y.com"
        }))
        .unwrap();

        let option = record.normalize();
        assert_eq!(option.id, "42");
        assert_eq!(option.iri, "/api/clients/42");
        assert_eq!(option.label, "x@y.com");
    }

    #[test]
    fn test_client_label_preference_chain() {
        let named: ClientRecord =
            serde_json::from_value(json!({ "id": 1, "name": "Acme", "email": "x@y.com" })).unwrap();
        assert_eq!(named.normalize().label, "Acme");

        let full_named: ClientRecord =
            serde_json::from_value(json!({ "id": 2, "fullName": "Jo Doe" })).unwrap();
        assert_eq!(full_named.normalize().label, "Jo Doe");

        let bare: ClientRecord = serde_json::from_value(json!({ "id": 3 })).unwrap();
        let option = bare.normalize();
        assert_eq!(option.label, "Client #3");
        assert_eq!(option.iri, "/api/clients/3");
    }

    #[test]
    fn test_status_variants() {
        assert_eq!(status_variant("delivered"), "success");
        assert_eq!(status_variant("Delivered"), "success");
        assert_eq!(status_variant("pending"), "warning");
        assert_eq!(status_variant("cancelled"), "danger");
        assert_eq!(status_variant("canceled"), "danger");
        assert_eq!(status_variant("scheduled"), "neutral");
        assert_eq!(status_variant("anything-else"), "neutral");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some("2025-06-01T10:00:00+00:00")),
            "2025-06-01"
        );
        assert_eq!(format_date(Some("not-a-date")), "not-a-date");
        assert_eq!(format_date(None), "\u{2014}");
    }

    #[test]
    fn test_order_draft_skips_empty_notes() {
        let draft = OrderDraft {
            client: "/api/clients/1".to_string(),
            fuel_amount: "40.5".to_string(),
            delivery_address: "1 Main St".to_string(),
            status: "scheduled".to_string(),
            notes: None,
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["client"], "/api/clients/1");
        assert_eq!(value["fuelAmount"], "40.5");
        assert_eq!(value["status"], "scheduled");
        assert!(value.get("notes").is_none());
    }
}

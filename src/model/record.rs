//! Feed-side records: what the ERP export says each product should look like.
//!
//! Records are deserialized leniently. Anything the validator has an opinion
//! about (a negative price, a `sources` value that is not a list, a quantity
//! written as `"abc"`) must survive deserialization so it can be reported per
//! record instead of failing the whole batch.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Action assumed when a record does not declare one.
pub const DEFAULT_ACTION: &str = "update";

/// A numeric feed value, accepted either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// The value as `f64`, or `None` when the text is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// The value as an integer; fractional values are rejected.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Number(value as f64)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(n) => write!(f, "{}", n),
            Numeric::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The four things a feed record can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Update,
    Enable,
    Disable,
}

impl ActionKind {
    /// Parses a feed verb. `new` is the ERP spelling of create.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "new" | "create" => Some(ActionKind::Create),
            "update" => Some(ActionKind::Update),
            "enable" => Some(ActionKind::Enable),
            "disable" => Some(ActionKind::Disable),
            _ => None,
        }
    }

    /// Past participle used in operator messages ("could not be created").
    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::Create => "created",
            ActionKind::Update => "updated",
            ActionKind::Enable => "enabled",
            ActionKind::Disable => "disabled",
        }
    }

    /// Enable and disable only flip the catalog status.
    pub fn is_status_change(&self) -> bool {
        matches!(self, ActionKind::Enable | ActionKind::Disable)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Create => "new",
            ActionKind::Update => "update",
            ActionKind::Enable => "enable",
            ActionKind::Disable => "disable",
        };
        f.write_str(name)
    }
}

/// Desired quantity of one sku at one inventory location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationQuantity {
    #[serde(
        rename = "source_code",
        alias = "location_code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Numeric>,
}

impl LocationQuantity {
    pub fn new(location_code: impl Into<String>, quantity: impl Into<Numeric>) -> Self {
        Self {
            location_code: Some(location_code.into()),
            quantity: Some(quantity.into()),
        }
    }

    /// Location code, falling back to `default_location` when the feed omits it.
    pub fn code_or<'a>(&'a self, default_location: &'a str) -> &'a str {
        self.location_code.as_deref().unwrap_or(default_location)
    }

    pub fn quantity_value(&self) -> Option<f64> {
        self.quantity.as_ref().and_then(Numeric::as_f64)
    }
}

/// The `sources` field as found in the feed: a list, or something that is not one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sources {
    List(Vec<LocationQuantity>),
    Invalid(serde_json::Value),
}

impl Sources {
    pub fn as_list(&self) -> Option<&[LocationQuantity]> {
        match self {
            Sources::List(list) => Some(list),
            Sources::Invalid(_) => None,
        }
    }
}

/// Reads a scalar as text: numbers and booleans are stringified, `null` is absent.
/// Arrays and objects are rejected.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(Value::Array(_)) => Err(D::Error::custom("expected text, found an array")),
        Some(Value::Object(_)) => Err(D::Error::custom("expected text, found an object")),
    }
}

/// Scalar feed value as text, for salvaging the sku of a record that failed to parse.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// One product change record from the ERP feed.
///
/// Every field is optional at this level; what is actually required depends on
/// the action and is decided by the [`Validator`](crate::engine::Validator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Numeric>,
    #[serde(default)]
    pub attribute_set_id: Option<Numeric>,
    #[serde(default)]
    pub status: Option<Numeric>,
    #[serde(default)]
    pub visibility: Option<Numeric>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub type_id: Option<String>,
    #[serde(default, alias = "locations")]
    pub sources: Option<Sources>,
    /// Why the feed element could not be read as a record, if it could not.
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl ProductRecord {
    pub fn new(sku: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Reads one feed element. An element that does not have the record shape
    /// still yields a record (with its sku when one can be salvaged) carrying
    /// the problem in [`ProductRecord::malformed`].
    pub fn from_feed_value(value: Value) -> Self {
        match serde_json::from_value::<ProductRecord>(value.clone()) {
            Ok(record) => record,
            Err(err) => Self {
                sku: value.get("sku").and_then(scalar_text),
                malformed: Some(err.to_string()),
                ..Self::default()
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<Numeric>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Appends a location entry, turning `sources` into a list if needed.
    pub fn with_location(mut self, location: LocationQuantity) -> Self {
        match &mut self.sources {
            Some(Sources::List(list)) => list.push(location),
            _ => self.sources = Some(Sources::List(vec![location])),
        }
        self
    }

    /// The sku, treating an empty or blank string as missing.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The declared action, or [`DEFAULT_ACTION`] when the record has none.
    pub fn declared_action(&self) -> &str {
        self.action
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(DEFAULT_ACTION)
    }

    /// Location entries, empty when `sources` is absent or malformed.
    pub fn locations(&self) -> &[LocationQuantity] {
        self.sources
            .as_ref()
            .and_then(Sources::as_list)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_feed_shapes() {
        let record: ProductRecord = serde_json::from_str(
            r#"{
                "sku": "SKU-1",
                "action": "NEW",
                "price": "12.50",
                "attribute_set_id": 4,
                "sources": [
                    {"source_code": "wh-1", "quantity": 3},
                    {"quantity": "0"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(record.sku(), Some("SKU-1"));
        assert_eq!(ActionKind::parse(record.declared_action()), Some(ActionKind::Create));
        assert_eq!(record.price.as_ref().and_then(Numeric::as_f64), Some(12.5));
        assert_eq!(record.attribute_set_id.as_ref().and_then(Numeric::as_i64), Some(4));
        assert_eq!(record.locations().len(), 2);
        assert_eq!(record.locations()[1].code_or("default"), "default");
        assert_eq!(record.locations()[1].quantity_value(), Some(0.0));
    }

    #[test]
    fn test_malformed_sources_survive_deserialization() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"sku": "SKU-2", "sources": "lots"}"#).unwrap();

        assert!(matches!(record.sources, Some(Sources::Invalid(_))));
        assert!(record.locations().is_empty());
        assert_eq!(record.declared_action(), DEFAULT_ACTION);
    }

    #[test]
    fn test_scalar_fields_are_read_as_text() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"sku": 123, "action": "disable", "name": 5, "type_id": null}"#,
        )
        .unwrap();

        assert_eq!(record.sku(), Some("123"));
        assert_eq!(record.name.as_deref(), Some("5"));
        assert_eq!(record.type_id, None);
        assert!(record.malformed.is_none());
    }

    #[test]
    fn test_wrong_shape_element_keeps_sku_and_problem() {
        let record = ProductRecord::from_feed_value(serde_json::json!({
            "sku": "B",
            "action": "new",
            "name": ["not", "a", "name"]
        }));
        assert_eq!(record.sku(), Some("B"));
        assert!(record.malformed.as_deref().unwrap().contains("expected text"));

        let record = ProductRecord::from_feed_value(serde_json::json!(42));
        assert_eq!(record.sku(), None);
        assert!(record.malformed.is_some());
    }

    #[test]
    fn test_blank_sku_counts_as_missing() {
        let record = ProductRecord::new("  ", "enable");
        assert_eq!(record.sku(), None);
    }

    #[test]
    fn test_non_numeric_text_is_not_a_number() {
        assert_eq!(Numeric::from("abc").as_f64(), None);
        assert_eq!(Numeric::from("NaN").as_f64(), None);
        assert_eq!(Numeric::from(2.5).as_i64(), None);
    }
}

//! Per-record field checks.
//!
//! Two structural gates (sku, then action) stop at the first problem. Past the
//! gates every rule runs and every violation is collected, so an operator can
//! fix a record in one pass.

use crate::config::ValidationConfig;
use crate::model::{ActionKind, Numeric, ProductRecord, Sources, ValidationResult};

/// Reported for any record without a usable sku.
pub const MISSING_SKU: &str = "Product with SKU is missing: SKU is missing.";

/// Location label used in messages when an entry has no code.
const UNKNOWN_LOCATION: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Checks `record` for the action it is about to be run as.
    ///
    /// `action` is the raw feed verb; `None` or blank means the record declared
    /// no action at all. Never fails: problems come back as the result's errors.
    pub fn validate(&self, record: &ProductRecord, action: Option<&str>) -> ValidationResult {
        let Some(sku) = record.sku() else {
            return ValidationResult::invalid(MISSING_SKU);
        };

        if let Some(problem) = &record.malformed {
            return ValidationResult::invalid(format!(
                "Product with SKU \"{}\" could not be processed: {}",
                sku, problem
            ));
        }

        let Some(raw) = action.map(str::trim).filter(|a| !a.is_empty()) else {
            return ValidationResult::invalid(format!(
                "Product with SKU \"{}\" could not be processed: action is missing.",
                sku
            ));
        };

        let Some(kind) = ActionKind::parse(raw) else {
            return ValidationResult::invalid(format!(
                "Product with SKU \"{}\" has unknown action: {}",
                sku,
                raw.to_ascii_lowercase()
            ));
        };

        let mut result = ValidationResult::valid();
        if kind.is_status_change() {
            return result;
        }

        let prefix = format!("Product with SKU \"{}\" could not be {}:", sku, kind.verb());
        check_price(record, &prefix, &mut result);
        self.check_sources(record, kind, &prefix, &mut result);
        if kind == ActionKind::Create {
            check_create_fields(record, &prefix, &mut result);
        }
        result
    }

    fn check_sources(
        &self,
        record: &ProductRecord,
        kind: ActionKind,
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        let entries = match &record.sources {
            Some(Sources::List(entries)) => entries,
            Some(Sources::Invalid(_)) | None => {
                result.push(format!("{} sources array is missing or invalid.", prefix));
                return;
            }
        };

        if entries.is_empty() && kind == ActionKind::Create && self.config.require_create_locations
        {
            result.push(format!("{} sources array is empty.", prefix));
        }

        for entry in entries {
            let location = entry.code_or(UNKNOWN_LOCATION);
            match &entry.quantity {
                None => result.push(format!(
                    "{} quantity for source \"{}\" is missing",
                    prefix, location
                )),
                Some(quantity) => match quantity.as_f64() {
                    None => result.push(format!(
                        "{} quantity for source \"{}\" is not a number",
                        prefix, location
                    )),
                    Some(value) if value < 0.0 => result.push(format!(
                        "{} quantity for source \"{}\" cannot be negative ({:.2})",
                        prefix, location, value
                    )),
                    Some(_) => {}
                },
            }
        }
    }
}

fn check_price(record: &ProductRecord, prefix: &str, result: &mut ValidationResult) {
    let Some(price) = &record.price else {
        return;
    };
    match price.as_f64() {
        None => result.push(format!("{} price is not a number", prefix)),
        Some(value) if value < 0.0 => result.push(format!(
            "{} price cannot be negative ({:.2})",
            prefix, value
        )),
        Some(_) => {}
    }
}

fn check_create_fields(record: &ProductRecord, prefix: &str, result: &mut ValidationResult) {
    let name = record.name.as_deref().filter(|n| !n.trim().is_empty());
    if name.is_none() {
        result.push(format!("{} name is missing.", prefix));
    }

    check_integer("attribute_set_id", record.attribute_set_id.as_ref(), prefix, result);

    let type_id = record.type_id.as_deref().filter(|t| !t.trim().is_empty());
    if type_id.is_none() {
        result.push(format!("{} type_id is missing.", prefix));
    }

    check_integer("status", record.status.as_ref(), prefix, result);
    check_integer("visibility", record.visibility.as_ref(), prefix, result);
}

fn check_integer(
    field: &str,
    value: Option<&Numeric>,
    prefix: &str,
    result: &mut ValidationResult,
) {
    match value {
        None => result.push(format!("{} {} is missing.", prefix, field)),
        Some(value) if value.as_i64().is_none() => {
            result.push(format!("{} {} is not a number", prefix, field))
        }
        Some(_) => {}
    }
}

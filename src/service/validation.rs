//! Per-collection field rules applied to inserts and updates before they reach the store.

use crate::config::COURSES_COLLECTION;
use crate::error::AppError;
use bson::{Bson, Document};

struct FieldRule {
    collection: &'static str,
    field: &'static str,
    minimum: f64,
}

/// Course inventory can never go negative.
const RULES: &[FieldRule] = &[FieldRule {
    collection: COURSES_COLLECTION,
    field: "availableInventory",
    minimum: 0.0,
}];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate the fields present in `doc` against the rules for `collection`.
    /// Absent fields are not required; only supplied values are checked.
    pub fn validate(collection: &str, doc: &Document) -> Result<(), AppError> {
        for rule in RULES.iter().filter(|r| r.collection == collection) {
            if let Some(v) = doc.get(rule.field) {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }

    /// Validate a single field value, e.g. the inventory from `PUT /UpdatePrograms`.
    pub fn validate_value(collection: &str, field: &str, v: &Bson) -> Result<(), AppError> {
        for rule in RULES.iter().filter(|r| r.collection == collection && r.field == field) {
            validate_field(rule, v)?;
        }
        Ok(())
    }
}

fn validate_field(rule: &FieldRule, v: &Bson) -> Result<(), AppError> {
    let n = match v {
        Bson::Int32(n) => f64::from(*n),
        Bson::Int64(n) => *n as f64,
        Bson::Double(n) => *n,
        _ => return Err(AppError::BadRequest(format!("{} must be a number", rule.field))),
    };
    if n.is_nan() || n < rule.minimum {
        return Err(AppError::BadRequest(format!("{} must be at least {}", rule.field, rule.minimum)));
    }
    Ok(())
}

//! Request validation from declarative per-field rules.
//!
//! Rules are keyed by dotted path (`settings.title`); a `*` segment applies the rule to
//! every element of an array (`products.*.id`). All failures are collected so the admin
//! form can show every field message at once.

use crate::error::{AppError, FieldErrors};
use crate::model::ReorderItem;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Boolean,
    String,
    Array,
}

#[derive(Clone, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub kind: Option<FieldKind>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl ValidationRule {
    pub fn required(kind: FieldKind) -> Self {
        ValidationRule {
            required: true,
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        ValidationRule {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn between(mut self, min: i64, max: i64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }
}

pub type Rules = Vec<(&'static str, ValidationRule)>;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against rules. Returns every failing field, keyed by concrete path.
    pub fn validate(body: &Value, rules: &[(&str, ValidationRule)]) -> Result<(), AppError> {
        Self::collect(body, rules).into_result()
    }

    /// Every failing field, for callers that add their own checks before failing.
    pub fn collect(body: &Value, rules: &[(&str, ValidationRule)]) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (path, rule) in rules {
            for (field, val) in resolve(body, path) {
                let present = val.map(|v| !is_empty(v)).unwrap_or(false);
                if !present {
                    if rule.required {
                        errors.add(&field, format!("{} is required", field));
                    }
                    continue;
                }
                if let Some(v) = val {
                    if let Err(msg) = validate_field(&field, v, rule) {
                        errors.add(&field, msg);
                    }
                }
            }
        }
        errors
    }
}

fn validate_field(field: &str, v: &Value, rule: &ValidationRule) -> Result<(), String> {
    match rule.kind {
        Some(FieldKind::Integer) => {
            let n = coerce_int(v).ok_or_else(|| format!("{} must be an integer", field))?;
            if let Some(min) = rule.minimum {
                if n < min {
                    return Err(format!("{} must be at least {}", field, min));
                }
            }
            if let Some(max) = rule.maximum {
                if n > max {
                    return Err(format!("{} must be at most {}", field, max));
                }
            }
        }
        Some(FieldKind::Boolean) => {
            coerce_bool(v).ok_or_else(|| format!("{} must be true or false", field))?;
        }
        Some(FieldKind::String) => {
            let s = v.as_str().ok_or_else(|| format!("{} must be a string", field))?;
            if let Some(max) = rule.max_length {
                if s.chars().count() > max {
                    return Err(format!("{} must be at most {} characters", field, max));
                }
            }
        }
        Some(FieldKind::Array) => {
            if !v.is_array() {
                return Err(format!("{} must be an array", field));
            }
        }
        None => {}
    }
    Ok(())
}

/// Null, blank strings and empty arrays count as missing.
fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Expand a dotted rule path into concrete `(path, value)` pairs.
fn resolve<'a>(body: &'a Value, path: &str) -> Vec<(String, Option<&'a Value>)> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    walk(Some(body), &segments, String::new(), &mut out);
    out
}

fn walk<'a>(
    node: Option<&'a Value>,
    segments: &[&str],
    prefix: String,
    out: &mut Vec<(String, Option<&'a Value>)>,
) {
    let Some((head, rest)) = segments.split_first() else {
        out.push((prefix, node));
        return;
    };
    let join = |seg: &str| {
        if prefix.is_empty() {
            seg.to_string()
        } else {
            format!("{}.{}", prefix, seg)
        }
    };
    if *head == "*" {
        if let Some(Value::Array(items)) = node {
            for (i, item) in items.iter().enumerate() {
                walk(Some(item), rest, join(&i.to_string()), out);
            }
        }
        return;
    }
    let child = node.and_then(|n| n.get(*head));
    walk(child, rest, join(*head), out);
}

/// Integer from a JSON number or a numeric string.
pub fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `true`, `false`, `0`, `1`, `"0"`, `"1"`.
pub fn coerce_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Value at a dotted path, if present and not null.
pub fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(body, |node, seg| node.get(seg))
        .filter(|v| !v.is_null())
}

const SORT_ORDER_MAX: i64 = i32::MAX as i64;

/// Rules for the `settings.*` document.
pub fn settings_rules() -> Rules {
    vec![
        ("settings.enabled", ValidationRule::optional(FieldKind::Boolean)),
        ("settings.title", ValidationRule::required(FieldKind::String).max_length(255)),
        ("settings.max_products", ValidationRule::required(FieldKind::Integer).between(1, 50)),
        ("settings.sort_order", ValidationRule::optional(FieldKind::Integer).between(0, SORT_ORDER_MAX)),
    ]
}

pub fn update_settings_rules() -> Rules {
    let mut rules = vec![
        ("store_id", ValidationRule::required(FieldKind::Integer)),
        ("is_enabled", ValidationRule::optional(FieldKind::Boolean)),
    ];
    rules.extend(settings_rules());
    rules
}

pub fn add_product_rules() -> Rules {
    vec![("product_id", ValidationRule::required(FieldKind::Integer))]
}

pub fn reorder_rules() -> Rules {
    vec![
        ("products", ValidationRule::required(FieldKind::Array)),
        ("products.*.id", ValidationRule::required(FieldKind::Integer)),
        ("products.*.sort_order", ValidationRule::required(FieldKind::Integer).between(0, SORT_ORDER_MAX)),
    ]
}

/// Validated `PUT /settings` body. `None` means "keep the current value".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub store_id: i64,
    pub is_enabled: Option<bool>,
    pub enabled: Option<bool>,
    pub title: String,
    pub max_products: i32,
    pub sort_order: Option<i32>,
}

impl SettingsUpdate {
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        RequestValidator::validate(body, &update_settings_rules())?;
        Self::from_checked(body)
    }

    /// Build from a body that already passed [`update_settings_rules`].
    pub fn from_checked(body: &Value) -> Result<Self, AppError> {
        let int = |path: &str| lookup(body, path).and_then(coerce_int);
        let flag = |path: &str| lookup(body, path).and_then(coerce_bool);
        Ok(SettingsUpdate {
            store_id: int("store_id").ok_or_else(|| AppError::invalid("store_id", "store_id is required"))?,
            is_enabled: flag("is_enabled"),
            enabled: flag("settings.enabled"),
            title: lookup(body, "settings.title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| AppError::invalid("settings.title", "settings.title is required"))?,
            max_products: int("settings.max_products")
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| AppError::invalid("settings.max_products", "settings.max_products is required"))?,
            sort_order: int("settings.sort_order").and_then(|n| i32::try_from(n).ok()),
        })
    }
}

/// Validated `POST /products` body.
pub fn parse_add_product(body: &Value) -> Result<i64, AppError> {
    RequestValidator::validate(body, &add_product_rules())?;
    lookup(body, "product_id")
        .and_then(coerce_int)
        .ok_or_else(|| AppError::invalid("product_id", "product_id is required"))
}

/// Validated `POST /products/reorder` body, in request order.
pub fn parse_reorder(body: &Value) -> Result<Vec<ReorderItem>, AppError> {
    RequestValidator::validate(body, &reorder_rules())?;
    let items = body
        .get("products")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::invalid("products", "products is required"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let id = item.get("id").and_then(coerce_int);
            let sort_order = item
                .get("sort_order")
                .and_then(coerce_int)
                .and_then(|n| i32::try_from(n).ok());
            match (id, sort_order) {
                (Some(id), Some(sort_order)) => Ok(ReorderItem { id, sort_order }),
                _ => Err(AppError::invalid(&format!("products.{}", i), "invalid reorder item")),
            }
        })
        .collect()
}

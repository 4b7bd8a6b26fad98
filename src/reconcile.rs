//! State reconciliation.
//!
//! After a write, or on refresh, the object fetched from Casdoor is merged
//! with what the provider already holds. Each schema attribute falls in one
//! class:
//!
//! - **User-owned**: comes from configuration. After a write the planned
//!   value is kept; a refresh adopts the remote value so drift is visible.
//! - **Server-generated** (`computed`): always taken from the fetched object.
//! - **Masked** (`masked`): Casdoor answers with a sentinel such as `"***"`.
//!   The sentinel never reaches state; the prior value is kept instead.
//!
//! Independently, collection attributes with zero elements are stored as
//! `null`, so "empty" and "unset" compare equal on the next plan. Casdoor
//! also reports unset scalars as their zero value (`""`, `false`, `0`);
//! those are stored as `null` unless the attribute already held a value.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::schema::{Attribute, AttributeType, Schema};
use crate::types::AttributeChange;

/// The sentinel Casdoor substitutes for undisclosed secrets.
pub const DEFAULT_MASKED_VALUE: &str = "***";

/// Name of the attribute holding the state identifier.
pub const ID_ATTRIBUTE: &str = "id";

/// How an attribute's stored value is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeClass {
    /// The state `id`; set by the identifier protocol, never merged.
    Identifier,
    /// Value comes from configuration.
    UserOwned,
    /// Value is assigned by the remote system.
    ServerGenerated,
    /// Value is never disclosed by the remote system.
    Masked,
}

/// Classify a schema attribute.
pub fn classify(name: &str, attr: &Attribute) -> AttributeClass {
    if name == ID_ATTRIBUTE {
        AttributeClass::Identifier
    } else if attr.flags.masked {
        AttributeClass::Masked
    } else if attr.flags.computed {
        AttributeClass::ServerGenerated
    } else {
        AttributeClass::UserOwned
    }
}

/// Which side wins for user-owned attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Right after create/update: the plan is authoritative.
    AfterWrite,
    /// Refresh or import: the remote object is authoritative.
    Refresh,
}

/// Replace an empty list, set or map with `null`.
pub fn normalize_collection(value: Value) -> Value {
    match &value {
        Value::Array(items) if items.is_empty() => Value::Null,
        Value::Object(entries) if entries.is_empty() => Value::Null,
        _ => value,
    }
}

/// Normalize every collection attribute of `state` in place.
pub fn normalize_collections(schema: &Schema, state: &mut Value) {
    let Some(obj) = state.as_object_mut() else {
        return;
    };
    for (name, attr) in &schema.attributes {
        if !attr.attr_type.is_collection() {
            continue;
        }
        if let Some(slot) = obj.get_mut(name) {
            *slot = normalize_collection(slot.take());
        }
    }
}

/// Whether `value` is the zero value Casdoor reports for an unset scalar.
pub fn is_zero_value(attr_type: &AttributeType, value: &Value) -> bool {
    match (attr_type, value) {
        (AttributeType::String, Value::String(s)) => s.is_empty(),
        (AttributeType::Bool, Value::Bool(b)) => !b,
        (AttributeType::Int64 | AttributeType::Float64, Value::Number(n)) => {
            n.as_f64() == Some(0.0)
        }
        _ => false,
    }
}

static NULL: Value = Value::Null;

fn comparable<'a>(attr: &Attribute, value: Option<&'a Value>) -> &'a Value {
    match value {
        Some(v) if !is_zero_value(&attr.attr_type, v) => v,
        _ => &NULL,
    }
}

/// Attribute-by-attribute differences between two state objects, in schema
/// order. Missing keys, `null` and a scalar's zero value are the same thing.
pub fn diff(schema: &Schema, before: &Value, after: &Value) -> Vec<AttributeChange> {
    schema
        .attributes
        .iter()
        .filter_map(|(name, attr)| {
            let (old, new) = (before.get(name), after.get(name));
            if comparable(attr, old) == comparable(attr, new) {
                return None;
            }
            AttributeChange::between(name.as_str(), old.unwrap_or(&NULL), new.unwrap_or(&NULL))
        })
        .collect()
}

/// Merges fetched remote objects into stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciler {
    masked_value: String,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(DEFAULT_MASKED_VALUE)
    }
}

impl Reconciler {
    /// Create a reconciler recognizing the given masking sentinel.
    pub fn new(masked_value: impl Into<String>) -> Self {
        Self {
            masked_value: masked_value.into(),
        }
    }

    /// The masking sentinel.
    pub fn masked_value(&self) -> &str {
        &self.masked_value
    }

    /// Whether a fetched value is the masking sentinel.
    pub fn is_masked(&self, value: &Value) -> bool {
        value.as_str() == Some(self.masked_value.as_str())
    }

    /// Decide the stored value of a masked attribute.
    ///
    /// `prior` is `None` when there is no prior state at all (first import);
    /// in that case a withheld value becomes the empty string.
    pub fn resolve_masked(&self, fetched: &Value, prior: Option<&Value>) -> Value {
        if !self.is_masked(fetched) {
            return fetched.clone();
        }
        match prior {
            Some(prior) => prior.clone(),
            None => Value::String(String::new()),
        }
    }

    /// Merge right after a successful create or update.
    ///
    /// `planned` is the state that was sent; `fetched` is the object read
    /// back, already converted to state shape.
    pub fn after_write(&self, schema: &Schema, planned: &Value, fetched: &Value) -> Value {
        self.merge(schema, Some(planned), fetched, ReconcileMode::AfterWrite)
    }

    /// Merge on refresh. `prior` is `None` when nothing was stored before.
    pub fn refresh(&self, schema: &Schema, prior: Option<&Value>, fetched: &Value) -> Value {
        self.merge(schema, prior, fetched, ReconcileMode::Refresh)
    }

    /// Merge `fetched` into `prior` according to each attribute's class.
    ///
    /// The `id` attribute is carried over from `prior` untouched.
    pub fn merge(
        &self,
        schema: &Schema,
        prior: Option<&Value>,
        fetched: &Value,
        mode: ReconcileMode,
    ) -> Value {
        let mut merged = Map::new();

        for (name, attr) in &schema.attributes {
            let remote = fetched.get(name);
            let held = prior.map(|p| p.get(name).unwrap_or(&Value::Null));

            let class = classify(name, attr);
            let value = match class {
                AttributeClass::Identifier => held.cloned().unwrap_or(Value::Null),
                AttributeClass::Masked => {
                    let remote = remote.unwrap_or(&Value::Null);
                    if self.is_masked(remote) {
                        warn!(attribute = %name, "remote value withheld, keeping stored value");
                    }
                    // A key missing from prior state (fresh import) counts as no prior value.
                    self.resolve_masked(remote, prior.and_then(|p| p.get(name)))
                }
                AttributeClass::ServerGenerated => remote
                    .or(held)
                    .cloned()
                    .unwrap_or(Value::Null),
                AttributeClass::UserOwned => match mode {
                    ReconcileMode::AfterWrite => held.cloned().unwrap_or(Value::Null),
                    ReconcileMode::Refresh => remote.or(held).cloned().unwrap_or(Value::Null),
                },
            };

            let unset_before = held.map_or(true, Value::is_null);
            let value = if attr.attr_type.is_collection() {
                normalize_collection(value)
            } else if unset_before
                && class != AttributeClass::Masked
                && is_zero_value(&attr.attr_type, &value)
            {
                Value::Null
            } else {
                value
            };
            merged.insert(name.clone(), value);
        }

        debug!(attributes = merged.len(), mode = ?mode, "state reconciled");
        Value::Object(merged)
    }
}

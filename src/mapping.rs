//! Conversion between state objects and Casdoor API objects.
//!
//! State attributes are `snake_case`; Casdoor's JSON fields are
//! `lowerCamelCase`. The conversion is driven by the schema, so nested
//! object attributes (webhook headers, syncer table columns) are renamed
//! recursively. Top-level names that don't follow the rule are listed as
//! overrides on the resource descriptor.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::reconcile::ID_ATTRIBUTE;
use crate::schema::{AttributeType, Schema};

/// Convert `snake_case` to `lowerCamelCase`.
///
/// ```
/// use casdoor_provider::mapping::snake_to_camel;
///
/// assert_eq!(snake_to_camel("display_name"), "displayName");
/// assert_eq!(snake_to_camel("client_secret2"), "clientSecret2");
/// assert_eq!(snake_to_camel("owner"), "owner");
/// ```
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Top-level field renames for one resource kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldNames {
    overrides: &'static [(&'static str, &'static str)],
}

impl FieldNames {
    /// Create a field map with `(state_name, api_name)` overrides.
    pub const fn new(overrides: &'static [(&'static str, &'static str)]) -> Self {
        Self { overrides }
    }

    /// The API field name for a top-level state attribute.
    pub fn api_name<'a>(&self, state_name: &'a str) -> Cow<'a, str> {
        self.overrides
            .iter()
            .find(|(state, _)| *state == state_name)
            .map(|(_, api)| Cow::Borrowed(*api))
            .unwrap_or_else(|| Cow::Owned(snake_to_camel(state_name)))
    }

    /// Build the request body for a state object.
    ///
    /// `id` and attributes whose value is `null` are left out.
    pub fn to_api(&self, schema: &Schema, state: &Value) -> Value {
        let mut body = Map::new();
        for (name, attr) in &schema.attributes {
            if name == ID_ATTRIBUTE {
                continue;
            }
            match state.get(name) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    body.insert(
                        self.api_name(name).into_owned(),
                        to_api_value(&attr.attr_type, value),
                    );
                }
            }
        }
        Value::Object(body)
    }

    /// Convert a fetched API object into state shape.
    ///
    /// Only attributes present in the API object appear in the result, so
    /// callers can tell "absent" from "null".
    pub fn from_api(&self, schema: &Schema, object: &Value) -> Value {
        let mut state = Map::new();
        for (name, attr) in &schema.attributes {
            if name == ID_ATTRIBUTE {
                continue;
            }
            if let Some(value) = object.get(&*self.api_name(name)) {
                state.insert(name.clone(), from_api_value(&attr.attr_type, value));
            }
        }
        Value::Object(state)
    }
}

fn to_api_value(attr_type: &AttributeType, value: &Value) -> Value {
    match (attr_type, value) {
        (AttributeType::Object(fields), Value::Object(obj)) => Value::Object(
            fields
                .iter()
                .filter_map(|(name, ty)| {
                    obj.get(name)
                        .filter(|v| !v.is_null())
                        .map(|v| (snake_to_camel(name), to_api_value(ty, v)))
                })
                .collect(),
        ),
        (AttributeType::List(elem) | AttributeType::Set(elem), Value::Array(items)) => {
            Value::Array(items.iter().map(|v| to_api_value(elem, v)).collect())
        }
        (AttributeType::Map(elem), Value::Object(obj)) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), to_api_value(elem, v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn from_api_value(attr_type: &AttributeType, value: &Value) -> Value {
    match (attr_type, value) {
        (AttributeType::Object(fields), Value::Object(obj)) => Value::Object(
            fields
                .iter()
                .map(|(name, ty)| {
                    let v = obj
                        .get(&snake_to_camel(name))
                        .map(|v| from_api_value(ty, v))
                        .unwrap_or(Value::Null);
                    (name.clone(), v)
                })
                .collect(),
        ),
        (AttributeType::List(elem) | AttributeType::Set(elem), Value::Array(items)) => {
            Value::Array(items.iter().map(|v| from_api_value(elem, v)).collect())
        }
        (AttributeType::Map(elem), Value::Object(obj)) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), from_api_value(elem, v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn webhook_schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("owner", Attribute::required_string())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("content_type", Attribute::optional_string())
            .with_attribute("idp", Attribute::optional_string())
            .with_attribute(
                "headers",
                Attribute::optional_object_list([
                    ("name", AttributeType::String),
                    ("header_value", AttributeType::String),
                ]),
            )
    }

    const OVERRIDES: FieldNames = FieldNames::new(&[("idp", "idP")]);

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("is_user_extended"), "isUserExtended");
        assert_eq!(snake_to_camel("refresh_expire_in_hours"), "refreshExpireInHours");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_api_name_override() {
        assert_eq!(OVERRIDES.api_name("idp"), "idP");
        assert_eq!(OVERRIDES.api_name("content_type"), "contentType");
    }

    #[test]
    fn test_to_api_skips_id_and_nulls() {
        let body = OVERRIDES.to_api(
            &webhook_schema(),
            &json!({
                "id": "built-in/hook",
                "owner": "built-in",
                "name": "hook",
                "content_type": null,
                "idp": "okta",
                "headers": [{"name": "X-Token", "header_value": "abc"}],
            }),
        );
        assert_eq!(
            body,
            json!({
                "owner": "built-in",
                "name": "hook",
                "idP": "okta",
                "headers": [{"name": "X-Token", "headerValue": "abc"}],
            })
        );
    }

    #[test]
    fn test_from_api_only_includes_present_fields() {
        let state = OVERRIDES.from_api(
            &webhook_schema(),
            &json!({
                "owner": "built-in",
                "name": "hook",
                "contentType": "application/json",
                "headers": [{"name": "X-Token", "headerValue": "abc", "extra": 1}],
                "unknownField": true,
            }),
        );
        assert_eq!(
            state,
            json!({
                "owner": "built-in",
                "name": "hook",
                "content_type": "application/json",
                "headers": [{"name": "X-Token", "header_value": "abc"}],
            })
        );
        assert!(state.get("idp").is_none());
    }
}

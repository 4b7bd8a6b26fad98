//! Resource identifiers.
//!
//! Most Casdoor objects live under an owning organization and are addressed
//! as `owner/name`. That string doubles as the resource `id` stored in state
//! and as the import key. A few kinds are globally named; their `id` is the
//! bare name and the owner is fixed.
//!
//! ```
//! use casdoor_provider::identifier::{format, parse, ResourceIdentifier};
//!
//! assert_eq!(format("built-in", "r1"), "built-in/r1");
//! assert_eq!(
//!     parse("built-in/r1").unwrap(),
//!     ResourceIdentifier::new("built-in", "r1")
//! );
//! assert!(parse("r1").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Expected import format for owner-scoped resources.
pub const COMPOSITE_FORMAT: &str = "owner/name";

/// Expected import format for globally named resources.
pub const NAME_FORMAT: &str = "name";

/// An `(owner, name)` pair addressing a single remote object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The owning organization.
    pub owner: String,
    /// The object's name, unique within its owner.
    pub name: String,
}

impl ResourceIdentifier {
    /// Create an identifier from its two parts. No validation is performed.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The `owner/name` form used by the remote API's `id` query parameter.
    pub fn api_id(&self) -> String {
        format(&self.owner, &self.name)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Join an owner and a name into the composite `owner/name` form.
///
/// Both parts are expected to be non-empty; this is not checked here.
pub fn format(owner: &str, name: &str) -> String {
    let mut id = String::with_capacity(owner.len() + name.len() + 1);
    id.push_str(owner);
    id.push('/');
    id.push_str(name);
    id
}

/// Split a composite identifier on its first `/`.
///
/// Fails with [`ProviderError::InvalidIdentifier`] when there is no `/` or
/// when either side of it is empty. Anything after the first `/` belongs to
/// the name.
pub fn parse(s: &str) -> Result<ResourceIdentifier, ProviderError> {
    match s.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
            Ok(ResourceIdentifier::new(owner, name))
        }
        _ => Err(ProviderError::invalid_identifier(COMPOSITE_FORMAT, s)),
    }
}

/// How a resource kind turns its identifier into the state `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStyle {
    /// `owner/name`; both parts come from configuration.
    Composite,
    /// The bare `name`; the owner is always the given constant.
    Named {
        /// Owner used for every object of this kind.
        owner: &'static str,
    },
}

impl IdStyle {
    /// The import format shown to users when parsing fails.
    pub fn expected_format(&self) -> &'static str {
        match self {
            Self::Composite => COMPOSITE_FORMAT,
            Self::Named { .. } => NAME_FORMAT,
        }
    }

    /// Render the state `id` for an identifier.
    pub fn format(&self, id: &ResourceIdentifier) -> String {
        match self {
            Self::Composite => id.api_id(),
            Self::Named { .. } => id.name.clone(),
        }
    }

    /// Parse a user-supplied import string.
    pub fn parse_import(&self, raw: &str) -> Result<ResourceIdentifier, ProviderError> {
        match self {
            Self::Composite => parse(raw),
            Self::Named { owner } => {
                if raw.is_empty() || raw.contains('/') {
                    Err(ProviderError::invalid_identifier(NAME_FORMAT, raw))
                } else {
                    Ok(ResourceIdentifier::new(*owner, raw))
                }
            }
        }
    }

    /// Build an identifier from the `owner` and `name` attributes of a state
    /// or plan object.
    ///
    /// `Named` styles ignore any configured owner.
    pub fn from_state(
        &self,
        state: &serde_json::Value,
    ) -> Result<ResourceIdentifier, ProviderError> {
        let name = non_empty_str(state, "name")
            .ok_or_else(|| ProviderError::Validation("attribute 'name' must be set".to_string()))?;

        match self {
            Self::Composite => {
                let owner = non_empty_str(state, "owner").ok_or_else(|| {
                    ProviderError::Validation("attribute 'owner' must be set".to_string())
                })?;
                Ok(ResourceIdentifier::new(owner, name))
            }
            Self::Named { owner } => Ok(ResourceIdentifier::new(*owner, name)),
        }
    }
}

fn non_empty_str<'a>(state: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    state
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_and_parse_round_trip() {
        for (owner, name) in [("built-in", "r1"), ("acme", "app-1"), ("o", "n")] {
            let id = format(owner, name);
            assert_eq!(parse(&id).unwrap(), ResourceIdentifier::new(owner, name));
        }
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = parse("no-slash-here").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("owner/name"));
        assert!(err.to_string().contains("no-slash-here"));
    }

    #[test]
    fn test_parse_rejects_empty_components() {
        assert!(matches!(
            parse("owner/"),
            Err(ProviderError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            parse("/name"),
            Err(ProviderError::InvalidIdentifier { .. })
        ));
        assert!(parse("/").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_parse_splits_on_first_slash() {
        let id = parse("acme/team/lead").unwrap();
        assert_eq!(id.owner, "acme");
        assert_eq!(id.name, "team/lead");
    }

    #[test]
    fn test_named_style() {
        let style = IdStyle::Named { owner: "admin" };
        let id = style.parse_import("acme").unwrap();
        assert_eq!(id, ResourceIdentifier::new("admin", "acme"));
        assert_eq!(style.format(&id), "acme");
        assert_eq!(id.api_id(), "admin/acme");

        let err = style.parse_import("admin/acme").unwrap_err();
        assert!(err.to_string().contains("\"name\""));
        assert!(style.parse_import("").is_err());
    }

    #[test]
    fn test_from_state() {
        let id = IdStyle::Composite
            .from_state(&json!({"owner": "built-in", "name": "r1"}))
            .unwrap();
        assert_eq!(IdStyle::Composite.format(&id), "built-in/r1");

        assert!(IdStyle::Composite
            .from_state(&json!({"owner": "", "name": "r1"}))
            .is_err());
        assert!(IdStyle::Composite.from_state(&json!({"owner": "o"})).is_err());

        let id = IdStyle::Named { owner: "admin" }
            .from_state(&json!({"owner": "ignored", "name": "acme"}))
            .unwrap();
        assert_eq!(id.owner, "admin");
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceIdentifier::new("a", "b").to_string(), "a/b");
    }
}

//! Provider configuration.
//!
//! The provider block accepts the Casdoor endpoint and application
//! credentials. Anything left out of the block falls back to the matching
//! `CASDOOR_*` environment variable.
//!
//! ```hcl
//! provider "casdoor" {
//!   endpoint          = "https://door.example.com"
//!   client_id         = "..."
//!   client_secret     = "..."
//!   organization_name = "built-in"
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::reconcile::DEFAULT_MASKED_VALUE;
use crate::schema::{Attribute, Diagnostic, Schema};
use crate::validation::validate;

/// Environment variable for `endpoint`.
pub const ENV_ENDPOINT: &str = "CASDOOR_ENDPOINT";
/// Environment variable for `client_id`.
pub const ENV_CLIENT_ID: &str = "CASDOOR_CLIENT_ID";
/// Environment variable for `client_secret`.
pub const ENV_CLIENT_SECRET: &str = "CASDOOR_CLIENT_SECRET";
/// Environment variable for `organization_name`.
pub const ENV_ORGANIZATION_NAME: &str = "CASDOOR_ORGANIZATION_NAME";

/// The fully resolved provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the Casdoor server, without a trailing slash.
    pub endpoint: String,
    /// Client ID of the Casdoor application used for API access.
    pub client_id: String,
    /// Client secret of that application.
    pub client_secret: String,
    /// Owner used when an owner-scoped resource leaves `owner` unset.
    pub organization_name: Option<String>,
    /// The string Casdoor returns in place of undisclosed secrets.
    pub masked_value: String,
}

/// The provider block as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    endpoint: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    organization_name: Option<String>,
    masked_value: Option<String>,
}

impl ProviderConfig {
    /// The schema of the provider block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_description("Manages Casdoor identity resources")
            .with_attribute(
                "endpoint",
                Attribute::optional_string().with_description(format!(
                    "Casdoor server URL. Defaults to ${}.",
                    ENV_ENDPOINT
                )),
            )
            .with_attribute(
                "client_id",
                Attribute::optional_string().with_description(format!(
                    "Application client ID. Defaults to ${}.",
                    ENV_CLIENT_ID
                )),
            )
            .with_attribute(
                "client_secret",
                Attribute::optional_string()
                    .sensitive()
                    .with_description(format!(
                        "Application client secret. Defaults to ${}.",
                        ENV_CLIENT_SECRET
                    )),
            )
            .with_attribute(
                "organization_name",
                Attribute::optional_string().with_description(format!(
                    "Default owner for resources that leave `owner` unset. Defaults to ${}.",
                    ENV_ORGANIZATION_NAME
                )),
            )
            .with_attribute(
                "masked_value",
                Attribute::optional_string().with_description(format!(
                    "Placeholder Casdoor returns for undisclosed secrets. Defaults to \"{}\".",
                    DEFAULT_MASKED_VALUE
                )),
            )
    }

    /// Resolve configuration from the provider block and the process
    /// environment.
    pub fn from_value(config: &Value) -> Result<Self, Vec<Diagnostic>> {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    /// Resolve configuration using `env` for fallbacks.
    ///
    /// Returns every problem found, not just the first.
    pub fn resolve<F>(config: &Value, env: F) -> Result<Self, Vec<Diagnostic>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut diagnostics = validate(&Self::schema(), config);
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        let raw: RawConfig = if config.is_null() {
            RawConfig::default()
        } else {
            serde_json::from_value(config.clone())
                .map_err(|e| {
                    vec![Diagnostic::error(format!(
                        "Invalid provider configuration: {}",
                        e
                    ))]
                })?
        };

        let mut required = |attribute: &str, value: Option<String>, env_key: &str| {
            match non_empty(value).or_else(|| non_empty(env(env_key))) {
                Some(v) => v,
                None => {
                    diagnostics.push(
                        Diagnostic::error(format!("Missing provider attribute '{}'", attribute))
                            .with_detail(format!(
                                "Set '{}' in the provider block or the {} environment variable",
                                attribute, env_key
                            ))
                            .with_attribute(attribute),
                    );
                    String::new()
                }
            }
        };

        let endpoint = required("endpoint", raw.endpoint, ENV_ENDPOINT);
        let client_id = required("client_id", raw.client_id, ENV_CLIENT_ID);
        let client_secret = required("client_secret", raw.client_secret, ENV_CLIENT_SECRET);
        let organization_name =
            non_empty(raw.organization_name).or_else(|| non_empty(env(ENV_ORGANIZATION_NAME)));

        let masked_value = match raw.masked_value {
            Some(v) if v.is_empty() => {
                diagnostics.push(
                    Diagnostic::error("Invalid provider attribute 'masked_value'")
                        .with_detail("The masking placeholder must not be empty")
                        .with_attribute("masked_value"),
                );
                String::new()
            }
            Some(v) => v,
            None => DEFAULT_MASKED_VALUE.to_string(),
        };

        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            organization_name,
            masked_value,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

//! # Casdoor Provider
//!
//! An infrastructure provider that manages [Casdoor](https://casdoor.org)
//! objects (organizations, applications, users, roles, permissions and the
//! rest) declaratively.
//!
//! The crate provides:
//!
//! - **Composite identifiers**: objects are addressed as `owner/name`
//!   ([`identifier`])
//! - **State reconciliation**: masked secrets, null collections and
//!   read-after-write failures ([`reconcile`])
//! - **ProviderService trait**: the lifecycle a host drives ([`service`])
//! - **Casdoor client**: the REST calls behind every resource ([`client`])
//! - **Error types**: one error enum mapped onto diagnostics ([`error`])
//! - **Logging**: integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```ignore
//! use casdoor_provider::{init_logging, CasdoorProvider, ProviderService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = CasdoorProvider::new();
//!     provider
//!         .configure(json!({
//!             "endpoint": "https://door.example.com",
//!             "client_id": "...",
//!             "client_secret": "...",
//!             "organization_name": "built-in",
//!         }))
//!         .await?;
//!
//!     let plan = provider
//!         .plan("casdoor_role", None, json!({"name": "editors"}), json!({}))
//!         .await?;
//!     let state = provider.create("casdoor_role", plan.planned_state).await?;
//!     assert_eq!(state["id"], "built-in/editors");
//!     Ok(())
//! }
//! ```
//!
//! # Partial state
//!
//! When Casdoor accepts a create but the object cannot be read back, the
//! error is [`ProviderError::Unconfirmed`]. It carries state with the `id`
//! set; the host must persist it so the next run refreshes the object
//! instead of creating it again.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod mapping;
pub mod provider;
pub mod reconcile;
pub mod resource;
pub mod resources;
pub mod schema;
pub mod service;
pub mod testing;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use client::{CasdoorApi, CasdoorClient};
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use identifier::{IdStyle, ResourceIdentifier};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::CasdoorProvider;
pub use reconcile::Reconciler;
pub use schema::ProviderSchema;
pub use service::ProviderService;
pub use types::{AttributeChange, ImportedResource, InstanceState, PlanResult, ProviderMetadata};
pub use validation::{is_valid, validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;

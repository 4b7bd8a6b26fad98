//! The Casdoor provider.
//!
//! [`CasdoorProvider`] implements [`ProviderService`] by routing every
//! resource and data source call to the [`ResourceAdapter`] registered for
//! its type. Adapters are built once, on the first successful `configure`.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::client::{CasdoorApi, CasdoorClient};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::reconcile::Reconciler;
use crate::resource::{ResourceAdapter, ResourceDescriptor};
use crate::resources::catalog;
use crate::schema::{has_errors, Diagnostic, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};
use crate::validation::validate;

type Registry = BTreeMap<&'static str, ResourceAdapter>;

/// Provider for Casdoor identity objects.
pub struct CasdoorProvider {
    descriptors: Vec<Arc<ResourceDescriptor>>,
    registry: OnceLock<Registry>,
}

impl Default for CasdoorProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CasdoorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasdoorProvider")
            .field("resources", &self.descriptors.len())
            .field("configured", &self.registry.get().is_some())
            .finish()
    }
}

impl CasdoorProvider {
    /// Create an unconfigured provider with every supported resource type.
    pub fn new() -> Self {
        Self {
            descriptors: catalog().into_iter().map(Arc::new).collect(),
            registry: OnceLock::new(),
        }
    }

    /// Create a provider that is already configured against `api`.
    ///
    /// Later `configure` calls only warn.
    pub fn with_api(
        api: Arc<dyn CasdoorApi>,
        reconciler: Reconciler,
        default_owner: Option<String>,
    ) -> Self {
        let provider = Self::new();
        let registry = provider.build_registry(api, reconciler, default_owner);
        let _ = provider.registry.set(registry);
        provider
    }

    /// Whether `configure` has succeeded.
    pub fn is_configured(&self) -> bool {
        self.registry.get().is_some()
    }

    fn build_registry(
        &self,
        api: Arc<dyn CasdoorApi>,
        reconciler: Reconciler,
        default_owner: Option<String>,
    ) -> Registry {
        let reconciler = Arc::new(reconciler);
        self.descriptors
            .iter()
            .map(|d| {
                let adapter = ResourceAdapter::new(
                    d.clone(),
                    api.clone(),
                    reconciler.clone(),
                    default_owner.clone(),
                );
                (d.type_name, adapter)
            })
            .collect()
    }

    fn descriptor(&self, type_name: &str) -> Result<&ResourceDescriptor, ProviderError> {
        self.descriptors
            .iter()
            .find(|d| d.type_name == type_name)
            .map(|d| d.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    fn adapter(&self, type_name: &str) -> Result<&ResourceAdapter, ProviderError> {
        self.descriptor(type_name)?;
        self.registry
            .get()
            .ok_or_else(|| ProviderError::Configuration("provider is not configured".to_string()))?
            .get(type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }
}

#[async_trait::async_trait]
impl ProviderService for CasdoorProvider {
    fn schema(&self) -> ProviderSchema {
        self.descriptors.iter().fold(
            ProviderSchema::new().with_provider_config(ProviderConfig::schema()),
            |schema, d| {
                schema
                    .with_resource(d.type_name, d.schema.clone())
                    .with_data_source(d.type_name, d.data_source_schema())
            },
        )
    }

    async fn validate_provider_config(
        &self,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        debug!("ValidateProviderConfig called");
        match ProviderConfig::from_value(&config) {
            Ok(_) => Ok(vec![]),
            Err(diagnostics) => {
                warn!(
                    diagnostics = diagnostics.len(),
                    "ValidateProviderConfig completed with errors"
                );
                Ok(diagnostics)
            }
        }
    }

    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        debug!("Configure called");
        if self.is_configured() {
            warn!("Configure called on a configured provider, keeping the existing client");
            return Ok(vec![Diagnostic::warning("Provider is already configured")
                .with_detail("The first configuration stays in effect.")]);
        }

        let config = match ProviderConfig::from_value(&config) {
            Ok(config) => config,
            Err(diagnostics) => {
                warn!(diagnostics = diagnostics.len(), "Configure completed with errors");
                return Ok(diagnostics);
            }
        };

        let client = CasdoorClient::from_config(&config).map_err(|e| {
            error!(error = %e, "Configure failed");
            e
        })?;
        let registry = self.build_registry(
            Arc::new(client),
            Reconciler::new(config.masked_value.clone()),
            config.organization_name.clone(),
        );
        if self.registry.set(registry).is_err() {
            // Lost a race with a concurrent configure.
            return Ok(vec![Diagnostic::warning("Provider is already configured")]);
        }
        info!(endpoint = %config.endpoint, "Configure completed successfully");
        Ok(vec![])
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        info!("Stop called");
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        debug!(resource_type, "ValidateResourceConfig called");
        let diagnostics = self.descriptor(resource_type)?.validate(&config);
        if has_errors(&diagnostics) {
            warn!(
                resource_type,
                diagnostics = diagnostics.len(),
                "ValidateResourceConfig completed with errors"
            );
        }
        Ok(diagnostics)
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        _config: Value,
    ) -> Result<PlanResult, ProviderError> {
        debug!(resource_type, is_create = prior_state.is_none(), "Plan called");
        let result = self
            .adapter(resource_type)
            .and_then(|a| a.plan(prior_state.as_ref(), proposed_state));
        match &result {
            Ok(plan) => info!(
                resource_type,
                changes = plan.changes.len(),
                requires_replace = plan.requires_replace,
                "Plan completed"
            ),
            Err(e) => error!(resource_type, error = %e, "Plan failed"),
        }
        result
    }

    async fn create(
        &self,
        resource_type: &str,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        info!(resource_type, "Create called");
        let result = self.adapter(resource_type)?.create(planned_state).await;
        match &result {
            Ok(_) => info!(resource_type, "Create completed successfully"),
            Err(e) => error!(resource_type, error = %e, "Create failed"),
        }
        result
    }

    async fn read(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Option<Value>, ProviderError> {
        debug!(resource_type, "Read called");
        let result = self.adapter(resource_type)?.read(&current_state).await;
        match &result {
            Ok(Some(_)) => debug!(resource_type, "Read completed successfully"),
            Ok(None) => info!(resource_type, "Read found no object"),
            Err(e) => error!(resource_type, error = %e, "Read failed"),
        }
        result
    }

    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        info!(resource_type, "Update called");
        let result = self
            .adapter(resource_type)?
            .update(&prior_state, planned_state)
            .await;
        match &result {
            Ok(_) => info!(resource_type, "Update completed successfully"),
            Err(e) => error!(resource_type, error = %e, "Update failed"),
        }
        result
    }

    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        info!(resource_type, "Delete called");
        let result = self.adapter(resource_type)?.delete(&current_state).await;
        match &result {
            Ok(()) => info!(resource_type, "Delete completed successfully"),
            Err(e) => error!(resource_type, error = %e, "Delete failed"),
        }
        result
    }

    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        info!(resource_type, id, "ImportResourceState called");
        let imported = self.adapter(resource_type)?.import(id).map_err(|e| {
            error!(resource_type, error = %e, "ImportResourceState failed");
            e
        })?;
        Ok(vec![imported])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        debug!(data_source_type, "ValidateDataSourceConfig called");
        let schema = self.descriptor(data_source_type)?.data_source_schema();
        Ok(validate(&schema, &config))
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        debug!(data_source_type, "ReadDataSource called");
        let result = self
            .adapter(data_source_type)?
            .read_data_source(&config)
            .await;
        if let Err(e) = &result {
            error!(data_source_type, error = %e, "ReadDataSource failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        assert_error_contains, assert_no_errors, assert_plan_creates, assert_plan_no_changes,
        assert_plan_replaces, MockCasdoor, ProviderTester,
    };
    use serde_json::json;
    use tokio_test::assert_ok;

    fn mocked() -> (Arc<MockCasdoor>, ProviderTester<CasdoorProvider>) {
        let mock = Arc::new(MockCasdoor::new());
        let provider = CasdoorProvider::with_api(
            mock.clone(),
            Reconciler::default(),
            Some("built-in".to_string()),
        );
        (mock, ProviderTester::new(provider))
    }

    #[test]
    fn test_schema_lists_every_type() {
        let tester = ProviderTester::new(CasdoorProvider::new());
        let resources = tester.resource_types();
        assert_eq!(resources.len(), 16);
        assert!(resources.contains(&"casdoor_user".to_string()));
        assert_eq!(tester.data_source_types(), resources);
        assert!(tester.schema().provider.attribute("endpoint").is_some());
    }

    #[test]
    fn test_metadata_matches_schema() {
        let provider = CasdoorProvider::new();
        let metadata = provider.metadata();
        assert_eq!(metadata.resources.len(), 16);
        assert_eq!(metadata.resources, metadata.data_sources);
    }

    #[tokio::test]
    async fn test_unknown_resource_type() {
        let (_, tester) = mocked();
        let err = tester
            .create("casdoor_nothing", json!({"name": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_rejects_operations() {
        let tester = ProviderTester::new(CasdoorProvider::new());
        let err = tester
            .read("casdoor_role", json!({"id": "built-in/r1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));

        // Validation needs no client.
        let diagnostics = tester
            .provider()
            .validate_resource_config("casdoor_role", json!({"name": "r1"}))
            .await
            .unwrap();
        assert_no_errors(&diagnostics);
    }

    #[tokio::test]
    async fn test_configure_reports_invalid_settings() {
        let provider = CasdoorProvider::new();
        let diagnostics = provider
            .configure(json!({"endpoint": 8000, "client_id": "id", "client_secret": "s"}))
            .await
            .unwrap();
        assert_error_contains(&diagnostics, "endpoint");
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_configure_twice_warns() {
        let provider = CasdoorProvider::new();
        let config = json!({
            "endpoint": "http://localhost:8000",
            "client_id": "id",
            "client_secret": "secret",
        });
        assert_no_errors(&assert_ok!(provider.configure(config.clone()).await));
        assert!(provider.is_configured());

        let diagnostics = assert_ok!(provider.configure(config).await);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[tokio::test]
    async fn test_role_crud_lifecycle() {
        let (mock, tester) = mocked();

        let updated = tester
            .lifecycle_crud(
                "casdoor_role",
                json!({"name": "r1", "display_name": "Role 1"}),
                json!({"name": "r1", "display_name": "Role One", "users": ["built-in/alice"]}),
            )
            .await
            .unwrap();

        assert_eq!(updated["id"], "built-in/r1");
        assert_eq!(updated["display_name"], "Role One");
        assert_eq!(updated["users"], json!(["built-in/alice"]));
        assert_eq!(mock.add_calls(), 1);
        assert_eq!(mock.update_calls(), 1);
        assert_eq!(mock.delete_calls(), 1);
        assert!(mock.object("role", "built-in/r1").is_none());
    }

    #[tokio::test]
    async fn test_plan_through_provider() {
        let (_, tester) = mocked();
        let plan = tester
            .plan_create("casdoor_group", json!({"name": "g1"}))
            .await
            .unwrap();
        assert_plan_creates(&plan);

        let state = tester
            .lifecycle_create("casdoor_group", json!({"name": "g1"}))
            .await
            .unwrap();
        let plan = tester
            .plan_update("casdoor_group", state.clone(), json!({"name": "g1"}))
            .await
            .unwrap();
        assert_plan_no_changes(&plan);

        let plan = tester
            .plan_update("casdoor_group", state, json!({"name": "g2"}))
            .await
            .unwrap();
        assert_plan_replaces(&plan);
    }

    #[tokio::test]
    async fn test_organization_uses_bare_name() {
        let (mock, tester) = mocked();
        let state = tester
            .lifecycle_create("casdoor_organization", json!({"name": "acme"}))
            .await
            .unwrap();
        assert_eq!(state["id"], "acme");
        assert_eq!(state["owner"], "admin");
        assert!(mock.object("organization", "admin/acme").is_some());
    }

    #[tokio::test]
    async fn test_import_then_read() {
        let (mock, tester) = mocked();
        mock.insert(
            "user",
            json!({"owner": "built-in", "name": "alice", "displayName": "Alice"}),
        );

        let state = tester
            .lifecycle_import("casdoor_user", "built-in/alice")
            .await
            .unwrap();
        assert_eq!(state["id"], "built-in/alice");
        assert_eq!(state["display_name"], "Alice");
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_id() {
        let (_, tester) = mocked();
        let err = tester
            .import_resource("casdoor_user", "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_read_data_source() {
        let (mock, tester) = mocked();
        mock.insert("cert", json!({"owner": "admin", "name": "c1", "scope": "JWT"}));

        let state = tester
            .read_data_source("casdoor_cert", json!({"owner": "admin", "name": "c1"}))
            .await
            .unwrap();
        assert_eq!(state["id"], "admin/c1");
        assert_eq!(state["scope"], "JWT");
    }
}

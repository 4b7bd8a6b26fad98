//! Testing utilities.
//!
//! [`ProviderTester`] drives a [`ProviderService`] through the same calls a
//! host would make, and [`MockCasdoor`] stands in for a Casdoor server so
//! adapters can be exercised without HTTP.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use casdoor_provider::testing::{MockCasdoor, ProviderTester};
//! use casdoor_provider::{CasdoorProvider, Reconciler};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_role() {
//!     let mock = Arc::new(MockCasdoor::new());
//!     let provider = CasdoorProvider::with_api(mock.clone(), Reconciler::default(), None);
//!     let tester = ProviderTester::new(provider);
//!
//!     let state = tester
//!         .lifecycle_create("casdoor_role", json!({"owner": "built-in", "name": "r1"}))
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(state["id"], "built-in/r1");
//!     assert_eq!(mock.add_calls(), 1);
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CasdoorApi;
use crate::error::ProviderError;
use crate::identifier::{self, ResourceIdentifier};
use crate::reconcile::DEFAULT_MASKED_VALUE;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};

/// A test harness for provider implementations.
///
/// This wraps a `ProviderService` implementation and provides
/// simplified methods for testing without a host process.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Create a new tester for the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Get the provider's schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Get the list of resource type names.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    /// Get the list of data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Validate provider configuration.
    ///
    /// Returns `Ok(())` if validation passes (no error diagnostics).
    /// Returns `Err` with the diagnostics if there are errors.
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.validate_provider_config(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Configure the provider.
    ///
    /// Returns the warnings on success, or `Err` with the diagnostics if
    /// there are errors.
    pub async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, TestError> {
        let diagnostics = self.provider.configure(config).await?;
        let warnings = diagnostics
            .iter()
            .filter(|d| !d.is_error())
            .cloned()
            .collect();
        check_diagnostics(diagnostics)?;
        Ok(warnings)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate a resource configuration.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_resource_config(resource_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Plan a resource creation (no prior state).
    pub async fn plan_create(
        &self,
        resource_type: &str,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, None, proposed_state.clone(), proposed_state)
            .await
    }

    /// Plan a resource update.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(
                resource_type,
                Some(prior_state),
                proposed_state.clone(),
                proposed_state,
            )
            .await
    }

    /// Plan a resource deletion.
    pub async fn plan_delete(
        &self,
        resource_type: &str,
        prior_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), Value::Null, Value::Null)
            .await
    }

    /// Create a new resource.
    pub async fn create(
        &self,
        resource_type: &str,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned_state).await
    }

    /// Read the current state of a resource. `None` means the resource is
    /// gone and would be removed from state.
    pub async fn read(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Option<Value>, ProviderError> {
        self.provider.read(resource_type, current_state).await
    }

    /// Update an existing resource.
    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .update(resource_type, prior_state, planned_state)
            .await
    }

    /// Delete a resource.
    pub async fn delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    /// Import an existing resource.
    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source configuration.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(data_source_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Read data from a data source.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .read_data_source(data_source_type, config)
            .await
    }

    // =========================================================================
    // Lifecycle Helpers
    // =========================================================================

    /// Run a full create lifecycle: plan → create → read.
    ///
    /// Returns the final state after read.
    pub async fn lifecycle_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan_result = self.plan_create(resource_type, config).await?;
        let created_state = self
            .create(resource_type, plan_result.planned_state)
            .await?;
        self.read_existing(resource_type, created_state).await
    }

    /// Run a full update lifecycle: plan → update → read.
    ///
    /// Returns the final state after read.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        proposed_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan_result = self
            .plan_update(resource_type, prior_state.clone(), proposed_state)
            .await?;
        let updated_state = self
            .update(resource_type, prior_state, plan_result.planned_state)
            .await?;
        self.read_existing(resource_type, updated_state).await
    }

    /// Run a full delete lifecycle: plan → delete.
    pub async fn lifecycle_delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<(), ProviderError> {
        let _ = self
            .plan_delete(resource_type, current_state.clone())
            .await?;
        self.delete(resource_type, current_state).await
    }

    /// Run a full CRUD lifecycle: create → read → update → read → delete.
    ///
    /// Returns the state after the update (before delete).
    pub async fn lifecycle_crud(
        &self,
        resource_type: &str,
        initial_config: Value,
        updated_config: Value,
    ) -> Result<Value, ProviderError> {
        let created_state = self.lifecycle_create(resource_type, initial_config).await?;
        let updated_state = self
            .lifecycle_update(resource_type, created_state, updated_config)
            .await?;
        self.lifecycle_delete(resource_type, updated_state.clone())
            .await?;
        Ok(updated_state)
    }

    /// Run an import: import → read.
    ///
    /// Returns the state the host would persist.
    pub async fn lifecycle_import(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Value, ProviderError> {
        let imported = self.import_resource(resource_type, id).await?;
        let Some(first) = imported.into_iter().next() else {
            return Err(ProviderError::NotFound(format!("{} {}", resource_type, id)));
        };
        self.read_existing(&first.resource_type, first.state).await
    }

    async fn read_existing(
        &self,
        resource_type: &str,
        state: Value,
    ) -> Result<Value, ProviderError> {
        let id = state
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.read(resource_type, state)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("{} {}", resource_type, id)))
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a provider error.
    Provider(ProviderError),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

/// Check diagnostics and return an error if there are any errors.
fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

// =========================================================================
// In-memory Casdoor
// =========================================================================

#[derive(Default)]
struct MockState {
    objects: BTreeMap<(String, String), Value>,
    generated: Vec<(String, String, Value)>,
    masked: Vec<(String, String)>,
    fail_next_get: Option<String>,
    reject_next_add: Option<String>,
    add_calls: usize,
    get_calls: usize,
    update_calls: usize,
    delete_calls: usize,
}

/// An in-memory [`CasdoorApi`].
///
/// Objects are stored in API shape, keyed by kind and `owner/name`. The
/// mock mimics the behaviors the adapters depend on: generated fields are
/// filled in on add, masked fields read back as the sentinel, and adding an
/// object that already exists, or updating or deleting one that does not,
/// is reported as unaffected.
pub struct MockCasdoor {
    masked_value: String,
    state: Mutex<MockState>,
}

impl Default for MockCasdoor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCasdoor {
    /// Create an empty mock using the default masking sentinel.
    pub fn new() -> Self {
        Self {
            masked_value: DEFAULT_MASKED_VALUE.to_string(),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Use a different masking sentinel.
    pub fn with_masked_value(mut self, masked_value: impl Into<String>) -> Self {
        self.masked_value = masked_value.into();
        self
    }

    /// Fill `field` with `value` on every added object of `kind` that does
    /// not set it.
    pub fn with_generated(self, kind: &str, field: &str, value: Value) -> Self {
        self.lock()
            .generated
            .push((kind.to_string(), field.to_string(), value));
        self
    }

    /// Return the masking sentinel for `field` of `kind` on get.
    pub fn with_masked(self, kind: &str, field: &str) -> Self {
        self.lock()
            .masked
            .push((kind.to_string(), field.to_string()));
        self
    }

    /// Store an object directly, as if created outside the provider.
    pub fn insert(&self, kind: &str, object: Value) {
        let id = identifier::format(&str_field(&object, "owner"), &str_field(&object, "name"));
        self.lock().objects.insert((kind.to_string(), id), object);
    }

    /// The stored object, unmasked.
    pub fn object(&self, kind: &str, id: &str) -> Option<Value> {
        self.lock()
            .objects
            .get(&(kind.to_string(), id.to_string()))
            .cloned()
    }

    /// Delete an object out of band. Returns whether it existed.
    pub fn remove(&self, kind: &str, id: &str) -> bool {
        self.lock()
            .objects
            .remove(&(kind.to_string(), id.to_string()))
            .is_some()
    }

    /// Make the next get fail as if Casdoor were unreachable.
    pub fn fail_next_get(&self, reason: impl Into<String>) {
        self.lock().fail_next_get = Some(reason.into());
    }

    /// Make the next add fail with an application-level rejection.
    pub fn reject_next_add(&self, message: impl Into<String>) {
        self.lock().reject_next_add = Some(message.into());
    }

    /// Number of add calls received.
    pub fn add_calls(&self) -> usize {
        self.lock().add_calls
    }

    /// Number of get calls received.
    pub fn get_calls(&self) -> usize {
        self.lock().get_calls
    }

    /// Number of update calls received.
    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    /// Number of delete calls received.
    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CasdoorApi for MockCasdoor {
    async fn get_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
    ) -> Result<Option<Value>, ProviderError> {
        let mut state = self.lock();
        state.get_calls += 1;
        if let Some(reason) = state.fail_next_get.take() {
            return Err(ProviderError::Unavailable(reason));
        }

        let Some(mut object) = state.objects.get(&(kind.to_string(), id.api_id())).cloned() else {
            return Ok(None);
        };
        for (_, field) in state.masked.iter().filter(|(k, _)| k == kind) {
            if let Some(slot) = object.get_mut(field.as_str()).filter(|v| !v.is_null()) {
                *slot = Value::String(self.masked_value.clone());
            }
        }
        Ok(Some(object))
    }

    async fn add_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError> {
        let mut state = self.lock();
        state.add_calls += 1;
        let id = identifier::format(&str_field(object, "owner"), &str_field(object, "name"));
        if let Some(message) = state.reject_next_add.take() {
            return Err(ProviderError::rejected(format!("add-{}", kind), id, message));
        }

        let key = (kind.to_string(), id);
        if state.objects.contains_key(&key) {
            return Ok(false);
        }

        let mut stored = object.clone();
        for (_, field, value) in state.generated.iter().filter(|(k, _, _)| k == kind) {
            if stored.get(field.as_str()).map_or(true, Value::is_null) {
                stored[field.as_str()] = value.clone();
            }
        }
        state.objects.insert(key, stored);
        Ok(true)
    }

    async fn update_object(
        &self,
        kind: &str,
        id: &ResourceIdentifier,
        object: &Value,
    ) -> Result<bool, ProviderError> {
        let mut state = self.lock();
        state.update_calls += 1;

        let Some(existing) = state.objects.remove(&(kind.to_string(), id.api_id())) else {
            return Ok(false);
        };
        let mut updated = existing;
        if let (Some(target), Some(fields)) = (updated.as_object_mut(), object.as_object()) {
            for (k, v) in fields {
                target.insert(k.clone(), v.clone());
            }
        }

        let key = (
            kind.to_string(),
            identifier::format(&str_field(&updated, "owner"), &str_field(&updated, "name")),
        );
        state.objects.insert(key, updated);
        Ok(true)
    }

    async fn delete_object(&self, kind: &str, object: &Value) -> Result<bool, ProviderError> {
        let mut state = self.lock();
        state.delete_calls += 1;
        let id = identifier::format(&str_field(object, "owner"), &str_field(object, "name"));
        Ok(state.objects.remove(&(kind.to_string(), id)).is_some())
    }
}

fn str_field(object: &Value, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// Assert that a plan result indicates the resource will be created.
///
/// # Panics
///
/// Panics if the plan has no changes or requires replacement.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(
        !plan.changes.is_empty(),
        "Expected plan to have changes for create, but got no changes"
    );
    assert!(
        !plan.requires_replace,
        "Expected plan to create, not replace"
    );
}

/// Assert that a plan result indicates no changes.
///
/// # Panics
///
/// Panics if the plan has any changes.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        plan.changes.is_empty(),
        "Expected no changes, but got {} change(s): {:?}",
        plan.changes.len(),
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// Assert that a plan result indicates changes are needed.
///
/// # Panics
///
/// Panics if the plan has no changes.
pub fn assert_plan_has_changes(plan: &PlanResult) {
    assert!(
        !plan.changes.is_empty(),
        "Expected plan to have changes, but got no changes"
    );
}

/// Assert that a plan requires resource replacement.
///
/// # Panics
///
/// Panics if the plan does not require replacement.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(
        plan.requires_replace,
        "Expected plan to require replacement, but it does not"
    );
}

/// Assert that a plan does not require resource replacement.
///
/// # Panics
///
/// Panics if the plan requires replacement.
pub fn assert_plan_updates_in_place(plan: &PlanResult) {
    assert!(
        !plan.requires_replace,
        "Expected plan to update in place, but it requires replacement"
    );
}

/// Assert that a plan has a change for a specific attribute path.
///
/// # Panics
///
/// Panics if the plan does not have a change for the given path.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    let has_change = plan.changes.iter().any(|c| c.path == path);
    assert!(
        has_change,
        "Expected plan to change attribute '{}', but it was not changed. Changed attributes: {:?}",
        path,
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain an error with the given summary substring.
///
/// # Panics
///
/// Panics if no error diagnostic contains the given substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let has_matching_error = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error) && d.summary.contains(substring));

    assert!(
        has_matching_error,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeChange;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_add_get_roundtrip() {
        let mock = MockCasdoor::new().with_generated("cert", "certificate", json!("-----BEGIN"));
        let object = json!({"owner": "admin", "name": "cert-1", "bitSize": 4096});

        assert!(mock.add_object("cert", &object).await.unwrap());
        assert!(!mock.add_object("cert", &object).await.unwrap());

        let fetched = mock
            .get_object("cert", &ResourceIdentifier::new("admin", "cert-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched["certificate"], "-----BEGIN");
        assert_eq!(fetched["bitSize"], 4096);
        assert_eq!(mock.add_calls(), 2);
        assert_eq!(mock.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_masks_fields() {
        let mock = MockCasdoor::new()
            .with_masked_value("<hidden>")
            .with_masked("adapter", "password");
        mock.insert(
            "adapter",
            json!({"owner": "built-in", "name": "db", "password": "pw", "user": "casbin"}),
        );

        let fetched = mock
            .get_object("adapter", &ResourceIdentifier::new("built-in", "db"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched["password"], "<hidden>");
        assert_eq!(fetched["user"], "casbin");
        assert_eq!(mock.object("adapter", "built-in/db").unwrap()["password"], "pw");
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockCasdoor::new();
        let id = ResourceIdentifier::new("built-in", "r1");
        mock.fail_next_get("connection refused");
        assert!(mock.get_object("role", &id).await.unwrap_err().is_transport());
        assert!(mock.get_object("role", &id).await.unwrap().is_none());

        mock.reject_next_add("quota exceeded");
        let err = mock
            .add_object("role", &json!({"owner": "built-in", "name": "r1"}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation add-role rejected for built-in/r1: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_mock_update_and_delete() {
        let mock = MockCasdoor::new();
        let id = ResourceIdentifier::new("built-in", "r1");
        mock.insert("role", json!({"owner": "built-in", "name": "r1", "displayName": "a"}));

        let body = json!({"owner": "built-in", "name": "r1", "displayName": "b"});
        assert!(mock.update_object("role", &id, &body).await.unwrap());
        assert!(mock.update_object("role", &id, &body).await.unwrap());
        assert_eq!(mock.object("role", "built-in/r1").unwrap()["displayName"], "b");
        let missing = ResourceIdentifier::new("built-in", "r2");
        assert!(!mock.update_object("role", &missing, &body).await.unwrap());
        assert_eq!(mock.update_calls(), 3);

        assert!(mock.delete_object("role", &body).await.unwrap());
        assert!(!mock.delete_object("role", &body).await.unwrap());
        assert!(!mock.remove("role", "built-in/r1"));
        assert_eq!(mock.delete_calls(), 2);
    }

    #[test]
    fn test_assert_no_errors() {
        let diagnostics = vec![Diagnostic::warning("Just a warning")];
        assert_no_errors(&diagnostics);
    }

    #[test]
    #[should_panic(expected = "Expected no errors")]
    fn test_assert_no_errors_fails() {
        let diagnostics = vec![Diagnostic::error("An error")];
        assert_no_errors(&diagnostics);
    }

    #[test]
    fn test_assert_error_contains() {
        let diagnostics = vec![Diagnostic::error("Missing provider attribute 'endpoint'")];
        assert_error_contains(&diagnostics, "Missing");
        assert_error_contains(&diagnostics, "endpoint");
    }

    #[test]
    fn test_plan_assertions() {
        let plan = PlanResult::with_changes(
            json!({"name": "r2"}),
            vec![AttributeChange::modified("name", json!("r1"), json!("r2"))],
            true,
        );
        assert_plan_has_changes(&plan);
        assert_plan_changes_attribute(&plan, "name");
        assert_plan_replaces(&plan);

        let plan = PlanResult::no_change(json!({"name": "r1"}));
        assert_plan_no_changes(&plan);
        assert_plan_updates_in_place(&plan);
    }

    #[test]
    fn test_test_error_display() {
        let err = TestError::Diagnostics(vec![
            Diagnostic::error("First error").with_attribute("field1"),
            Diagnostic::error("Second error").with_detail("More info"),
        ]);

        let display = format!("{}", err);
        assert!(display.contains("First error"));
        assert!(display.contains("Second error"));
        assert!(display.contains("field1"));
        assert!(display.contains("More info"));
    }
}

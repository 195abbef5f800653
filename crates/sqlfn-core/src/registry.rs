//! An in-memory catalog of versioned SQL functions.
//!
//! The registry stores every version of every overload, keyed by [`SqlFunctionId`].
//! Creating a function assigns it the next version token of its overload (`"1"`, `"2"`,
//! ...) unless the latest version already has the same definition. Writers take
//! `&mut self`; callers sharing a registry across threads wrap it in a lock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::types::{QualifiedObjectName, SqlFunctionHandle, SqlFunctionId, TypeSignature};
use crate::SqlInvokedFunction;

mod config;

pub use config::RegistryConfig;

/// One stored version of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredFunction {
    function: SqlInvokedFunction,
    handle: SqlFunctionHandle,
    registered_at: DateTime<Utc>,
}

impl RegisteredFunction {
    pub fn function(&self) -> &SqlInvokedFunction {
        &self.function
    }

    pub fn handle(&self) -> &SqlFunctionHandle {
        &self.handle
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    config: RegistryConfig,
    functions: BTreeMap<SqlFunctionId, Vec<RegisteredFunction>>,
}

impl FunctionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            functions: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers an unversioned function and returns the stored, versioned descriptor.
    ///
    /// Without `replace`, an existing overload is an error. With it, a definition equal to
    /// the latest version is returned as is, and anything else becomes a new version.
    pub fn create_function(
        &mut self,
        function: SqlInvokedFunction,
        replace: bool,
    ) -> Result<SqlInvokedFunction, RegistryError> {
        if function.has_version() {
            return Err(RegistryError::VersionedInput(function.function_id().clone()));
        }
        function.validate()?;
        self.check_language(&function)?;

        let versions = self.functions.get(function.function_id());
        if let Some(latest) = versions.and_then(|versions| versions.last()) {
            if !replace {
                return Err(RegistryError::AlreadyExists(
                    function.function_id().clone(),
                ));
            }
            if latest.function.has_same_definition(&function) {
                #[cfg(feature = "tracing")]
                debug!(target: "registry", "{} unchanged at version {}", latest.handle.function_id, latest.handle.version);
                return Ok(latest.function.clone());
            }
        }

        let next = versions
            .map_or(Some(1), |versions| next_version(versions))
            .ok_or_else(|| RegistryError::VersionsExhausted(function.function_id().clone()))?;
        let versioned = function.with_version(next.to_string())?;
        let handle = versioned.required_function_handle()?.clone();

        #[cfg(feature = "tracing")]
        info!(target: "registry", "created {}", handle);

        self.functions
            .entry(handle.function_id.clone())
            .or_default()
            .push(RegisteredFunction {
                function: versioned.clone(),
                handle,
                registered_at: Utc::now(),
            });
        Ok(versioned)
    }

    /// Stores an already-versioned function, e.g. one restored from persisted state.
    ///
    /// Re-inserting an identical version is a no-op. A handle already registered with a
    /// different definition is rejected.
    pub fn insert(&mut self, function: SqlInvokedFunction) -> Result<(), RegistryError> {
        let handle = match function.function_handle() {
            Some(handle) => handle.clone(),
            None => {
                return Err(RegistryError::UnversionedInput(
                    function.function_id().clone(),
                ))
            }
        };
        function.validate()?;
        self.check_language(&function)?;

        let versions = self.functions.entry(handle.function_id.clone()).or_default();
        if let Some(existing) = versions.iter().find(|entry| entry.handle == handle) {
            if existing.function == function {
                return Ok(());
            }
            return Err(RegistryError::HandleConflict(handle));
        }

        #[cfg(feature = "tracing")]
        info!(target: "registry", "inserted {}", handle);

        versions.push(RegisteredFunction {
            function,
            handle,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Latest version of one overload.
    pub fn get_function(&self, function_id: &SqlFunctionId) -> Option<&SqlInvokedFunction> {
        self.functions
            .get(function_id)
            .and_then(|versions| versions.last())
            .map(RegisteredFunction::function)
    }

    /// Exact version referenced by a handle.
    pub fn get_function_by_handle(
        &self,
        handle: &SqlFunctionHandle,
    ) -> Option<&SqlInvokedFunction> {
        self.functions
            .get(&handle.function_id)?
            .iter()
            .find(|entry| &entry.handle == handle)
            .map(RegisteredFunction::function)
    }

    /// Latest version of every overload of `name`, ordered by argument types.
    pub fn get_functions(&self, name: &QualifiedObjectName) -> Vec<&SqlInvokedFunction> {
        self.latest()
            .filter(|entry| entry.function.name() == name)
            .map(RegisteredFunction::function)
            .collect()
    }

    /// Every version of one overload, oldest first.
    pub fn versions(&self, function_id: &SqlFunctionId) -> &[RegisteredFunction] {
        self.functions
            .get(function_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Removes one overload (or every overload of `name` when `argument_types` is
    /// `None`) together with all its versions. Returns the number of overloads removed.
    pub fn drop_function(
        &mut self,
        name: &QualifiedObjectName,
        argument_types: Option<&[TypeSignature]>,
        if_exists: bool,
    ) -> Result<usize, RegistryError> {
        let before = self.functions.len();
        match argument_types {
            Some(argument_types) => {
                let function_id = SqlFunctionId::new(name.clone(), argument_types.to_vec());
                self.functions.remove(&function_id);
            }
            None => self.functions.retain(|id, _| &id.function_name != name),
        }
        let removed = before - self.functions.len();

        if removed == 0 && !if_exists {
            let target = match argument_types {
                Some(argument_types) => {
                    SqlFunctionId::new(name.clone(), argument_types.to_vec()).to_string()
                }
                None => name.to_string(),
            };
            return Err(RegistryError::NotFound(target));
        }

        #[cfg(feature = "tracing")]
        info!(target: "registry", "dropped {} overload(s) of {}", removed, name);

        Ok(removed)
    }

    /// Every stored version, grouped by overload.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredFunction> {
        self.functions.values().flatten()
    }

    /// The latest version of each overload.
    pub fn latest(&self) -> impl Iterator<Item = &RegisteredFunction> {
        self.functions.values().filter_map(|versions| versions.last())
    }

    /// Number of overloads.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn check_language(&self, function: &SqlInvokedFunction) -> Result<(), RegistryError> {
        let language = &function.routine_characteristics().language;
        if self.config.supports(language) {
            Ok(())
        } else {
            Err(RegistryError::UnsupportedLanguage {
                function_id: function.function_id().clone(),
                language: language.clone(),
            })
        }
    }
}

/// One past the highest numeric token. Non-numeric tokens come from [`FunctionRegistry::insert`]
/// and are skipped. `None` once the highest token is `u64::MAX`.
fn next_version(versions: &[RegisteredFunction]) -> Option<u64> {
    versions
        .iter()
        .filter_map(|entry| entry.handle.version.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::IdentitySource;
    use crate::test_utils::{add_function, deterministic, total_aggregate, ty};
    use crate::types::{Language, Parameter, RoutineCharacteristics};

    fn with_body(body: &str) -> SqlInvokedFunction {
        SqlInvokedFunction::builder("ns.add".parse().unwrap(), ty("bigint"))
            .parameters(vec![
                Parameter::new("a", ty("bigint")),
                Parameter::new("b", ty("bigint")),
            ])
            .description("adds two")
            .routine_characteristics(deterministic())
            .body(body)
            .build(IdentitySource::Derive)
            .unwrap()
    }

    #[test]
    fn test_create_assigns_first_version() {
        let mut registry = FunctionRegistry::default();
        let created = registry.create_function(add_function(), false).unwrap();

        assert_eq!(created.required_version().unwrap(), "1");
        assert!(created.has_same_definition(&add_function()));
        assert_eq!(registry.get_function(created.function_id()), Some(&created));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_existing_without_replace() {
        let mut registry = FunctionRegistry::default();
        registry.create_function(add_function(), false).unwrap();
        let err = registry.create_function(with_body("b+a"), false).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyExists(add_function().function_id().clone())
        );
    }

    #[test]
    fn test_replace_with_new_definition_adds_version() {
        let mut registry = FunctionRegistry::default();
        registry.create_function(add_function(), false).unwrap();
        let second = registry.create_function(with_body("b+a"), true).unwrap();

        assert_eq!(second.required_version().unwrap(), "2");
        let versions = registry.versions(second.function_id());
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].function().body(), "a+b");
        assert_eq!(registry.get_function(second.function_id()).unwrap().body(), "b+a");
    }

    #[test]
    fn test_replace_with_same_definition_keeps_version() {
        let mut registry = FunctionRegistry::default();
        let first = registry.create_function(add_function(), false).unwrap();
        let again = registry.create_function(add_function(), true).unwrap();

        assert_eq!(again, first);
        assert_eq!(registry.versions(first.function_id()).len(), 1);
    }

    #[test]
    fn test_create_rejects_versioned_input() {
        let mut registry = FunctionRegistry::default();
        let versioned = add_function().with_version("1").unwrap();
        assert!(matches!(
            registry.create_function(versioned, false),
            Err(RegistryError::VersionedInput(_))
        ));
    }

    #[test]
    fn test_create_rejects_unsupported_language() {
        let mut registry = FunctionRegistry::default();
        let function = SqlInvokedFunction::builder("ns.py".parse().unwrap(), ty("bigint"))
            .routine_characteristics(RoutineCharacteristics {
                language: Language::new("python"),
                ..Default::default()
            })
            .body("return 1")
            .build(IdentitySource::Derive)
            .unwrap();

        let err = registry.create_function(function, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "language PYTHON is not supported for function ns.py()"
        );
    }

    #[test]
    fn test_insert_and_lookup_by_handle() {
        let mut registry = FunctionRegistry::default();
        let v7 = add_function().with_version("7").unwrap();
        registry.insert(v7.clone()).unwrap();
        registry.insert(v7.clone()).unwrap();

        let handle = v7.required_function_handle().unwrap();
        assert_eq!(registry.get_function_by_handle(handle), Some(&v7));
        assert_eq!(registry.versions(v7.function_id()).len(), 1);

        // Numbering continues after the highest numeric token.
        let next = registry.create_function(with_body("b+a"), true).unwrap();
        assert_eq!(next.required_version().unwrap(), "8");
    }

    #[test]
    fn test_create_after_highest_token_fails() {
        let mut registry = FunctionRegistry::default();
        let last = add_function().with_version(u64::MAX.to_string()).unwrap();
        registry.insert(last.clone()).unwrap();

        let err = registry.create_function(with_body("b+a"), true).unwrap_err();
        assert_eq!(
            err,
            RegistryError::VersionsExhausted(last.function_id().clone())
        );
        assert_eq!(registry.versions(last.function_id()).len(), 1);
    }

    #[test]
    fn test_insert_conflicting_handle() {
        let mut registry = FunctionRegistry::default();
        registry
            .insert(add_function().with_version("1").unwrap())
            .unwrap();
        let err = registry
            .insert(with_body("b+a").with_version("1").unwrap())
            .unwrap_err();
        assert!(matches!(err, RegistryError::HandleConflict(_)));
    }

    #[test]
    fn test_insert_rejects_unversioned() {
        let mut registry = FunctionRegistry::default();
        assert!(matches!(
            registry.insert(add_function()),
            Err(RegistryError::UnversionedInput(_))
        ));
    }

    #[test]
    fn test_get_functions_lists_overloads() {
        let mut registry = FunctionRegistry::default();
        registry.create_function(add_function(), false).unwrap();
        let unary = SqlInvokedFunction::builder("ns.add".parse().unwrap(), ty("bigint"))
            .parameter(Parameter::new("a", ty("bigint")))
            .body("a")
            .build(IdentitySource::Derive)
            .unwrap();
        registry.create_function(unary, false).unwrap();
        registry.create_function(total_aggregate(), false).unwrap();

        let name = "ns.add".parse().unwrap();
        let overloads = registry.get_functions(&name);
        assert_eq!(overloads.len(), 2);
        assert_eq!(overloads[0].function_id().to_string(), "ns.add(bigint)");
    }

    #[test]
    fn test_drop_function() {
        let mut registry = FunctionRegistry::default();
        registry.create_function(add_function(), false).unwrap();
        registry.create_function(total_aggregate(), false).unwrap();

        let name: QualifiedObjectName = "ns.add".parse().unwrap();
        let err = registry
            .drop_function(&name, Some(&[ty("bigint")][..]), false)
            .unwrap_err();
        assert_eq!(err.to_string(), "function ns.add(bigint) not found");
        assert_eq!(
            registry.drop_function(&name, Some(&[ty("bigint")][..]), true),
            Ok(0)
        );

        assert_eq!(registry.drop_function(&name, None, false), Ok(1));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_function(add_function().function_id()).is_none());
    }

    #[test]
    fn test_registration_time_is_recorded() {
        let before = Utc::now();
        let mut registry = FunctionRegistry::default();
        let created = registry.create_function(add_function(), false).unwrap();
        let entry = &registry.versions(created.function_id())[0];
        assert!(entry.registered_at() >= before);
        assert_eq!(entry.handle(), created.required_function_handle().unwrap());
    }
}

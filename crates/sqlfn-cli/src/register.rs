//! Feeds parsed definitions into a [`FunctionRegistry`].

use sqlfn_core::{FunctionDefinition, FunctionRegistry, SqlInvokedFunction};

use crate::input::InputSource;

/// A definition that did not make it into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub source: String,
    /// Position within the source; `None` when the whole source failed to parse.
    pub index: Option<usize>,
    /// Function name, when the definition got far enough to have one.
    pub name: Option<String>,
    pub message: String,
}

/// Registers every definition found in `sources`, collecting failures.
///
/// Unversioned definitions go through `create_function`; definitions that carry a
/// version are inserted as is.
pub fn register_sources(
    registry: &mut FunctionRegistry,
    sources: &[InputSource],
    replace: bool,
) -> Vec<Rejection> {
    let mut rejections = Vec::new();

    for source in sources {
        let values = match source.definitions() {
            Ok(values) => values,
            Err(e) => {
                rejections.push(Rejection {
                    source: source.name.clone(),
                    index: None,
                    name: None,
                    message: e.to_string(),
                });
                continue;
            }
        };
        tracing::debug!("{}: {} definition(s)", source.name, values.len());

        for (index, value) in values.into_iter().enumerate() {
            let reject = |name: Option<String>, message: String| Rejection {
                source: source.name.clone(),
                index: Some(index),
                name,
                message,
            };

            let definition: FunctionDefinition = match serde_json::from_value(value) {
                Ok(definition) => definition,
                Err(e) => {
                    rejections.push(reject(None, e.to_string()));
                    continue;
                }
            };
            let name = definition.name.to_string();
            let function = match definition.into_function() {
                Ok(function) => function,
                Err(e) => {
                    rejections.push(reject(Some(name), e.to_string()));
                    continue;
                }
            };
            if let Err(message) = register(registry, function, replace) {
                rejections.push(reject(Some(name), message));
            }
        }
    }

    rejections
}

fn register(
    registry: &mut FunctionRegistry,
    function: SqlInvokedFunction,
    replace: bool,
) -> Result<(), String> {
    let result = if function.has_version() {
        registry.insert(function)
    } else {
        registry.create_function(function, replace).map(|_| ())
    };
    result.map_err(|e| e.to_string())
}

//! Null-typed property detection and rewriting.
//!
//! Only the `components.schemas.<name>.properties.<name>` subtree is
//! inspected; schema-level mappings that are not objects or carry no
//! `properties` are skipped.

use serde_json::{Map, Value, json};
use std::fmt;

/// Schemas known to come out of the generator with a null-typed `id`.
const KNOWN_BAD_ID_SCHEMAS: [&str; 2] = ["EntityDefNew", "FieldChoiceNewApi"];

/// One property rewrite performed by a fix pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub schema: String,
    pub property: String,
}

/// A property definition that still denotes the null type.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub schema: String,
    pub property: String,
    pub definition: Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid type in {}.{}: {}",
            self.schema, self.property, self.definition
        )
    }
}

/// Whether a property definition denotes the null type.
///
/// True iff the definition is an object and either its `type` field is the
/// string `"null"` or its `enum` field is exactly `[null]`.
pub fn is_null_typed(property: &Value) -> bool {
    let Some(prop) = property.as_object() else {
        return false;
    };
    prop.get("type").is_some_and(|t| t == "null") || prop.get("enum") == Some(&json!([null]))
}

/// The replacement shape for a null-typed property.
fn nullable_string() -> Value {
    json!({ "type": "string", "nullable": true })
}

fn schemas(doc: &Value) -> Option<&Map<String, Value>> {
    doc.get("components")?.get("schemas")?.as_object()
}

fn schemas_mut(doc: &mut Value) -> Option<&mut Map<String, Value>> {
    doc.get_mut("components")?.get_mut("schemas")?.as_object_mut()
}

/// Targeted pass: fix the `id` property of the schemas known to be emitted
/// with a null type. Absent schemas or properties are skipped.
pub fn fix_none_typed_ids(mut doc: Value) -> (Value, Vec<Fix>) {
    let mut fixes = Vec::new();

    if let Some(schemas) = schemas_mut(&mut doc) {
        for name in KNOWN_BAD_ID_SCHEMAS {
            let Some(prop) = schemas
                .get_mut(name)
                .and_then(|schema| schema.get_mut("properties"))
                .and_then(|props| props.get_mut("id"))
            else {
                continue;
            };

            if is_null_typed(prop) {
                *prop = nullable_string();
                fixes.push(Fix {
                    schema: name.to_string(),
                    property: "id".to_string(),
                });
            }
        }
    }

    (doc, fixes)
}

/// General pass: fix every null-typed property of every schema.
///
/// Runs after the targeted pass and is idempotent, since a property
/// rewritten to a nullable string no longer matches the detector.
pub fn fix_invalid_schemas(mut doc: Value) -> (Value, Vec<Fix>) {
    let mut fixes = Vec::new();

    if let Some(schemas) = schemas_mut(&mut doc) {
        for (schema_name, schema) in schemas.iter_mut() {
            let Some(props) = schema.get_mut("properties").and_then(Value::as_object_mut) else {
                continue;
            };
            for (prop_name, prop) in props.iter_mut() {
                if is_null_typed(prop) {
                    *prop = nullable_string();
                    fixes.push(Fix {
                        schema: schema_name.clone(),
                        property: prop_name.clone(),
                    });
                }
            }
        }
    }

    (doc, fixes)
}

/// Check every schema property against the detector.
///
/// Returns one violation per null-typed property; an empty list means the
/// document is safe for client generation.
pub fn validate_schemas(doc: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(schemas) = schemas(doc) {
        for (schema_name, schema) in schemas {
            let Some(props) = schema.get("properties").and_then(Value::as_object) else {
                continue;
            };
            for (prop_name, prop) in props {
                if is_null_typed(prop) {
                    violations.push(Violation {
                        schema: schema_name.clone(),
                        property: prop_name.clone(),
                        definition: prop.clone(),
                    });
                }
            }
        }
    }

    violations
}

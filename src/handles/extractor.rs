/// Handle Extractor - Schema-driven discovery and extraction of handles
use crate::{
    error::{HandleError, HandleResult},
    handles::{ResolvedHandle, ID_SCHEMA_VERSION, ROOT_PATH, SELECTED_HANDLES},
    hashing::HashResolver,
    schema::SchemaCache,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, error};

/// Derive the handle-eligible field names declared by a schema document
///
/// Walks the `properties.identity.properties` block and collects every
/// direct child carrying a boolean `handle: true` attribute, in declaration
/// order. Malformed schema text propagates as a parse failure.
pub fn derive_handle_fields(schema: &str) -> Result<Vec<String>, serde_json::Error> {
    let document: Value = serde_json::from_str(schema)?;

    let mut supported = Vec::new();
    if let Some(fields) = document
        .pointer("/properties/identity/properties")
        .and_then(Value::as_object)
    {
        for (name, attributes) in fields {
            if attributes.get("handle").and_then(Value::as_bool) == Some(true) {
                supported.push(name.clone());
            }
        }
    }
    Ok(supported)
}

/// Builds the selected-handle map for identity payloads
#[derive(Clone)]
pub struct HandleExtractor {
    schemas: SchemaCache,
    hasher: HashResolver,
}

impl HandleExtractor {
    pub fn new(schemas: SchemaCache, hasher: HashResolver) -> Self {
        Self { schemas, hasher }
    }

    /// Convert an arbitrary identity value into a structured JSON mapping
    pub fn convert_to_map<T: Serialize>(identity: &T) -> HandleResult<Map<String, Value>> {
        match serde_json::to_value(identity) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(HandleError::InvalidInput("request".to_string())),
            Err(e) => {
                error!("Failed to convert identity payload: {}", e);
                Err(HandleError::InvalidInput("request".to_string()))
            }
        }
    }

    /// Build the map of selected handles for an identity payload
    ///
    /// Reads the schema version from the payload's wrapper, filters the
    /// requested field ids against that version's handle-field list (ids the
    /// schema does not declare are dropped, not an error), and hashes a
    /// lowercased `<value>@<fieldId>` handle for each retained field.
    ///
    /// Returns an empty map when the wrapper or the selection list is absent
    /// or null. A retained field whose value is missing or not a scalar
    /// fails with `InvalidInput`.
    pub async fn build_handle_map<T: Serialize>(
        &self,
        identity: &T,
    ) -> HandleResult<HashMap<String, ResolvedHandle>> {
        let request = Self::convert_to_map(identity)?;

        let wrapper = match request.get(ROOT_PATH) {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => return Ok(HashMap::new()),
            Some(_) => return Err(HandleError::InvalidInput(ROOT_PATH.to_string())),
        };

        let selected = match wrapper.get(SELECTED_HANDLES) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => return Ok(HashMap::new()),
            Some(_) => return Err(HandleError::InvalidInput(SELECTED_HANDLES.to_string())),
        };
        debug!("Selected handle fields: {:?}", selected);

        let schema_version = version_text(wrapper.get(ID_SCHEMA_VERSION));
        let schema = self.schemas.get_schema(schema_version.as_deref()).await?;

        let mut handles = HashMap::new();
        for item in selected {
            let field_id = item
                .as_str()
                .ok_or_else(|| HandleError::InvalidInput(SELECTED_HANDLES.to_string()))?;

            if !schema.supports_handle(field_id) {
                debug!("Dropping unsupported handle field {}", field_id);
                continue;
            }

            let value = scalar_text(wrapper.get(field_id))
                .ok_or_else(|| HandleError::InvalidInput(field_id.to_string()))?;

            let handle = format!("{}@{}", value, field_id).to_lowercase();
            let hash = self.hasher.hash_handle(&handle)?;
            handles.insert(field_id.to_string(), ResolvedHandle { handle, hash });
        }

        Ok(handles)
    }
}

/// String form of the schema-version value; absent and null are distinct
/// from the literal string "null", which passes through to the cache
fn version_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Text form of a scalar field value; lists, maps, null, and absent values
/// have no text form
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

//! Synthesizer configuration.
//!
//! [`JsonConfig`] carries the four method-name templates. A template that is
//! absent or empty disables its operation. When a configuration is
//! deserialized, keys that are not present fall back to the stock names
//! (`toJson`, `fromJsonTo<TypeName>`, ...); an explicit empty string is the
//! way to switch an operation off.
//!
//! [`SerializerProfile`] describes the serialization library the generated
//! bodies call into.

use serde::{Deserialize, Serialize};
use weave_common::TypeRef;

use crate::body::JsonOperation;

/// Method-name templates, one per operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonConfig {
    pub to_json_method: Option<String>,
    pub from_json_method: Option<String>,
    pub to_json_array_method: Option<String>,
    pub from_json_array_method: Option<String>,
}

impl Default for JsonConfig {
    fn default() -> Self {
        JsonConfig {
            to_json_method: Some("toJson".to_string()),
            from_json_method: Some("fromJsonTo<TypeName>".to_string()),
            to_json_array_method: Some("toJsonArray".to_string()),
            from_json_array_method: Some("fromJsonArrayTo<TypeNamePlural>".to_string()),
        }
    }
}

impl JsonConfig {
    /// A configuration with every operation switched off.
    pub fn disabled() -> Self {
        JsonConfig {
            to_json_method: None,
            from_json_method: None,
            to_json_array_method: None,
            from_json_array_method: None,
        }
    }

    /// The raw template for `op`.
    pub fn template(&self, op: JsonOperation) -> Option<&str> {
        match op {
            JsonOperation::ToJson => self.to_json_method.as_deref(),
            JsonOperation::FromJson => self.from_json_method.as_deref(),
            JsonOperation::ToJsonArray => self.to_json_array_method.as_deref(),
            JsonOperation::FromJsonArray => self.from_json_array_method.as_deref(),
        }
    }

    pub fn with_template(mut self, op: JsonOperation, template: Option<&str>) -> Self {
        let slot = match op {
            JsonOperation::ToJson => &mut self.to_json_method,
            JsonOperation::FromJson => &mut self.from_json_method,
            JsonOperation::ToJsonArray => &mut self.to_json_array_method,
            JsonOperation::FromJsonArray => &mut self.from_json_array_method,
        };
        *slot = template.map(str::to_string);
        self
    }
}

/// Field-name patterns the serializer is told to skip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionPolicy(Vec<String>);

impl ExclusionPolicy {
    /// Suppress the `class` metadata field at any depth.
    pub fn meta_fields() -> Self {
        ExclusionPolicy(vec!["*.class".to_string()])
    }

    pub fn none() -> Self {
        ExclusionPolicy(Vec::new())
    }

    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        ExclusionPolicy::meta_fields()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionPolicy {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExclusionPolicy(iter.into_iter().map(Into::into).collect())
    }
}

/// The serialization library generated bodies call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerProfile {
    pub serializer: TypeRef,
    pub deserializer: TypeRef,
    pub exclude: ExclusionPolicy,
}

impl Default for SerializerProfile {
    fn default() -> Self {
        SerializerProfile {
            serializer: TypeRef::new("flexjson.JSONSerializer"),
            deserializer: TypeRef::new("flexjson.JSONDeserializer"),
            exclude: ExclusionPolicy::default(),
        }
    }
}

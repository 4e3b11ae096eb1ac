//! Message tree and merged options data model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named format option records (`numberFormats` / `datetimeFormats`)
pub type FormatTable = IndexMap<String, Value>;

/// A user-authored message tree
///
/// Object keys keep their source order, which the generated declaration mirrors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum MessageTree {
    Object(IndexMap<String, MessageTree>),
    Array(Vec<MessageTree>),
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    /// Zero-argument message function computed at runtime
    Function,
}

impl MessageTree {
    /// Creates an empty object tree
    pub fn empty() -> Self {
        MessageTree::Object(IndexMap::new())
    }

    /// Builds an object tree from key/value pairs, keeping their order
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MessageTree)>,
    {
        MessageTree::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn string(value: impl Into<String>) -> Self {
        MessageTree::String(value.into())
    }

    /// Primitive type tag of a leaf value, as the host type system spells it
    ///
    /// `null` reports `object`, mirroring the runtime `typeof` operator.
    pub fn runtime_type_name(&self) -> &'static str {
        match self {
            MessageTree::Object(_) | MessageTree::Null => "object",
            MessageTree::Array(_) => "unknown[]",
            MessageTree::String(_) => "string",
            MessageTree::Number(_) => "number",
            MessageTree::Boolean(_) => "boolean",
            MessageTree::Function => "() => string",
        }
    }

    /// Own entries when this node is an object
    pub fn entries(&self) -> Option<&IndexMap<String, MessageTree>> {
        match self {
            MessageTree::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Total number of nodes below and including this one
    pub fn node_count(&self) -> usize {
        match self {
            MessageTree::Object(map) => 1 + map.values().map(Self::node_count).sum::<usize>(),
            MessageTree::Array(items) => 1 + items.iter().map(Self::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}

impl Default for MessageTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for MessageTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                MessageTree::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => MessageTree::Array(items.into_iter().map(Into::into).collect()),
            Value::String(s) => MessageTree::String(s),
            Value::Number(n) => MessageTree::Number(n),
            Value::Bool(b) => MessageTree::Boolean(b),
            Value::Null => MessageTree::Null,
        }
    }
}

impl Serialize for MessageTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MessageTree::Object(map) => map.serialize(serializer),
            MessageTree::Array(items) => items.serialize(serializer),
            MessageTree::String(s) => serializer.serialize_str(s),
            MessageTree::Number(n) => n.serialize(serializer),
            MessageTree::Boolean(b) => serializer.serialize_bool(*b),
            // Functions have no JSON form
            MessageTree::Null | MessageTree::Function => serializer.serialize_unit(),
        }
    }
}

/// Snapshot of merged runtime options returned by the data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedOptions {
    #[serde(default)]
    pub messages: MessageTree,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub number_formats: FormatTable,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub datetime_formats: FormatTable,
}

/// Treats an explicit `null` table like a missing one
fn null_as_empty<'de, D>(deserializer: D) -> Result<FormatTable, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<FormatTable>::deserialize(deserializer)?.unwrap_or_default())
}

impl MergedOptions {
    pub fn with_messages(messages: MessageTree) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }
}

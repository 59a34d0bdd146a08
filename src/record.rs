//! Record data model and its structured wire form.
//!
//! A [`Record`] maps attribute names to typed values. On the wire every value is
//! a one-entry object from a type tag to the raw string, e.g. `{"S": "alice"}` or
//! `{"N": "42"}`. Numbers stay strings end to end so no precision is lost.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed attribute value in its wire form.
///
/// Serde's externally tagged enum representation is exactly the protocol's
/// `{tag: value}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String attribute, tag `S`
    #[serde(rename = "S")]
    String(String),
    /// Numeric attribute carried as its decimal text, tag `N`
    #[serde(rename = "N")]
    Number(String),
    /// Binary attribute as base64 text, tag `B`
    #[serde(rename = "B")]
    Blob(String),
}

impl AttributeValue {
    /// Raw string payload, regardless of type.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeValue::String(s) | AttributeValue::Number(s) | AttributeValue::Blob(s) => s,
        }
    }

    /// Wire tag of this value.
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "S",
            AttributeValue::Number(_) => "N",
            AttributeValue::Blob(_) => "B",
        }
    }
}

/// One storable unit: attribute name to typed value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub BTreeMap<String, AttributeValue>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    /// Looks up an attribute.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Attribute names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Decodes a record from its structured JSON form.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encodes a record to its structured JSON form.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl FromIterator<(String, AttributeValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of a `PutItem` request: the key attributes and the remaining attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutItemDocument {
    /// Attributes identifying the item
    #[serde(rename = "Key")]
    pub key: Record,
    /// All other attributes
    #[serde(rename = "Item")]
    pub item: Record,
}

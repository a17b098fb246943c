use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored or indexable field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),

    /// Keyword content that is indexed as a single, untokenized term.
    String(String),

    /// Text content that is analyzed into terms.
    Text(String),

    /// List of keyword values (e.g. tags).
    List(Vec<String>),
}

impl DataValue {
    /// Render this value as a unique key.
    ///
    /// Returns `None` for values that cannot identify a document
    /// (`Null` and lists).
    pub fn to_key_string(&self) -> Option<String> {
        match self {
            DataValue::Text(s) | DataValue::String(s) => Some(s.clone()),
            DataValue::Int64(i) => Some(i.to_string()),
            DataValue::Float64(f) => Some(f.to_string()),
            DataValue::Bool(b) => Some(b.to_string()),
            DataValue::Null | DataValue::List(_) => None,
        }
    }
}

/// A document is a collection of named fields, each containing a `DataValue`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Field data.
    pub fields: HashMap<String, DataValue>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a text field.
    pub fn add_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), DataValue::Text(text.into()));
        self
    }

    /// Add a keyword field (indexed as a single term).
    pub fn add_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), DataValue::String(value.into()));
        self
    }

    /// Add an integer field.
    pub fn add_integer(mut self, name: impl Into<String>, value: i64) -> Self {
        self.fields.insert(name.into(), DataValue::Int64(value));
        self
    }

    /// Get a reference to a field's value.
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_string() {
        assert_eq!(
            DataValue::String("doc1".into()).to_key_string(),
            Some("doc1".to_string())
        );
        assert_eq!(DataValue::Int64(42).to_key_string(), Some("42".to_string()));
        assert_eq!(DataValue::Null.to_key_string(), None);
        assert_eq!(DataValue::List(vec!["a".into()]).to_key_string(), None);
    }

    #[test]
    fn test_document_builder() {
        let doc = Document::new()
            .add_string("id", "a")
            .add_text("body", "hello world")
            .add_integer("id", 7);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("id"), Some(&DataValue::Int64(7)));
        assert_eq!(
            doc.get("body"),
            Some(&DataValue::Text("hello world".to_string()))
        );
    }
}

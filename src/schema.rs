//! Field declarations and the unique key of an index.
//!
//! The schema decides, per field, whether values are indexed, stored, and
//! whether term vectors are captured. Term vectors may additionally record
//! positions and character offsets; a reader can only report what was
//! captured here at index time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, TermVectorError};

/// Schema of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the field that identifies documents across sessions.
    pub unique_key: String,
    /// Options for each field.
    pub fields: HashMap<String, FieldOption>,
}

impl Schema {
    pub fn builder(unique_key: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            unique_key: unique_key.into(),
            fields: HashMap::new(),
        }
    }

    /// The declared unique key field name.
    pub fn unique_key(&self) -> &str {
        &self.unique_key
    }

    pub fn field(&self, name: &str) -> Option<&FieldOption> {
        self.fields.get(name)
    }

    /// Check that the unique key is declared and stored.
    pub fn validate(&self) -> Result<()> {
        match self.fields.get(&self.unique_key) {
            Some(option) if option.is_stored() => Ok(()),
            Some(_) => Err(TermVectorError::invalid_config(format!(
                "unique key field '{}' must be stored",
                self.unique_key
            ))),
            None => Err(TermVectorError::invalid_config(format!(
                "unique key field '{}' is not declared",
                self.unique_key
            ))),
        }
    }
}

/// Options for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldOption {
    /// Analyzed full-text field.
    Text(TextOption),
    /// Untokenized field; each value is one term.
    Keyword(KeywordOption),
}

impl FieldOption {
    pub fn is_indexed(&self) -> bool {
        match self {
            FieldOption::Text(opt) => opt.indexed,
            FieldOption::Keyword(opt) => opt.indexed,
        }
    }

    pub fn is_stored(&self) -> bool {
        match self {
            FieldOption::Text(opt) => opt.stored,
            FieldOption::Keyword(opt) => opt.stored,
        }
    }

    /// Returns the text option if this is a text field.
    pub fn as_text(&self) -> Option<&TextOption> {
        match self {
            FieldOption::Text(opt) => Some(opt),
            _ => None,
        }
    }
}

/// Options for Text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOption {
    /// Whether to index this field for search.
    #[serde(default = "default_true")]
    pub indexed: bool,

    /// Whether to store the original field value.
    #[serde(default = "default_true")]
    pub stored: bool,

    /// Whether to store term vectors.
    #[serde(default)]
    pub term_vectors: bool,

    /// Whether term vectors record token positions.
    #[serde(default)]
    pub term_positions: bool,

    /// Whether term vectors record character offsets.
    #[serde(default)]
    pub term_offsets: bool,
}

impl TextOption {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    pub fn term_vectors(mut self, term_vectors: bool) -> Self {
        self.term_vectors = term_vectors;
        self
    }

    /// Capture positions in term vectors. Implies `term_vectors`.
    pub fn term_positions(mut self, term_positions: bool) -> Self {
        self.term_positions = term_positions;
        self.term_vectors |= term_positions;
        self
    }

    /// Capture offsets in term vectors. Implies `term_vectors`.
    pub fn term_offsets(mut self, term_offsets: bool) -> Self {
        self.term_offsets = term_offsets;
        self.term_vectors |= term_offsets;
        self
    }

    /// Term vectors with both positions and offsets.
    pub fn with_full_term_vectors() -> Self {
        Self::default().term_positions(true).term_offsets(true)
    }
}

impl Default for TextOption {
    fn default() -> Self {
        Self {
            indexed: true,
            stored: true,
            term_vectors: false,
            term_positions: false,
            term_offsets: false,
        }
    }
}

/// Options for Keyword fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOption {
    #[serde(default = "default_true")]
    pub indexed: bool,

    #[serde(default = "default_true")]
    pub stored: bool,
}

impl Default for KeywordOption {
    fn default() -> Self {
        Self {
            indexed: true,
            stored: true,
        }
    }
}

fn default_true() -> bool {
    true
}

pub struct SchemaBuilder {
    unique_key: String,
    fields: HashMap<String, FieldOption>,
}

impl SchemaBuilder {
    pub fn add_field(mut self, name: impl Into<String>, option: FieldOption) -> Self {
        let name = name.into();
        self.fields.insert(name, option);
        self
    }

    pub fn add_text_field(self, name: impl Into<String>, option: TextOption) -> Self {
        self.add_field(name, FieldOption::Text(option))
    }

    pub fn add_keyword_field(self, name: impl Into<String>, option: KeywordOption) -> Self {
        self.add_field(name, FieldOption::Keyword(option))
    }

    pub fn build(self) -> Schema {
        Schema {
            unique_key: self.unique_key,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_imply_term_vectors() {
        let opt = TextOption::default().term_positions(true);
        assert!(opt.term_vectors);
        assert!(opt.term_positions);
        assert!(!opt.term_offsets);
    }

    #[test]
    fn test_validate_unique_key() {
        let schema = Schema::builder("id")
            .add_keyword_field("id", KeywordOption::default())
            .build();
        assert!(schema.validate().is_ok());

        let undeclared = Schema::builder("id")
            .add_text_field("body", TextOption::default())
            .build();
        assert!(matches!(
            undeclared.validate(),
            Err(TermVectorError::InvalidConfig(_))
        ));

        let unstored = Schema::builder("id")
            .add_keyword_field(
                "id",
                KeywordOption {
                    indexed: true,
                    stored: false,
                },
            )
            .build();
        assert!(unstored.validate().is_err());
    }

    #[test]
    fn test_schema_json() {
        let json = r#"{
            "unique_key": "id",
            "fields": {
                "id": { "type": "keyword", "options": {} },
                "body": { "type": "text", "options": { "term_vectors": true, "term_offsets": true } }
            }
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        let body = schema.field("body").and_then(|f| f.as_text()).unwrap();
        assert!(body.indexed);
        assert!(body.term_vectors);
        assert!(body.term_offsets);
        assert!(!body.term_positions);
        assert!(schema.validate().is_ok());
    }
}

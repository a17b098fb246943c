//! In-memory index reader.
//!
//! [`MemoryIndex`] analyzes a batch of documents against a [`Schema`] and
//! keeps stored fields, per-document term vectors and a per-field term
//! dictionary in memory. It is immutable once built; publish a new one
//! through a [`SnapshotManager`](crate::index::SnapshotManager) to change
//! the visible data.
//!
//! Term vectors list fields in name order and terms in order of their first
//! occurrence within the field.
//!
//! Snapshots can be written to and loaded from a JSON file holding the schema
//! and the source documents; loading re-analyzes the documents, so document
//! ids are assigned in the same order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::{Token, keyword_token, tokenize};
use crate::data::{DataValue, Document};
use crate::error::{Result, TermVectorError};
use crate::index::reader::{FieldSelector, IndexReader};
use crate::index::term_vector::{DocumentTermVectors, FieldTermVector, TermOffset, TermVectorEntry};
use crate::schema::{FieldOption, Schema};

#[derive(Debug)]
struct IndexedDocument {
    stored: Document,
    term_vectors: DocumentTermVectors,
}

/// On-disk form of a memory index.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    schema: Schema,
    documents: Vec<Document>,
}

/// Immutable in-memory index.
#[derive(Debug)]
pub struct MemoryIndex {
    schema: Schema,
    source: Vec<Document>,
    docs: Vec<IndexedDocument>,
    /// field -> term -> number of documents containing the term.
    doc_freqs: AHashMap<String, AHashMap<String, u32>>,
    closed: AtomicBool,
}

impl MemoryIndex {
    pub fn builder(schema: Schema) -> MemoryIndexBuilder {
        MemoryIndexBuilder {
            schema,
            documents: Vec::new(),
        }
    }

    /// Load a snapshot previously written with [`MemoryIndex::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let snapshot: SnapshotFile = serde_json::from_reader(BufReader::new(file))?;
        MemoryIndex::builder(snapshot.schema)
            .add_documents(snapshot.documents)
            .build()
    }

    /// Write the schema and source documents to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let snapshot = SnapshotFile {
            schema: self.schema.clone(),
            documents: self.source.clone(),
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(TermVectorError::index("index reader is closed"));
        }
        Ok(())
    }

    fn document(&self, doc_id: u64) -> Result<&IndexedDocument> {
        self.check_open()?;
        usize::try_from(doc_id)
            .ok()
            .and_then(|i| self.docs.get(i))
            .ok_or_else(|| {
                TermVectorError::index(format!(
                    "document {doc_id} out of range (max_doc {})",
                    self.docs.len()
                ))
            })
    }
}

impl IndexReader for MemoryIndex {
    fn max_doc(&self) -> u64 {
        self.docs.len() as u64
    }

    fn term_vectors(&self, doc_id: u64) -> Result<Option<DocumentTermVectors>> {
        let doc = self.document(doc_id)?;
        if doc.term_vectors.fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(doc.term_vectors.clone()))
    }

    fn stored_fields(&self, doc_id: u64, selector: &FieldSelector) -> Result<Document> {
        let doc = self.document(doc_id)?;
        let fields = doc
            .stored
            .fields
            .iter()
            .filter(|(name, _)| selector.accepts(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Ok(Document { fields })
    }

    fn doc_freq(&self, field: &str, term: &str) -> Result<Option<u32>> {
        self.check_open()?;
        Ok(self
            .doc_freqs
            .get(field)
            .and_then(|terms| terms.get(term))
            .copied())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

/// Builder collecting documents for a [`MemoryIndex`].
#[derive(Debug)]
pub struct MemoryIndexBuilder {
    schema: Schema,
    documents: Vec<Document>,
}

impl MemoryIndexBuilder {
    /// Add a document. Its id is its position in insertion order.
    pub fn add_document(mut self, doc: Document) -> Self {
        self.documents.push(doc);
        self
    }

    pub fn add_documents(mut self, docs: impl IntoIterator<Item = Document>) -> Self {
        self.documents.extend(docs);
        self
    }

    /// Analyze all documents and build the index.
    pub fn build(self) -> Result<MemoryIndex> {
        self.schema.validate()?;

        let mut doc_freqs: AHashMap<String, AHashMap<String, u32>> = AHashMap::new();
        let mut docs = Vec::with_capacity(self.documents.len());

        for doc in &self.documents {
            docs.push(analyze_document(&self.schema, doc, &mut doc_freqs));
        }

        Ok(MemoryIndex {
            schema: self.schema,
            source: self.documents,
            docs,
            doc_freqs,
            closed: AtomicBool::new(false),
        })
    }
}

fn analyze_document(
    schema: &Schema,
    doc: &Document,
    doc_freqs: &mut AHashMap<String, AHashMap<String, u32>>,
) -> IndexedDocument {
    let mut names: Vec<&String> = doc.fields.keys().collect();
    names.sort();

    let mut stored = Document::new();
    let mut term_vectors = DocumentTermVectors::default();

    for name in names {
        let value = &doc.fields[name];
        let Some(option) = schema.field(name) else {
            log::trace!("skipping undeclared field '{name}'");
            continue;
        };

        if option.is_stored() {
            stored.fields.insert(name.clone(), value.clone());
        }
        if !option.is_indexed() {
            continue;
        }

        let tokens = analyze_value(option, value);

        let field_terms = doc_freqs.entry(name.clone()).or_default();
        let mut seen: AHashSet<&str> = AHashSet::new();
        for token in &tokens {
            if seen.insert(token.text.as_str()) {
                *field_terms.entry(token.text.clone()).or_insert(0) += 1;
            }
        }

        if let Some(text) = option.as_text().filter(|opt| opt.term_vectors) {
            let vector = build_term_vector(name, text.term_positions, text.term_offsets, &tokens);
            if !vector.is_empty() {
                term_vectors.fields.push(vector);
            }
        }
    }

    IndexedDocument {
        stored,
        term_vectors,
    }
}

fn analyze_value(option: &FieldOption, value: &DataValue) -> Vec<Token> {
    match (option, value) {
        (FieldOption::Text(_), DataValue::Text(s) | DataValue::String(s)) => tokenize(s),
        (FieldOption::Text(_), DataValue::List(items)) => tokenize(&items.join(" ")),
        (FieldOption::Keyword(_), DataValue::List(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| keyword_token(item, i as u32))
            .collect(),
        (FieldOption::Text(_), other) => other
            .to_key_string()
            .map(|s| tokenize(&s))
            .unwrap_or_default(),
        (FieldOption::Keyword(_), other) => other
            .to_key_string()
            .map(|s| vec![keyword_token(&s, 0)])
            .unwrap_or_default(),
    }
}

fn build_term_vector(
    field: &str,
    with_positions: bool,
    with_offsets: bool,
    tokens: &[Token],
) -> FieldTermVector {
    let mut vector = FieldTermVector::new(field, with_positions, with_offsets);
    let mut slots: AHashMap<&str, usize> = AHashMap::new();

    for token in tokens {
        let slot = *slots.entry(token.text.as_str()).or_insert_with(|| {
            vector.terms.push(TermVectorEntry {
                term: token.text.clone(),
                freq: 0,
                positions: Vec::new(),
                offsets: Vec::new(),
            });
            vector.terms.len() - 1
        });

        let entry = &mut vector.terms[slot];
        entry.freq += 1;
        if with_positions {
            entry.positions.push(token.position);
        }
        if with_offsets {
            entry.offsets.push(TermOffset {
                start: token.start_offset,
                end: token.end_offset,
            });
        }
    }

    vector
}

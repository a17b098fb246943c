//! Per-term statistics from a document's term vectors.
//!
//! [`TermStatsExtractor::field_stats`] walks one field's term vector lazily,
//! yielding a [`TermStat`] per term in index order with only the requested
//! attributes set. Positions and offsets are reported only if the field
//! captured them at index time.

use std::slice;

use crate::error::Result;
use crate::index::reader::IndexReader;
use crate::index::term_vector::{FieldTermVector, TermVectorEntry};
use crate::termvectors::params::TermVectorOptions;
use crate::termvectors::response::{FieldVector, TermStat};

/// Term dictionary lookups bound to one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldTermKey<'a> {
    field: &'a str,
}

impl<'a> FieldTermKey<'a> {
    pub fn new(field: &'a str) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &'a str {
        self.field
    }

    /// Documents containing `term` in this field.
    ///
    /// Never less than 1: a term missing from the dictionary counts as
    /// occurring in one document.
    pub fn doc_freq(&self, reader: &dyn IndexReader, term: &str) -> Result<u32> {
        Ok(reader.doc_freq(self.field, term)?.unwrap_or(1).max(1))
    }
}

/// Extracts term statistics for documents of one snapshot.
#[derive(Debug)]
pub struct TermStatsExtractor<'a> {
    reader: &'a dyn IndexReader,
    options: &'a TermVectorOptions,
}

impl<'a> TermStatsExtractor<'a> {
    pub fn new(reader: &'a dyn IndexReader, options: &'a TermVectorOptions) -> Self {
        Self { reader, options }
    }

    /// Field vectors of `doc_id` for every selected field that has term vectors.
    pub fn extract(&self, doc_id: u64) -> Result<Vec<FieldVector>> {
        let Some(vectors) = self.reader.term_vectors(doc_id)? else {
            return Ok(Vec::new());
        };

        let mut fields = Vec::with_capacity(vectors.fields.len());
        for field in &vectors.fields {
            if !self.options.includes_field(&field.field) {
                continue;
            }
            let terms = self.field_stats(field).collect::<Result<Vec<_>>>()?;
            fields.push(FieldVector {
                field: field.field.clone(),
                terms,
            });
        }
        Ok(fields)
    }

    /// Lazily compute statistics for each term of `field`.
    pub fn field_stats<'f>(&self, field: &'f FieldTermVector) -> FieldTermStats<'f>
    where
        'a: 'f,
    {
        FieldTermStats {
            reader: self.reader,
            options: self.options,
            key: self
                .options
                .needs_doc_freq()
                .then(|| FieldTermKey::new(&field.field)),
            use_offsets: field.has_offsets && self.options.offsets,
            use_positions: field.has_positions && self.options.positions,
            terms: field.terms.iter(),
        }
    }
}

/// Iterator over the term statistics of one field.
#[derive(Debug)]
pub struct FieldTermStats<'a> {
    reader: &'a dyn IndexReader,
    options: &'a TermVectorOptions,
    key: Option<FieldTermKey<'a>>,
    use_offsets: bool,
    use_positions: bool,
    terms: slice::Iter<'a, TermVectorEntry>,
}

impl FieldTermStats<'_> {
    fn stat(&self, entry: &TermVectorEntry) -> Result<TermStat> {
        let doc_freq = match &self.key {
            Some(key) => Some(key.doc_freq(self.reader, &entry.term)?),
            None => None,
        };

        Ok(TermStat {
            term: entry.term.clone(),
            freq: self.options.freq.then_some(entry.freq),
            offsets: self.use_offsets.then(|| entry.offsets.clone()),
            positions: self.use_positions.then(|| entry.positions.clone()),
            doc_freq: doc_freq.filter(|_| self.options.doc_freq),
            ratio: doc_freq
                .filter(|_| self.options.ratio)
                .map(|df| f64::from(entry.freq) / f64::from(df)),
        })
    }
}

impl Iterator for FieldTermStats<'_> {
    type Item = Result<TermStat>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.terms.next()?;
        Some(self.stat(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.terms.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Document;
    use crate::index::memory::MemoryIndex;
    use crate::schema::{KeywordOption, Schema, TextOption};

    fn index() -> MemoryIndex {
        let schema = Schema::builder("id")
            .add_keyword_field("id", KeywordOption::default())
            .add_text_field("title", TextOption::with_full_term_vectors())
            .add_text_field("body", TextOption::default().term_vectors(true))
            .build();
        MemoryIndex::builder(schema)
            .add_document(
                Document::new()
                    .add_string("id", "a")
                    .add_text("title", "rust rust search")
                    .add_text("body", "fast search"),
            )
            .add_document(
                Document::new()
                    .add_string("id", "b")
                    .add_text("title", "search engines"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_freq_only() {
        let index = index();
        let options = TermVectorOptions {
            freq: true,
            ..TermVectorOptions::new()
        };
        let fields = TermStatsExtractor::new(&index, &options).extract(0).unwrap();

        let title = fields.iter().find(|f| f.field == "title").unwrap();
        let rust = title.term("rust").unwrap();
        assert_eq!(rust.freq, Some(2));
        assert!(rust.positions.is_none());
        assert!(rust.offsets.is_none());
        assert!(rust.doc_freq.is_none());
        assert!(rust.ratio.is_none());
    }

    #[test]
    fn test_positions_and_offsets_require_capture() {
        let index = index();
        let options = TermVectorOptions::all();
        let fields = TermStatsExtractor::new(&index, &options).extract(0).unwrap();

        let title = fields.iter().find(|f| f.field == "title").unwrap();
        assert_eq!(title.term("rust").unwrap().positions, Some(vec![0, 1]));
        assert!(title.term("rust").unwrap().offsets.is_some());

        let body = fields.iter().find(|f| f.field == "body").unwrap();
        let search = body.term("search").unwrap();
        assert!(search.positions.is_none());
        assert!(search.offsets.is_none());
        assert_eq!(search.freq, Some(1));
    }

    #[test]
    fn test_doc_freq_and_ratio() {
        let index = index();
        let options = TermVectorOptions {
            doc_freq: true,
            ratio: true,
            ..TermVectorOptions::new()
        };
        let fields = TermStatsExtractor::new(&index, &options).extract(0).unwrap();
        let title = fields.iter().find(|f| f.field == "title").unwrap();

        let search = title.term("search").unwrap();
        assert_eq!(search.doc_freq, Some(2));
        assert_eq!(search.ratio, Some(0.5));
        assert!(search.freq.is_none());

        let rust = title.term("rust").unwrap();
        assert_eq!(rust.doc_freq, Some(1));
        assert_eq!(rust.ratio, Some(2.0));
    }

    #[test]
    fn test_ratio_without_doc_freq() {
        let index = index();
        let options = TermVectorOptions {
            ratio: true,
            ..TermVectorOptions::new()
        };
        let fields = TermStatsExtractor::new(&index, &options).extract(1).unwrap();
        let engines = fields[0].term("engines").unwrap();
        assert!(engines.doc_freq.is_none());
        assert_eq!(engines.ratio, Some(1.0));
    }

    #[test]
    fn test_field_filter() {
        let index = index();
        let options = TermVectorOptions::all().with_fields(["body"]);
        let fields = TermStatsExtractor::new(&index, &options).extract(0).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "body");
    }

    #[test]
    fn test_missing_term_floors_to_one() {
        let index = index();
        let key = FieldTermKey::new("title");
        assert_eq!(key.doc_freq(&index, "nonexistent").unwrap(), 1);
        assert_eq!(key.doc_freq(&index, "search").unwrap(), 2);
    }

    #[test]
    fn test_lazy_iteration_order() {
        let index = index();
        let options = TermVectorOptions::new();
        let extractor = TermStatsExtractor::new(&index, &options);
        let vectors = index.term_vectors(0).unwrap().unwrap();
        let title = vectors.field("title").unwrap();

        let mut stats = extractor.field_stats(title);
        assert_eq!(stats.size_hint(), (2, Some(2)));
        let first = stats.next().unwrap().unwrap();
        assert_eq!(first.term, "rust");
        assert!(first.is_bare());
        assert_eq!(stats.next().unwrap().unwrap().term, "search");
        assert!(stats.next().is_none());
    }
}

use crate::data::DataValue;
use crate::error::{Result, TermVectorError};
use crate::index::reader::{FieldSelector, IndexReader};
use crate::termvectors::extractor::TermStatsExtractor;
use crate::termvectors::params::TermVectorOptions;
use crate::termvectors::response::{DocumentVector, TermVectorsResponse};

/// Builds a [`TermVectorsResponse`] for a sequence of documents.
///
/// Documents are appended in iteration order. The first failure aborts the
/// whole response.
#[derive(Debug)]
pub struct ResponseAssembler<'a> {
    reader: &'a dyn IndexReader,
    extractor: TermStatsExtractor<'a>,
    unique_key_field: &'a str,
    /// Loads only the unique key when resolving stored fields.
    selector: FieldSelector,
}

impl<'a> ResponseAssembler<'a> {
    pub fn new(
        reader: &'a dyn IndexReader,
        options: &'a TermVectorOptions,
        unique_key_field: &'a str,
    ) -> Self {
        Self {
            reader,
            extractor: TermStatsExtractor::new(reader, options),
            unique_key_field,
            selector: FieldSelector::single(unique_key_field),
        }
    }

    pub fn assemble(&self, doc_ids: impl IntoIterator<Item = u64>) -> Result<TermVectorsResponse> {
        let mut response = TermVectorsResponse::new(self.unique_key_field);
        for doc_id in doc_ids {
            log::trace!("extracting term vectors for document {doc_id}");
            response.push(self.document_vector(doc_id)?);
        }
        Ok(response)
    }

    pub fn document_vector(&self, doc_id: u64) -> Result<DocumentVector> {
        let unique_key = self.unique_key(doc_id)?;
        let fields = self.extractor.extract(doc_id)?;
        Ok(DocumentVector {
            doc_id,
            unique_key,
            fields,
        })
    }

    fn unique_key(&self, doc_id: u64) -> Result<String> {
        let stored = self.reader.stored_fields(doc_id, &self.selector)?;
        stored
            .get(self.unique_key_field)
            .and_then(DataValue::to_key_string)
            .ok_or_else(|| TermVectorError::MissingUniqueKey {
                doc_id,
                field: self.unique_key_field.to_string(),
            })
    }
}

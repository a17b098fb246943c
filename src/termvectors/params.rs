//! Request parameters of the term vector component.
//!
//! | Parameter      | Meaning                                                 |
//! |----------------|---------------------------------------------------------|
//! | `tv`           | enable the component                                    |
//! | `tv.tf`        | term frequency within the document                      |
//! | `tv.positions` | token positions                                         |
//! | `tv.offsets`   | character offsets                                       |
//! | `tv.df`        | document frequency of the term in its field             |
//! | `tv.tf_idf`    | `tf / df` (a plain ratio, not a log-scaled TF-IDF)      |
//! | `tv.all`       | all five of the above                                   |
//! | `tv.fl`        | fields to report; falls back to `fl`                    |
//! | `tv.docIds`    | explicit document ids, comma or space separated         |

use std::collections::HashSet;

use crate::error::{Result, TermVectorError};
use crate::request::{FIELD_LIST, RequestParams};

pub const TV: &str = "tv";
pub const TF: &str = "tv.tf";
pub const POSITIONS: &str = "tv.positions";
pub const OFFSETS: &str = "tv.offsets";
pub const DF: &str = "tv.df";
pub const TF_IDF: &str = "tv.tf_idf";
pub const ALL: &str = "tv.all";
pub const FIELDS: &str = "tv.fl";
pub const DOC_IDS: &str = "tv.docIds";

/// Resolved options of one term vector request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVectorOptions {
    pub freq: bool,
    pub positions: bool,
    pub offsets: bool,
    pub doc_freq: bool,
    pub ratio: bool,
    /// Fields to report. Empty means every field.
    pub fields: HashSet<String>,
    /// Documents to report instead of the result list.
    pub doc_ids: Option<Vec<u64>>,
}

impl TermVectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every per-term attribute enabled.
    pub fn all() -> Self {
        Self {
            freq: true,
            positions: true,
            offsets: true,
            doc_freq: true,
            ratio: true,
            ..Self::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_doc_ids(mut self, doc_ids: Vec<u64>) -> Self {
        self.doc_ids = Some(doc_ids);
        self
    }

    /// Resolve options from request parameters.
    ///
    /// Fails with a client error if a flag is not a boolean or a document id
    /// is not an unsigned integer.
    pub fn from_params(params: &RequestParams) -> Result<Self> {
        let mut options = Self {
            freq: params.get_bool(TF, false)?,
            positions: params.get_bool(POSITIONS, false)?,
            offsets: params.get_bool(OFFSETS, false)?,
            doc_freq: params.get_bool(DF, false)?,
            ratio: params.get_bool(TF_IDF, false)?,
            fields: HashSet::new(),
            doc_ids: None,
        };

        if params.get_bool(ALL, false)? {
            options.freq = true;
            options.positions = true;
            options.offsets = true;
            options.doc_freq = true;
            options.ratio = true;
        }

        let field_params = if params.contains(FIELDS) {
            params.get_all(FIELDS)
        } else {
            params.get_all(FIELD_LIST)
        };
        let fields: HashSet<String> = split_list(&field_params).map(str::to_string).collect();
        // `*` asks for everything, same as no filter
        if !fields.contains("*") {
            options.fields = fields;
        }

        let doc_ids = parse_doc_ids(&params.get_all(DOC_IDS))?;
        if !doc_ids.is_empty() {
            options.doc_ids = Some(doc_ids);
        }

        Ok(options)
    }

    pub fn includes_field(&self, field: &str) -> bool {
        self.fields.is_empty() || self.fields.contains(field)
    }

    /// Whether any requested attribute needs the term dictionary.
    pub fn needs_doc_freq(&self) -> bool {
        self.doc_freq || self.ratio
    }

    /// Explicit document ids, if any were given.
    pub fn doc_ids(&self) -> Option<&[u64]> {
        self.doc_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}

/// Parse document ids from comma or space separated parameter values.
pub fn parse_doc_ids(values: &[&str]) -> Result<Vec<u64>> {
    split_list(values)
        .map(|token| {
            token.parse::<u64>().map_err(|e| {
                TermVectorError::invalid_argument(format!(
                    "invalid document id '{token}' in {DOC_IDS}: {e}"
                ))
            })
        })
        .collect()
}

fn split_list<'a>(values: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    values
        .iter()
        .flat_map(|value| value.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
}

use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use termvectors::index::{IndexReader, SnapshotManager};
use termvectors::request::RequestParams;
use termvectors::schema::{KeywordOption, Schema, TextOption};
use termvectors::{Document, MemoryIndex, Result, TermVectorComponent, TermVectorConfig};

fn schema() -> Schema {
    Schema::builder("id")
        .add_keyword_field("id", KeywordOption::default())
        .add_text_field("content", TextOption::with_full_term_vectors())
        .build()
}

fn documents() -> Vec<Document> {
    vec![
        Document::new()
            .add_string("id", "alpha")
            .add_text("content", "The quick brown fox"),
        Document::new()
            .add_string("id", "beta")
            .add_text("content", "the lazy dog and the fox"),
        Document::new()
            .add_integer("id", 3)
            .add_text("content", "Über café"),
    ]
}

#[test]
fn test_save_and_load_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("index.json");

    let index = MemoryIndex::builder(schema())
        .add_documents(documents())
        .build()?;
    index.save(&path)?;

    let loaded = MemoryIndex::load(&path)?;
    assert_eq!(loaded.max_doc(), 3);
    assert_eq!(loaded.schema(), index.schema());
    for doc_id in 0..3 {
        assert_eq!(loaded.term_vectors(doc_id)?, index.term_vectors(doc_id)?);
    }
    assert_eq!(loaded.doc_freq("content", "fox")?, Some(2));
    assert_eq!(loaded.doc_freq("content", "the")?, Some(2));

    let params = RequestParams::new().with("tv", "true").with("tv.all", "true");
    let envelope = |index: MemoryIndex| -> Result<String> {
        let mut component = TermVectorComponent::new(TermVectorConfig::default())?;
        component.attach(
            Arc::new(SnapshotManager::new(Arc::new(index))),
            Arc::new(schema()),
        )?;
        Ok(serde_json::to_string(&component.handle(&params, &[2, 0, 1])?)?)
    };
    assert_eq!(envelope(loaded)?, envelope(index)?);
    Ok(())
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = MemoryIndex::load(temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(termvectors::TermVectorError::Io(_))));
}

#[test]
fn test_unicode_offsets_count_chars() -> Result<()> {
    let index = MemoryIndex::builder(schema())
        .add_documents(documents())
        .build()?;
    let vectors = index.term_vectors(2)?.unwrap();
    let content = vectors.field("content").unwrap();

    let cafe = content.terms.iter().find(|t| t.term == "café").unwrap();
    assert_eq!(cafe.positions, vec![1]);
    assert_eq!((cafe.offsets[0].start, cafe.offsets[0].end), (5, 9));
    assert_eq!(content.terms[0].term, "über");
    Ok(())
}

#[test]
fn test_concurrent_requests_share_snapshot() -> Result<()> {
    let snapshots = Arc::new(SnapshotManager::new(Arc::new(
        MemoryIndex::builder(schema())
            .add_documents(documents())
            .build()?,
    )));
    let mut component = TermVectorComponent::new(TermVectorConfig::default())?;
    component.attach(snapshots.clone(), Arc::new(schema()))?;

    let params = RequestParams::new().with("tv", "true").with("tv.all", "true");
    let expected = serde_json::to_string(&component.handle(&params, &[0, 1, 2])?)?;

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| -> Result<String> {
                    let mut last = String::new();
                    for _ in 0..50 {
                        let response = component.handle(&params, &[0, 1, 2])?;
                        last = serde_json::to_string(&response)?;
                    }
                    Ok(last)
                })
            })
            .collect();

        for handle in handles {
            let output = handle.join().unwrap().unwrap();
            assert_eq!(output, expected);
        }
    });

    assert_eq!(snapshots.ref_count(), 1);
    Ok(())
}

#[test]
fn test_requests_see_replaced_snapshot() -> Result<()> {
    let snapshots = Arc::new(SnapshotManager::new(Arc::new(
        MemoryIndex::builder(schema())
            .add_documents(documents())
            .build()?,
    )));
    let mut component = TermVectorComponent::new(TermVectorConfig::default())?;
    component.attach(snapshots.clone(), Arc::new(schema()))?;
    let params = RequestParams::new().with("tv", "true").with("tv.tf", "true");

    let before = component.handle(&params, &[0])?.unwrap();
    assert_eq!(before.documents()[0].unique_key, "alpha");

    let replacement = MemoryIndex::builder(schema())
        .add_document(
            Document::new()
                .add_string("id", "gamma")
                .add_text("content", "fresh"),
        )
        .build()?;
    assert_eq!(snapshots.replace(Arc::new(replacement)), 1);

    let after = component.handle(&params, &[0])?.unwrap();
    assert_eq!(after.documents()[0].unique_key, "gamma");
    assert!(after.documents()[0].field("content").unwrap().term("fresh").is_some());
    Ok(())
}

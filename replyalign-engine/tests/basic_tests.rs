//! Basic tests for replyalign-engine

use replyalign_engine::*;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn corpus(dir: &Path) -> PairManifest {
    write(dir, "s1", "Are you coming?\nLet me know.\n");
    write(dir, "r1", "> Are you coming?\n> Let me know.\nYes!\n");
    write(dir, "s2", "hello.\n");
    write(dir, "r2", "> hello.\nthanks\n");
    write(dir, "pairs.tsv", "# source\treply\ns1\tr1\n\ns2\tr2\n");
    PairManifest::from_file(dir.join("pairs.tsv")).unwrap()
}

#[test]
fn test_manifest_pairs_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = corpus(dir.path());

    assert_eq!(manifest.len(), 2);
    let pair = manifest.entries()[0].load().unwrap();
    assert_eq!(pair.id, "s1_r1");
    assert!(pair.reply.starts_with("> Are you coming?"));
}

#[test]
fn test_from_files_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "s", "hello\n");

    let err =
        MessagePair::from_files(dir.path().join("s"), dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, EngineError::ReadError { .. }));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_batch_tags() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = corpus(dir.path());
    let pairs: Vec<MessagePair> = manifest.entries().iter().map(|e| e.load().unwrap()).collect();

    let processor = BatchProcessor::with_config(EngineConfig::sequential()).unwrap();
    let output = processor.process(&pairs).unwrap();

    assert_eq!(output.outputs[0].message.tags(), &[Tag::B, Tag::E, Tag::O]);
    assert_eq!(output.outputs[1].message.tags(), &[Tag::BE, Tag::O]);

    let summary = output.summary();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.aligned_lines, 3);
    assert!(summary.report.is_clean());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let pairs: Vec<MessagePair> = (0..32)
        .map(|i| {
            MessagePair::new(
                format!("pair{i}"),
                format!("Line {i} of the source.\nAnother line.\n"),
                format!("> Line {i} of the source.\nReply number {i}.\n"),
            )
        })
        .collect();

    let sequential = BatchProcessor::with_config(EngineConfig::sequential())
        .unwrap()
        .process(&pairs)
        .unwrap();
    let parallel = BatchProcessor::with_config(EngineConfig::parallel(Some(4)))
        .unwrap()
        .process(&pairs)
        .unwrap();

    assert_eq!(parallel.mode_used, ExecutionMode::Parallel);
    assert_eq!(sequential.outputs, parallel.outputs);
}

#[test]
fn test_batch_export() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = corpus(dir.path());
    let pairs: Vec<MessagePair> = manifest.entries().iter().map(|e| e.load().unwrap()).collect();
    let output = BatchProcessor::new().unwrap().process(&pairs).unwrap();

    let tag_dir = dir.path().join("tags");
    let tagged = TaggedExporter::new(&tag_dir);
    tagged.clean().unwrap();
    let sinks = ExportSinks {
        tagged: Some(tagged),
        source_lines: None,
        tag_lines: Some(TagLineExporter::new(dir.path().join("tag_lines"))),
    };
    assert_eq!(sinks.write_all(&output.outputs).unwrap(), 2);

    let first = fs::read_to_string(tag_dir.join("s1_r1")).unwrap();
    let lines: Vec<&str> = first.lines().collect();
    assert!(lines[0].starts_with("# "));
    assert_eq!(&lines[1..], &["B\tAre you coming ?", "E\tLet me know ."]);

    let tags = fs::read_to_string(dir.path().join("tag_lines")).unwrap();
    assert_eq!(tags, "B\nE\nO\nBE\nO\n");
}

#[test]
fn test_load_failures_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pairs.tsv", "s\tr\n");
    let manifest = PairManifest::from_file(dir.path().join("pairs.tsv")).unwrap();

    let mut output = BatchProcessor::new().unwrap().process(&[]).unwrap();
    for entry in manifest.entries() {
        if let Err(error) = entry.load() {
            output.record_failure(entry.id(), error);
        }
    }

    let summary = output.summary();
    assert_eq!(summary.pairs, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(output.failures[0].id, "s_r");
}

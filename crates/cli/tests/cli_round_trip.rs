//! S7: indexer -> query (automatic) -> evaluator over a small fixture corpus
//! reproduces the same metrics as running the in-memory pipeline directly,
//! confirming the file-format boundary (index JSON, results file, qrels
//! file) is lossless.

use std::collections::HashMap;
use std::fs;

use okapi_cli::{io, pipeline, Config};
use okapi_eval::{evaluate, trec, Qrels};
use okapi_retrieve::persistence;

fn write_fixture_corpus(root: &std::path::Path) {
    fs::create_dir_all(root.join("documents")).unwrap();
    fs::create_dir_all(root.join("files")).unwrap();
    fs::write(root.join("documents").join("1"), "cat dog cat").unwrap();
    fs::write(root.join("documents").join("2"), "dog").unwrap();
    fs::write(root.join("documents").join("3"), "cat").unwrap();
    fs::write(root.join("files").join("stopwords.txt"), "").unwrap();
    fs::write(root.join("files").join("queries.txt"), "q1 cat dog\n").unwrap();
    fs::write(
        root.join("files").join("qrels.txt"),
        "q1 0 1 1\nq1 0 2 0\nq1 0 3 1\n",
    )
    .unwrap();
}

#[test]
fn file_pipeline_matches_in_memory_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_fixture_corpus(root);

    let config = Config::default();

    // In-memory pipeline: index, query, evaluate, all in this process.
    let (in_memory_index, _) = pipeline::build_corpus_index(root, &config).unwrap();
    let stopwords = pipeline::load_stopwords(root).unwrap();
    let mut cache = okapi_stem::StemmerCache::new();
    let in_memory_ranked =
        okapi_retrieve::query(&in_memory_index, "cat dog", &stopwords, &mut cache, config.top_k);

    let mut in_memory_results = HashMap::new();
    in_memory_results.insert("q1".to_string(), in_memory_ranked);

    let qrels_text = fs::read_to_string(root.join("files").join("qrels.txt")).unwrap();
    let (qrels_records, _) = trec::parse_qrels(&qrels_text);
    let qrels = Qrels::from_raw(trec::group_qrels_raw(&qrels_records));

    let in_memory_metrics = evaluate(&in_memory_results, &qrels, config.top_k);

    // File pipeline: write index to disk, read it back, write results to
    // disk, read them back, then evaluate from the on-disk results.
    let (index, num_docs) = pipeline::build_corpus_index(root, &config).unwrap();
    let index_path = io::index_path(root, num_docs);
    io::write_file(&index_path, &persistence::to_json_pretty(&index).unwrap()).unwrap();

    let reloaded_json = io::read_required_file(&index_path).unwrap();
    let reloaded_index: okapi_retrieve::InvertedIndex<String> =
        persistence::from_json(&reloaded_json).unwrap();

    let queries_text = fs::read_to_string(root.join("files").join("queries.txt")).unwrap();
    let (queries, _) = trec::parse_queries(&queries_text);
    let mut lines = Vec::new();
    for record in &queries {
        let ranked = okapi_retrieve::query(
            &reloaded_index,
            &record.text,
            &stopwords,
            &mut cache,
            config.top_k,
        );
        for (rank, (doc_id, score)) in ranked.iter().enumerate() {
            lines.push(format!("{} {} {} {}", record.query_id, doc_id, rank + 1, score));
        }
    }
    let results_path = io::results_path(root, num_docs);
    io::write_file(&results_path, &lines.join("\n")).unwrap();

    let results_text = io::read_required_file(&results_path).unwrap();
    let (result_records, _) = trec::parse_results(&results_text);
    let file_results = trec::group_results_by_rank(&result_records);

    let file_metrics = evaluate(&file_results, &qrels, config.top_k);

    assert_eq!(in_memory_metrics, file_metrics);
}

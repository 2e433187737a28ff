//! `query -m {interactive,automatic} -p <corpus_root>`: run the queries file
//! (automatic) or an interactive stdin REPL (interactive) against the
//! corpus's index, writing or printing ranked results.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use okapi_cli::{io as cli_io, parse_args, pipeline as cli_pipeline, Config};
use okapi_retrieve::InvertedIndex;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Interactive,
    Automatic,
}

#[derive(Parser)]
#[command(author, version, about = "Query a corpus's BM25 index")]
struct Args {
    #[arg(short = 'm', long = "mode")]
    mode: Mode,

    #[arg(short = 'p', long = "path")]
    path: PathBuf,

    #[arg(long, default_value_t = Config::default().top_k)]
    top_k: usize,
}

fn main() -> anyhow::Result<()> {
    okapi_cli::init_logging();
    let args: Args = parse_args();
    let config = Config {
        top_k: args.top_k,
        ..Config::default()
    };

    match run(&args.path, args.mode, &config) {
        Ok(()) => Ok(()),
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(root: &Path, mode: Mode, config: &Config) -> anyhow::Result<()> {
    let root = cli_io::resolve_corpus_root(root).context("resolving corpus root")?;
    let index: InvertedIndex<String> = cli_pipeline::load_index(&root)?;
    let stopwords = cli_pipeline::load_stopwords(&root)?;
    info!(num_docs = index.num_docs(), "loaded index");

    match mode {
        Mode::Automatic => run_automatic(&root, &index, &stopwords, config),
        Mode::Interactive => run_interactive(&index, &stopwords, config),
    }
}

fn run_automatic(
    root: &Path,
    index: &InvertedIndex<String>,
    stopwords: &std::collections::HashSet<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let queries_path = cli_io::queries_path(root);
    let queries_text = cli_io::read_required_file(&queries_path)?;
    let (queries, errors) = okapi_eval::trec::parse_queries(&queries_text);
    cli_io::warn_on_parse_errors(&queries_path, &errors);

    let mut cache = okapi_stem::StemmerCache::new();
    let mut lines = Vec::new();
    for record in &queries {
        let ranked = okapi_retrieve::query(
            index,
            &record.text,
            stopwords,
            &mut cache,
            config.top_k,
        );
        for (rank, (doc_id, score)) in ranked.iter().enumerate() {
            lines.push(format!("{} {} {} {}", record.query_id, doc_id, rank + 1, score));
        }
    }

    let results_path = cli_io::results_path(root, index.num_docs());
    cli_io::write_file(&results_path, &lines.join("\n"))?;
    println!("wrote results: {}", results_path.display());
    Ok(())
}

fn run_interactive(
    index: &InvertedIndex<String>,
    stopwords: &std::collections::HashSet<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut cache = okapi_stem::StemmerCache::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("query> ");
    stdout.flush().ok();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            print!("query> ");
            stdout.flush().ok();
            continue;
        }
        let ranked = okapi_retrieve::query(index, &line, stopwords, &mut cache, config.top_k);
        for (rank, (doc_id, score)) in ranked.iter().enumerate() {
            println!("{} {} {}", rank + 1, doc_id, score);
        }
        print!("query> ");
        stdout.flush().ok();
    }
    Ok(())
}

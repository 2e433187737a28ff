//! `indexer -p <corpus_root>`: read documents and stopwords, build the BM25
//! index, and write it alongside the corpus.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use okapi_cli::{io, parse_args, pipeline, Config};

#[derive(Parser)]
#[command(author, version, about = "Build a BM25 index over a corpus")]
struct Args {
    /// Corpus root directory, containing `documents/` and `files/stopwords.txt`.
    #[arg(short = 'p', long = "path")]
    path: PathBuf,

    #[arg(long, default_value_t = Config::default().k1)]
    k1: f64,

    #[arg(long, default_value_t = Config::default().b)]
    b: f64,
}

fn main() -> anyhow::Result<()> {
    okapi_cli::init_logging();
    let args: Args = parse_args();
    let config = Config {
        k1: args.k1,
        b: args.b,
        ..Config::default()
    };

    match run(&args.path, &config) {
        Ok(()) => Ok(()),
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(root: &std::path::Path, config: &Config) -> anyhow::Result<()> {
    let root = io::resolve_corpus_root(root).context("resolving corpus root")?;
    let (index, num_docs) = pipeline::build_corpus_index(&root, config)?;

    let index_path = pipeline::save_index(&root, &index, num_docs)?;
    info!(path = %index_path.display(), "wrote index");
    println!("wrote index: {}", index_path.display());
    Ok(())
}

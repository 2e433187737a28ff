//! `evaluator -p <corpus_root>`: compare a results file against qrels and
//! print the classical IR metric table.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use okapi_cli::{io as cli_io, parse_args, Config};
use okapi_eval::{evaluate, trec, Qrels};

#[derive(Parser)]
#[command(author, version, about = "Evaluate a results file against qrels")]
struct Args {
    #[arg(short = 'p', long = "path")]
    path: PathBuf,

    #[arg(long, default_value_t = Config::default().top_k)]
    top_k: usize,
}

fn main() -> anyhow::Result<()> {
    okapi_cli::init_logging();
    let args: Args = parse_args();

    match run(&args.path, args.top_k) {
        Ok(()) => Ok(()),
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(root: &std::path::Path, top_k: usize) -> anyhow::Result<()> {
    let root = cli_io::resolve_corpus_root(root).context("resolving corpus root")?;

    let results_path = cli_io::find_file_with_extension(&root, "results")?;
    let results_text = cli_io::read_required_file(&results_path)?;
    let (result_records, result_errors) = trec::parse_results(&results_text);
    cli_io::warn_on_parse_errors(&results_path, &result_errors);
    let results: HashMap<String, Vec<(String, f64)>> = trec::group_results_by_rank(&result_records);

    let qrels_path = cli_io::qrels_path(&root);
    let qrels_text = cli_io::read_required_file(&qrels_path)?;
    let (qrels_records, qrels_errors) = trec::parse_qrels(&qrels_text);
    cli_io::warn_on_parse_errors(&qrels_path, &qrels_errors);
    let qrels = Qrels::from_raw(trec::group_qrels_raw(&qrels_records));

    let metrics = evaluate(&results, &qrels, top_k);
    print_table(&metrics);
    Ok(())
}

fn print_table(metrics: &okapi_eval::Metrics) {
    println!("Precision:   {:.3}", metrics.precision);
    println!("Recall:      {:.3}", metrics.recall);
    println!("R-Precision: {:.3}", metrics.r_precision);
    println!("P@15:        {:.3}", metrics.p_at_k);
    println!("MAP:         {:.3}", metrics.map);
    println!("NDCG@15:     {:.3}", metrics.ndcg_at_k);
    println!("BPREF:       {:.3}", metrics.bpref);
}

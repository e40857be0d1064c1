//! Command-line Monte-Carlo benchmark over the standard LDPC test table.
//!
//! ```text
//! ldpc-sim --test all
//! ldpc-sim --test 4 --esno 1.5 --blocks 500 --min-sum --seed 7
//! ```

use std::path::PathBuf;

use clap::Parser;
use ldpc_core::DecoderConfig;
use ldpc_sim::adapter::AdapterConfig;
use ldpc_sim::error::SimResult;
use ldpc_sim::runner::{run_test, test_point, RunConfig, TestPoint, CONTEST_TABLE};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ldpc-sim", about = "Benchmark LDPC encode/decode over an AWGN channel")]
struct Args {
    /// Test index from the benchmark table, or `all`.
    #[arg(short, long, default_value = "all")]
    test: String,

    /// Override the table's Es/N0 (linear).
    #[arg(short = 's', long)]
    esno: Option<f64>,

    /// Override the table's block count.
    #[arg(short = 'm', long)]
    blocks: Option<usize>,

    /// Decode with offset min-sum instead of sum-product.
    #[arg(long)]
    min_sum: bool,

    /// Maximum decoder iterations per frame.
    #[arg(long, default_value_t = 50)]
    iterations: usize,

    /// Directory holding `ldpc_{n}_{k}.alist` code files.
    #[arg(long, default_value = "codes")]
    code_dir: PathBuf,

    /// Seed for reproducible runs (codes, messages, and noise).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> SimResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let decoder = if args.min_sum {
        DecoderConfig::min_sum()
    } else {
        DecoderConfig::default()
    };
    let config = RunConfig {
        esno: args.esno,
        n_blocks: args.blocks,
        seed: args.seed,
        adapter: AdapterConfig {
            code_dir: Some(args.code_dir),
            n_iter: args.iterations,
            decoder,
        },
    };

    if args.test == "all" {
        for index in 0..CONTEST_TABLE.len() {
            run_and_report(index, &config)?;
        }
        return Ok(());
    }

    match args.test.parse::<usize>() {
        Ok(index) => run_and_report(index, &config),
        Err(_) => {
            eprintln!("--test expects an index or `all`, got `{}`", args.test);
            std::process::exit(1);
        }
    }
}

fn run_and_report(index: usize, config: &RunConfig) -> SimResult<()> {
    let point: TestPoint = test_point(index)?;
    let stats = run_test(point, config)?;

    let n_samples = stats.n_samples();
    let totals = stats.totals();
    println!(
        "Test {index} [n={}, k={}, EsN0={}]: \
         frames {}/{} = {:.4}, \
         info bit errors {}/{} = {:.3e}, \
         encode {:.0} ns/block, decode {:.0} ns/block",
        point.n,
        point.k,
        config.esno.unwrap_or(point.esno),
        totals.frame_errors,
        n_samples,
        stats.frame_error_rate(),
        totals.bit_errors,
        n_samples * point.k,
        stats.bit_error_rate(point.k),
        stats.mean_encode_ns(),
        stats.mean_decode_ns(),
    );
    Ok(())
}

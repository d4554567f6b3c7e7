use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fmasm::assemble::{assemble_graph, AssembleOpt, Strategy};
use fmasm::graph::{build_naive_overlap_graph, build_overlap_graph, GraphOpt, OverlapGraph};
use fmasm::report::{RunReport, Timings};
use fmasm::{io, util};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "fmasm",
    author,
    version,
    about = "Overlap-layout sequence assembler built on an FM-index",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble reads (FASTA, FASTQ or one read per line) into a single sequence
    Assemble {
        /// Reads file
        reads: String,
        /// Minimum overlap length
        #[arg(long, default_value_t = 0)]
        tau: usize,
        #[arg(long, value_enum, default_value_t = Strategy::Single)]
        strategy: Strategy,
        /// Keep only irreducible overlap edges
        #[arg(long)]
        irreducible: bool,
        /// Use the quadratic pairwise overlap detector instead of the FM-index
        #[arg(long)]
        naive: bool,
        /// Worker threads for --strategy best-of (0 = all cores)
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// Restrict reads to these symbols
        #[arg(long)]
        alphabet: Option<String>,
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        /// Emit a JSON run report instead of the bare sequence
        #[arg(long)]
        json: bool,
    },
    /// Print overlap edges as TSV: source, target, label, weight
    Overlaps {
        reads: String,
        #[arg(long, default_value_t = 0)]
        tau: usize,
        #[arg(long)]
        irreducible: bool,
        #[arg(long)]
        naive: bool,
    },
    /// Slice a source sequence (FASTA or raw text) into overlapping reads
    Simulate {
        source: String,
        /// Number of randomly placed reads
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,
        #[arg(long = "min-len", default_value_t = 50)]
        min_len: usize,
        #[arg(long = "max-len", default_value_t = 100)]
        max_len: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Tile reads of --max-len with this step instead of sampling at random
        #[arg(long)]
        tile: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Assemble { reads, tau, strategy, irreducible, naive, threads, alphabet, out, json } => {
            let graph_opt = GraphOpt { tau, irreducible, alphabet };
            let opt = AssembleOpt { strategy, threads };
            run_assemble(&reads, graph_opt, opt, naive, out.as_deref(), json)
        }
        Commands::Overlaps { reads, tau, irreducible, naive } => {
            run_overlaps(&reads, &GraphOpt { tau, irreducible, alphabet: None }, naive)
        }
        Commands::Simulate { source, count, min_len, max_len, seed, tile } => {
            run_simulate(&source, count, min_len, max_len, seed, tile)
        }
    }
}

fn build_graph(reads: &[String], opt: &GraphOpt, naive: bool) -> Result<OverlapGraph> {
    let graph = if naive { build_naive_overlap_graph(reads, opt)? } else { build_overlap_graph(reads, opt)? };
    Ok(graph)
}

fn run_assemble(
    reads_path: &str,
    graph_opt: GraphOpt,
    opt: AssembleOpt,
    naive: bool,
    out_path: Option<&str>,
    json: bool,
) -> Result<()> {
    let t0 = Instant::now();
    let reads = io::load_reads(reads_path)?;
    let load = t0.elapsed().as_secs_f64();

    let t1 = Instant::now();
    let graph = build_graph(&reads, &graph_opt, naive)?;
    let graph_secs = t1.elapsed().as_secs_f64();

    let t2 = Instant::now();
    let assembly = assemble_graph(&graph, &opt)?;
    let timings = Timings { load, graph: graph_secs, assemble: t2.elapsed().as_secs_f64() };

    let text = if json {
        let report = RunReport::builder(reads_path, reads.len(), naive, graph_opt, opt).finish(assembly, timings);
        report.to_json().context("cannot serialise run report")?
    } else {
        assembly.sequence
    };

    match out_path {
        Some(p) => {
            std::fs::write(p, format!("{}\n", text)).with_context(|| format!("cannot write output to '{}'", p))?;
            log::info!("assembly written to {}", p);
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = std::io::BufWriter::new(stdout.lock());
            writeln!(w, "{}", text)?;
            w.flush()?;
        }
    }
    Ok(())
}

fn run_overlaps(reads_path: &str, opt: &GraphOpt, naive: bool) -> Result<()> {
    let reads = io::load_reads(reads_path)?;
    let graph = build_graph(&reads, opt, naive)?;

    let stdout = std::io::stdout();
    let mut w = std::io::BufWriter::new(stdout.lock());
    for e in graph.edges() {
        writeln!(w, "{}\t{}\t{}\t{}", graph.content(e.source), graph.content(e.target), e.label, e.weight())?;
    }
    w.flush()?;
    Ok(())
}

fn run_simulate(
    source_path: &str,
    count: usize,
    min_len: usize,
    max_len: usize,
    seed: u64,
    tile: Option<usize>,
) -> Result<()> {
    if min_len == 0 || min_len > max_len {
        anyhow::bail!("invalid read length range [{}, {}]", min_len, max_len);
    }
    let source = io::load_source(source_path)?;
    let reads = match tile {
        Some(step) => util::sample::tile_reads(&source, max_len, step),
        None => util::sample::sample_reads(&source, count, min_len, max_len, seed),
    };
    log::info!("simulated {} reads from a {} bp source", reads.len(), source.len());

    let stdout = std::io::stdout();
    let mut w = std::io::BufWriter::new(stdout.lock());
    for r in &reads {
        writeln!(w, "{}", r)?;
    }
    w.flush()?;
    Ok(())
}

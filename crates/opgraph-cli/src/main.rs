//! Command-line driver for opgraph.
//!
//! Provides the `op` binary: loads an edge list and a malicious-node list,
//! runs one seeded detection pass over the largest connected component and
//! prints the confusion matrix on standard output.
//!
//! Logs go to standard error; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see
//! more than warnings.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use opgraph_core::{GroundTruth, LoadError, Network};
use opgraph_detect::{detect, DetectError, DetectorConfig, DEFAULT_DISTANCE, DEFAULT_SEED};

/// Exit code for a help request or bad command-line options.
const EXIT_USAGE: i32 = 1;
/// Exit code for malformed graph or ground-truth content.
const EXIT_PARSE: i32 = 2;
/// Exit code for files that cannot be opened or read.
const EXIT_IO: i32 = 3;
/// Exit code for a graph with no component to analyse.
const EXIT_EMPTY_GRAPH: i32 = 4;

/// Estimate which nodes of a graph are malicious from neighbor comparisons.
#[derive(Parser)]
#[command(name = "op", disable_help_flag = true)]
struct Cli {
    /// Edge-list file, one undirected edge per line.
    #[arg(short = 'g', long = "graph", value_name = "GRAPH_FILE")]
    graph: Option<PathBuf>,

    /// File whose first line lists the malicious node ids.
    #[arg(short = 'm', long = "malicious", value_name = "MALICIOUS_FILE")]
    malicious: Option<PathBuf>,

    /// Seed of the comparator-noise generator.
    #[arg(short, long, env = "OPGRAPH_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Neighborhood hop distance.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DISTANCE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    distance: u32,

    /// Print the report as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Print usage and exit.
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(EXIT_USAGE);
        }
    };

    if cli.help {
        println!("{}", Cli::command().render_help());
        process::exit(EXIT_USAGE);
    }

    let (Some(graph), Some(malicious)) = (cli.graph.as_deref(), cli.malicious.as_deref()) else {
        eprintln!("Error: both -g <GRAPH_FILE> and -m <MALICIOUS_FILE> are required");
        eprintln!("{}", Cli::command().render_usage());
        process::exit(EXIT_USAGE);
    };

    let config = DetectorConfig::default()
        .with_seed(cli.seed)
        .with_distance(cli.distance);
    process::exit(run(graph, malicious, &config, cli.json));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute one detection run.
///
/// Returns exit code: 0 = success, 1 = usage error, 2 = parse error,
/// 3 = I/O error, 4 = graph without edges.
fn run(graph_path: &Path, malicious_path: &Path, config: &DetectorConfig, json: bool) -> i32 {
    let network = match Network::load(graph_path) {
        Ok(n) => n,
        Err(e) => return report_load_error(&e),
    };

    let truth = match GroundTruth::load(malicious_path, &network) {
        Ok(t) => t,
        Err(e) => return report_load_error(&e),
    };

    let report = match detect(&network, &truth, config) {
        Ok(r) => r,
        Err(DetectError::Core(e)) => {
            eprintln!("Error: {}", e);
            return EXIT_USAGE;
        }
        Err(e) => {
            eprintln!("Detection error: {}", e);
            return EXIT_USAGE;
        }
    };

    if json {
        let document = serde_json::json!({
            "graph": graph_path.display().to_string(),
            "malicious": malicious_path.display().to_string(),
            "distance": config.distance,
            "accuracy": report.matrix.accuracy(),
            "precision": report.matrix.precision(),
            "recall": report.matrix.recall(),
            "report": report,
        });
        let text = serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize report: {}\"}}", e)
        });
        println!("{}", text);
    } else {
        println!("{}", report.matrix);
    }
    0
}

fn report_load_error(err: &LoadError) -> i32 {
    match err {
        LoadError::Io { .. } => {
            eprintln!("I/O error: {}", err);
            EXIT_IO
        }
        LoadError::Parse { .. } => {
            eprintln!("Parse error: {}", err);
            EXIT_PARSE
        }
        LoadError::EmptyGraph { .. } => {
            eprintln!("Error: {}", err);
            EXIT_EMPTY_GRAPH
        }
    }
}

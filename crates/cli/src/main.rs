mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use causeway_eval::PromptStyle;
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Causal reasoning benchmarks over small DAGs.
#[derive(Parser)]
#[command(
    name = "causeway",
    version,
    about = "Causal reasoning question generation and answer scoring"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug details to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a causeway.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random DAG and print it as an edgelist
    Dag {
        /// Number of variables
        #[arg(long)]
        nodes: usize,
        /// Edge probability for every ordered pair
        #[arg(long)]
        probability: f64,
        /// Random seed (defaults to the configured seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Print Graphviz DOT instead of an edgelist
        #[arg(long)]
        dot: bool,
    },

    /// List the numbered facts of a graph
    Facts {
        /// Path to an edgelist file
        graph: PathBuf,
    },

    /// List every pairwise question of a graph
    Questions {
        /// Path to an edgelist file
        graph: PathBuf,
    },

    /// Print the full few-shot prompt for one question
    Prompt {
        /// Path to an edgelist file
        graph: PathBuf,
        /// Index of the question (see `causeway questions`)
        #[arg(long)]
        question: usize,
        /// Number of few-shot examples
        #[arg(long)]
        shots: Option<usize>,
        /// Sample examples evenly across question types
        #[arg(long, conflicts_with = "uniform")]
        balanced: bool,
        /// Sample examples uniformly
        #[arg(long)]
        uniform: bool,
        /// Header template (v1..v6)
        #[arg(long)]
        style: Option<PromptStyle>,
        /// Random seed for example sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score a free-text answer to one question
    Score {
        /// Path to an edgelist file
        graph: PathBuf,
        /// Index of the question (see `causeway questions`)
        #[arg(long)]
        question: usize,
        /// Answer text
        #[arg(long, conflicts_with = "answer_file", required_unless_present = "answer_file")]
        answer: Option<String>,
        /// File containing the answer text
        #[arg(long)]
        answer_file: Option<PathBuf>,
    },

    /// Ask a language model every question and score the answers
    Run {
        /// Path to an edgelist file
        graph: PathBuf,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Model name (defaults to the configured model)
        #[arg(long)]
        model: Option<String>,
        /// Random seed for example sampling
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{}", e);
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("config error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Dag {
            nodes,
            probability,
            seed,
            dot,
        } => {
            let seed = seed.unwrap_or(config.seed);
            commands::dag::cmd_dag(nodes, probability, seed, dot, cli.output, cli.quiet);
        }
        Commands::Facts { graph } => {
            commands::facts::cmd_facts(&graph, cli.output, cli.quiet);
        }
        Commands::Questions { graph } => {
            commands::questions::cmd_questions(&graph, cli.output, cli.quiet);
        }
        Commands::Prompt {
            graph,
            question,
            shots,
            balanced,
            uniform,
            style,
            seed,
        } => {
            let mut run = config.run_config();
            if let Some(shots) = shots {
                run.shots = shots;
            }
            if let Some(style) = style {
                run.style = style;
            }
            if balanced {
                run.mode = causeway_eval::SamplingMode::Balanced;
            } else if uniform {
                run.mode = causeway_eval::SamplingMode::Uniform;
            }
            let seed = seed.unwrap_or(config.seed);
            commands::prompt::cmd_prompt(&graph, question, &run, seed, cli.output, cli.quiet);
        }
        Commands::Score {
            graph,
            question,
            answer,
            answer_file,
        } => {
            let answer = match (answer, answer_file) {
                (Some(text), _) => text,
                (None, Some(path)) => match std::fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        let msg = format!("error reading file '{}': {}", path.display(), e);
                        report_error(&msg, cli.output, cli.quiet);
                        process::exit(1);
                    }
                },
                (None, None) => {
                    let msg = "one of --answer or --answer-file is required";
                    report_error(msg, cli.output, cli.quiet);
                    process::exit(1);
                }
            };
            commands::score::cmd_score(&graph, question, &answer, cli.output, cli.quiet);
        }
        Commands::Run {
            graph,
            out,
            model,
            seed,
        } => {
            let seed = seed.unwrap_or(config.seed);
            commands::run::cmd_run(
                &graph,
                out.as_deref(),
                model.as_deref(),
                seed,
                &config,
                cli.output,
                cli.quiet,
            );
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), String> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CAUSEWAY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| format!("failed to initialize tracing subscriber: {error}"))
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

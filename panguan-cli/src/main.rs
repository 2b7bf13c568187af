mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use config::{Config, DEFAULT_CONFIG_PATH};
use panguan_pipeline::{build_root_pipeline, PipelineState, Sequential, Stage};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::{Path, PathBuf}};
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

/// The questions run by `--demo`.
const DEMO_QUESTIONS: [&str; 4] = [
    "Compute ∫_0^1 x^2 dx",
    "Solve x^2 - 5x + 6 = 0",
    "limit((1+1/n)**n, n, oo)",
    "Find the general solution to y'' - y = 0 and verify initial conditions y(0)=1, y'(0)=0",
];

/// Answer math questions with a staged symbolic pipeline.
///
/// With no arguments, starts an interactive session. Piped input is treated as a batch of
/// questions, one per line.
#[derive(Debug, ClapParser)]
#[command(version, about)]
struct Args {
    /// Answer a single question.
    #[arg(long, value_name = "TEXT", conflicts_with_all = ["file", "demo"])]
    once: Option<String>,

    /// Answer every non-empty line of a file, and write a report.
    #[arg(long, value_name = "PATH", conflicts_with = "demo")]
    file: Option<PathBuf>,

    /// Run the demo questions.
    #[arg(long)]
    demo: bool,

    /// Print the final pipeline state as JSON instead of the write-up.
    #[arg(long)]
    json: bool,

    /// The configuration file to use.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// The user the session belongs to.
    #[arg(long, default_value = "cli-user")]
    user: String,
}

/// Initializes logging to stderr. `RUST_LOG` overrides the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs one question through the pipeline.
fn run_query(pipeline: &Sequential, session_id: &str, question: &str) -> PipelineState {
    let _span = info_span!("question", session_id, question).entered();
    pipeline.run(question, PipelineState::new(session_id))
}

/// Prints the result of a question.
fn print_result(state: &PipelineState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state).context("failed to serialize state")?);
    } else {
        println!("{}\n", state.final_writeup().unwrap_or_default());
        println!("Verification: {}", report::verification_summary(state));
    }
    Ok(())
}

/// If routing was exhausted, shows why the question did not parse as an expression.
fn explain_failure(state: &PipelineState, question: &str) {
    let exhausted = state.solver_output().is_some_and(|output| !output.routed());
    if exhausted {
        if let Err(err) = panguan_compute::parse(question) {
            err.report_to_stderr("input", question);
        }
    }
}

/// Runs a batch of questions and writes one report for all of them.
fn run_batch(pipeline: &Sequential, session_id: &str, input: &str, config: &Config) -> Result<()> {
    let questions = input.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    info!(count = questions.len(), "running batch");

    let entries = questions.iter()
        .enumerate()
        .map(|(i, question)| {
            info!(index = i + 1, total = questions.len(), "answering");
            (question.to_string(), run_query(pipeline, session_id, question))
        })
        .collect::<Vec<_>>();

    let path = report::write(&config.reports_dir, &report::render(&entries))?;
    println!("Saved report to {}", path.display());
    Ok(())
}

/// Runs the interactive session until end of input.
fn repl(pipeline: &Sequential, session_id: &str, json: bool) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to start the line editor")?;

    fn process_line(rl: &mut DefaultEditor, pipeline: &Sequential, session_id: &str, json: bool) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        let state = run_query(pipeline, session_id, &input);
        explain_failure(&state, input.trim());
        if let Err(err) = print_result(&state, json) {
            eprintln!("{:#}", err);
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, pipeline, session_id, json) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_PATH), false)?,
    };
    init_tracing(&config);

    let session_id = format!("sess-{}", args.user);
    let pipeline = build_root_pipeline(config.research.build_backend());

    if let Some(path) = &args.file {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read questions from `{}`", path.display()))?;
        run_batch(&pipeline, &session_id, &input, &config)
    } else if let Some(question) = &args.once {
        let state = run_query(&pipeline, &session_id, question);
        explain_failure(&state, question.trim());
        print_result(&state, args.json)
    } else if args.demo {
        for question in DEMO_QUESTIONS {
            println!("## {}\n", question);
            print_result(&run_query(&pipeline, &session_id, question), args.json)?;
            println!();
        }
        Ok(())
    } else if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
        run_batch(&pipeline, &session_id, &input, &config)
    } else {
        repl(&pipeline, &session_id, args.json)
    }
}

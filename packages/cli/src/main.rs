use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use banker_twin::{
    load_input, parse_schedule, sample_input, ScheduledArrivals, SimulationInput,
    SimulationSession, SimulatorBuilder,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

/// Banker CLI
/// Deadlock-avoidance simulator with step-by-step traces
#[derive(Parser)]
#[command(name = "banker", version)]
#[command(about = "Banker's algorithm simulator", long_about = None)]
struct Cli {
    /// Print sessions as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the input matrices and the derived need matrix
    Inspect(InputArgs),
    /// Static safety check
    Standard {
        #[command(flatten)]
        input: InputArgs,

        /// Print every recorded step
        #[arg(long)]
        trace: bool,
    },
    /// Dynamic run with arrivals
    Dynamic {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        arrivals: ArrivalArgs,

        /// Print every recorded step
        #[arg(long)]
        trace: bool,
    },
    /// Run both checkers and compare their metrics
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        arrivals: ArrivalArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input JSON file; the built-in sample is used when omitted
    input: Option<PathBuf>,
}

impl InputArgs {
    fn load(&self) -> Result<SimulationInput> {
        match &self.input {
            Some(path) => load_input(path),
            None => {
                info!("No input file given, using the built-in sample");
                Ok(sample_input())
            }
        }
    }
}

#[derive(Args)]
struct ArrivalArgs {
    /// Arrival schedule, e.g. "1:4,3,3;3:2,1,1|1,0,0"
    #[arg(long, default_value = "")]
    arrivals: String,

    /// Give up after this many dynamic iterations
    #[arg(long)]
    max_iterations: Option<u64>,
}

impl ArrivalArgs {
    fn source(&self) -> ScheduledArrivals {
        ScheduledArrivals::new(parse_schedule(&self.arrivals))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

/// Returns whether every run was safe
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Inspect(args) => {
            let input = args.load()?;
            if cli.json {
                let need = banker_twin::compute_need(&input.allocation, &input.max)?;
                let value = serde_json::json!({ "input": input, "need": need });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                render::print_input(&input)?;
            }
            Ok(true)
        }
        Commands::Standard { input, trace } => {
            let input = input.load()?;
            let session = SimulatorBuilder::new()
                .record_steps(trace || cli.json)
                .build()
                .run_standard(&input)
                .context("Standard run failed")?;

            emit(&session, &input, cli.json, trace)?;
            Ok(session.is_safe())
        }
        Commands::Dynamic {
            input,
            arrivals,
            trace,
        } => {
            let input = input.load()?;
            let session = SimulatorBuilder::new()
                .record_steps(trace || cli.json)
                .max_iterations(arrivals.max_iterations)
                .build()
                .run_dynamic(&input, &mut arrivals.source())
                .context("Dynamic run failed")?;

            emit(&session, &input, cli.json, trace)?;
            Ok(session.is_safe())
        }
        Commands::Compare { input, arrivals } => {
            let input = input.load()?;
            let simulator = SimulatorBuilder::new()
                .record_steps(cli.json)
                .max_iterations(arrivals.max_iterations)
                .build();

            let standard = simulator
                .run_standard(&input)
                .context("Standard run failed")?;
            let dynamic = simulator
                .run_dynamic(&input, &mut arrivals.source())
                .context("Dynamic run failed")?;

            if cli.json {
                let value = serde_json::json!({ "standard": standard, "dynamic": dynamic });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                render::print_comparison(&standard, &dynamic);
            }
            Ok(standard.is_safe() && dynamic.is_safe())
        }
    }
}

fn emit(
    session: &SimulationSession,
    input: &SimulationInput,
    json: bool,
    trace: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }
    if trace {
        render::print_steps(session, input);
    }
    render::print_summary(session);
    Ok(())
}

//! Blockrun Interpreter
//!
//! Runs the bundled subtraction-based GCD block program on two integers.

use anyhow::{Result, bail};
use blockrun::{InputSource, Label, LineReader, Outcome, Session, State, ValueQueue, Variables};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Runs the bundled GCD block program")]
struct Cli {
    /// Input values bound to `x` and `y` in order. Read one per line from
    /// stdin when omitted.
    #[arg(allow_hyphen_values = true, num_args = 0..=2)]
    values: Vec<i128>,

    /// Stop with an error after this many block evaluations.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print every executed label with the variable table after it.
    #[arg(long)]
    trace: bool,

    /// Print the program before running it.
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    let log_level = std::env::var("BLOCKRUN_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Blockrun Interpreter v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let program = blockrun::sample::gcd()?;
    if cli.print {
        println!("{program}");
    }

    let mut source: Box<dyn InputSource> = if cli.values.is_empty() {
        Box::new(LineReader::new(io::stdin().lock()))
    } else {
        Box::new(ValueQueue::new(cli.values.iter().copied()))
    };

    if !cli.trace && cli.max_steps.is_none() {
        let outcome = program.evaluate(source.as_mut(), &mut io::stdout());
        println!("{outcome}");
        return Ok(exit_code(&outcome));
    }

    let Some(mut session) = Session::start(&program, source.as_mut()) else {
        println!("{}", Outcome::Empty);
        return Ok(ExitCode::SUCCESS);
    };

    let limit = cli.max_steps.unwrap_or(usize::MAX);
    while session.steps() < limit {
        let Some(label) = session.step() else {
            break;
        };
        if cli.trace {
            print_step(label, session.variables());
        }
    }

    let outcome = match session.state() {
        State::Halted(value) => Outcome::Value(*value),
        State::Error(err) => {
            error!("Evaluation failed: {}", err);
            println!("{err}");
            Outcome::Failed
        }
        State::Running(label) => {
            bail!("Step limit of {} reached before block {}", limit, label)
        }
    };
    println!("{outcome}");
    Ok(exit_code(&outcome))
}

fn print_step(label: Label, vars: &Variables) {
    let bindings: Vec<String> = vars
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    println!("{label}: {}", bindings.join(" "));
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Value(_) => ExitCode::SUCCESS,
        Outcome::Empty | Outcome::Failed => ExitCode::FAILURE,
    }
}

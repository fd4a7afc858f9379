mod commands;

use clap::Parser;
use wigner_core::{InvalidDegreeRange, ThreeJError};

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("wigner-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "wigner-rs", about = "Wigner 3j, small-d, and Legendre series evaluators")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Evaluate 3j(l1, l2, l3; m1, m2, m3) over every admissible l1
    #[command(name = "3j-l")]
    ThreeJOverL(commands::ThreeJOverLArgs),
    /// Evaluate 3j(l1, l2, l3; m1, m2, m3) over every admissible m2
    #[command(name = "3j-m")]
    ThreeJOverM(commands::ThreeJOverMArgs),
    /// Evaluate the small-d matrix element d^l_{m1,m2}(theta) over a degree range
    #[command(name = "wigner-d")]
    WignerD(commands::WignerDArgs),
    /// Evaluate the Legendre polynomial P_l(x) over a degree range
    Legendre(commands::LegendreArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::ThreeJOverL(args) => commands::run_three_j_over_l(args),
        CliCommand::ThreeJOverM(args) => commands::run_three_j_over_m(args),
        CliCommand::WignerD(args) => commands::run_wigner_d(args),
        CliCommand::Legendre(args) => commands::run_legendre(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    ThreeJ(#[from] ThreeJError),
    #[error(transparent)]
    Degree(#[from] InvalidDegreeRange),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::ThreeJ(_) | Self::Degree(_) | Self::Internal(_) => 1,
        }
    }
}

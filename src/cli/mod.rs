//! Command-line interface for driving the engine in-process.
//!
//! The CLI owns everything the engine refuses to: reading input files,
//! choosing the reference year, and formatting output for humans or
//! machines (`--robot`).

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub mod commands;
pub mod output;

#[derive(Parser, Debug)]
#[command(
    name = "dreamteam",
    version,
    about = "Match researchers to a solicitation's skills and assemble a covering team"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (overrides the global one)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output and logs
    #[arg(long, global = true)]
    pub robot: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a team covering the solicitation's skills
    Assemble(commands::assemble::AssembleArgs),
    /// Print the full researcher x skill affinity matrix
    Matrix(commands::matrix::MatrixArgs),
    /// Rank individual researchers against the solicitation
    Rank(commands::rank::RankArgs),
}

/// Input files shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Researcher profiles (JSON array)
    #[arg(long, value_name = "FILE")]
    pub researchers: PathBuf,

    /// Skill descriptors (JSON array)
    #[arg(long, value_name = "FILE")]
    pub skills: PathBuf,

    /// Eligibility rules (JSON object); omitted means no active rules
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Reference year for recency decay (defaults to the current year)
    #[arg(long, value_name = "YEAR")]
    pub now: Option<i32>,

    /// Derive sparse keyword vectors for skills that arrive without one
    #[arg(long)]
    pub derive_sparse: bool,
}

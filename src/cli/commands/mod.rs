//! CLI command implementations.
//!
//! Each subcommand has its own module with an Args struct and a `run()`
//! function. File loading lives here, outside the engine.

use anyhow::Context;
use chrono::Datelike;

use crate::cli::{Commands, InputArgs};
use crate::config::EngineConfig;
use crate::eligibility::EligibilityRules;
use crate::model::{ResearcherProfile, SkillDescriptor};

pub mod assemble;
pub mod matrix;
pub mod rank;

/// Shared per-invocation context.
pub struct AppContext {
    pub config: EngineConfig,
    pub robot: bool,
}

/// Inputs loaded and normalized for one run.
pub struct LoadedInputs {
    pub researchers: Vec<ResearcherProfile>,
    pub skills: Vec<SkillDescriptor>,
    pub rules: EligibilityRules,
    pub now: i32,
}

pub fn run(ctx: &AppContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Assemble(args) => assemble::run(ctx, args),
        Commands::Matrix(args) => matrix::run(ctx, args),
        Commands::Rank(args) => rank::run(ctx, args),
    }
}

/// Read and deserialize the request inputs.
pub fn load_inputs(input: &InputArgs) -> anyhow::Result<LoadedInputs> {
    let researchers: Vec<ResearcherProfile> = read_json(&input.researchers)
        .with_context(|| format!("loading researchers from {}", input.researchers.display()))?;
    let mut skills: Vec<SkillDescriptor> = read_json(&input.skills)
        .with_context(|| format!("loading skills from {}", input.skills.display()))?;

    let rules = match &input.rules {
        Some(path) => read_json(path)
            .with_context(|| format!("loading eligibility rules from {}", path.display()))?,
        None => EligibilityRules::default(),
    };

    if input.derive_sparse {
        for skill in &mut skills {
            skill.derive_sparse_if_missing();
        }
    }

    Ok(LoadedInputs {
        researchers,
        skills,
        rules,
        now: input.now.unwrap_or_else(|| chrono::Utc::now().year()),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

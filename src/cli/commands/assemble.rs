//! dreamteam assemble - run the full matching pipeline.

use clap::Args;
use colored::Colorize;

use crate::assembly::{AssemblyRequest, SkillWeighting, Strategy};
use crate::cli::InputArgs;
use crate::cli::output::{emit_json, robot_ok, score_cell};
use crate::engine::{MatchEngine, MatchOutcome};

use super::{AppContext, load_inputs};

#[derive(Args, Debug)]
pub struct AssembleArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum team size (defaults from config)
    #[arg(long)]
    pub min: Option<usize>,

    /// Maximum team size (defaults from config)
    #[arg(long)]
    pub max: Option<usize>,

    /// Selection strategy: greedy, topk, or hybrid
    #[arg(long, default_value = "greedy")]
    pub strategy: String,

    /// Run all strategies over the same matrix for comparison
    #[arg(long)]
    pub compare: bool,

    /// Gain weight for preferred skills (0 keeps them out of selection)
    #[arg(long)]
    pub preferred_weight: Option<f64>,

    /// Print the full report as Markdown instead of the summary table
    #[arg(long)]
    pub markdown: bool,
}

pub fn run(ctx: &AppContext, args: &AssembleArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let requests = build_requests(ctx, args)?;

    let engine = MatchEngine::new(ctx.config.clone());
    let outcome = engine.run(
        &inputs.researchers,
        &inputs.skills,
        &inputs.rules,
        &requests,
        inputs.now,
    )?;

    if ctx.robot {
        return emit_json(&robot_ok(&outcome));
    }
    if args.markdown {
        for report in &outcome.reports {
            println!("{}", report.to_markdown());
        }
        return Ok(());
    }
    print_summary(&outcome);
    Ok(())
}

fn build_requests(ctx: &AppContext, args: &AssembleArgs) -> anyhow::Result<Vec<AssemblyRequest>> {
    let defaults = &ctx.config.assembly;
    let skill_weighting = args.preferred_weight.map_or_else(SkillWeighting::default, |preferred| {
        SkillWeighting {
            required: 1.0,
            preferred,
        }
    });

    let strategies: Vec<Strategy> = if args.compare {
        Strategy::ALL.to_vec()
    } else {
        vec![args.strategy.parse()?]
    };

    Ok(strategies
        .into_iter()
        .map(|strategy| AssemblyRequest {
            min_team_size: args.min.unwrap_or(defaults.min_team_size),
            max_team_size: args.max.unwrap_or(defaults.max_team_size),
            strategy,
            skill_weighting,
        })
        .collect())
}

fn print_summary(outcome: &MatchOutcome) {
    if !outcome.excluded.is_empty() {
        println!(
            "{} {} researcher(s) excluded by eligibility rules",
            "note:".yellow().bold(),
            outcome.excluded.len()
        );
        for exclusion in &outcome.excluded {
            let reasons: Vec<String> = exclusion
                .reasons
                .iter()
                .map(|r| format!("{r:?}"))
                .collect();
            println!("  - {} ({})", exclusion.researcher_name, reasons.join(", "));
        }
        println!();
    }

    for report in &outcome.reports {
        let team = &report.outcome.team;
        let coverage = &report.outcome.coverage;

        let headline = format!(
            "{} strategy: {} member(s), coverage {:.1}",
            team.strategy,
            team.members.len(),
            coverage.aggregate
        );
        println!("{}", headline.bold());
        if team.partial_coverage {
            println!(
                "{}",
                "  partial coverage: eligible pool below minimum team size".red()
            );
        }

        for member in &team.members {
            println!(
                "  {} {} — {}",
                format!("[{:?}]", member.role).cyan(),
                member.name.green(),
                member.justification.dimmed()
            );
        }

        println!("  coverage by requirement:");
        for skill in &coverage.required {
            println!(
                "    {} {} ({})",
                score_cell(skill.achieved),
                skill.skill,
                skill.best_researcher_id.as_deref().unwrap_or("uncovered")
            );
        }
        for skill in &coverage.preferred {
            println!(
                "    {} {} {}",
                score_cell(skill.achieved),
                skill.skill,
                "(preferred)".dimmed()
            );
        }

        if !report.gaps.is_empty() {
            let names: Vec<&str> = report.gaps.iter().map(|g| g.skill.as_str()).collect();
            println!("  {} {}", "gaps:".red().bold(), names.join(", "));
        }
        println!();
    }
}

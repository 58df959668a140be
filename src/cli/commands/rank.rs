//! dreamteam rank - ranked individual researcher matches.

use clap::Args;
use colored::Colorize;

use crate::cli::InputArgs;
use crate::cli::output::{emit_json, robot_ok, score_cell};
use crate::eligibility;
use crate::ranking;
use crate::scoring::build_matrix;

use super::{AppContext, load_inputs};

#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum number of researchers to print
    #[arg(long, short, default_value = "20")]
    pub limit: usize,
}

pub fn run(ctx: &AppContext, args: &RankArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let outcome = eligibility::filter(&inputs.researchers, &inputs.rules);
    let matrix = build_matrix(
        &outcome.eligible,
        &inputs.skills,
        inputs.now,
        &ctx.config.scoring,
    );
    let ranked = ranking::rank(&matrix);

    if ctx.robot {
        let limited: Vec<_> = ranked.into_iter().take(args.limit).collect();
        return emit_json(&robot_ok(limited));
    }

    for (position, entry) in ranked.iter().take(args.limit).enumerate() {
        let best = entry
            .best_skill
            .as_deref()
            .map(|skill| format!("best: {skill}"))
            .unwrap_or_default();
        println!(
            "{:>3}. {} {}  {}",
            position + 1,
            score_cell(entry.score),
            entry.name.green(),
            best.dimmed()
        );
    }
    Ok(())
}

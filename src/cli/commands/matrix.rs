//! dreamteam matrix - print the affinity matrix.

use clap::Args;
use colored::Colorize;

use crate::cli::InputArgs;
use crate::cli::output::{emit_json, robot_ok, score_cell};
use crate::eligibility;
use crate::scoring::build_matrix;

use super::{AppContext, load_inputs};

#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(ctx: &AppContext, args: &MatrixArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let outcome = eligibility::filter(&inputs.researchers, &inputs.rules);
    let matrix = build_matrix(
        &outcome.eligible,
        &inputs.skills,
        inputs.now,
        &ctx.config.scoring,
    );

    if ctx.robot {
        return emit_json(&robot_ok(matrix.export()));
    }

    // Header row: skill columns.
    let name_width = matrix
        .rows()
        .iter()
        .map(|r| r.researcher_name.len())
        .max()
        .unwrap_or(10)
        .max(10);
    print!("{:name_width$}", "");
    for column in matrix.columns() {
        let label: String = column.skill.chars().take(14).collect();
        print!(" {label:>14}");
    }
    println!();

    for (row, header) in matrix.rows().iter().enumerate() {
        print!("{:name_width$}", header.researcher_name.bold());
        for column in 0..matrix.n_columns() {
            let cell = matrix.cell(row, column);
            let rendered = score_cell(cell.score);
            let rendered = if cell.degraded {
                format!("{rendered}!").red().to_string()
            } else {
                rendered
            };
            print!(" {rendered:>14}");
        }
        println!();
    }

    if !outcome.excluded.is_empty() {
        println!(
            "\n{} {} researcher(s) excluded before scoring",
            "note:".yellow().bold(),
            outcome.excluded.len()
        );
    }
    Ok(())
}

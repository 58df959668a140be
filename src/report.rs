//! Team report: coverage analysis, gaps, and supporting evidence.
//!
//! Collects what a proposal coordinator needs from one assembly run:
//! the roster, how well each requirement is covered, which requirements
//! remain weak, and the publications backing each member's strongest
//! cells. Renders to Markdown for download or display.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::assembly::{AssemblyOutcome, SelectionDecision};
use crate::config::AssemblyConfig;
use crate::scoring::AffinityMatrix;

/// A required skill whose achieved coverage stayed below the gap
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub achieved: f64,
    pub threshold: f64,
}

/// A publication backing one member's affinity to one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub publication_id: String,
    pub skill: String,
    pub score: f64,
}

/// Evidence for one roster member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEvidence {
    pub researcher_id: String,
    pub name: String,
    pub publications: Vec<EvidenceItem>,
}

/// Complete report for one assembled team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamReport {
    pub outcome: AssemblyOutcome,
    pub gaps: Vec<SkillGap>,
    pub evidence: Vec<MemberEvidence>,
}

/// Strongest evidence cells carried per member.
const EVIDENCE_PER_MEMBER: usize = 3;

impl TeamReport {
    /// Assemble the report from a finished outcome and its matrix.
    #[must_use]
    pub fn build(
        matrix: &AffinityMatrix,
        outcome: AssemblyOutcome,
        config: &AssemblyConfig,
    ) -> Self {
        let gaps = outcome
            .coverage
            .required
            .iter()
            .filter(|skill| skill.achieved < config.gap_threshold)
            .map(|skill| SkillGap {
                skill: skill.skill.clone(),
                achieved: skill.achieved,
                threshold: config.gap_threshold,
            })
            .collect();

        let evidence = outcome
            .team
            .members
            .iter()
            .map(|member| {
                let row = matrix.row_index(&member.researcher_id);
                MemberEvidence {
                    researcher_id: member.researcher_id.clone(),
                    name: member.name.clone(),
                    publications: row.map(|row| member_evidence(matrix, row)).unwrap_or_default(),
                }
            })
            .collect();

        Self {
            outcome,
            gaps,
            evidence,
        }
    }

    /// Render the report as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let team = &self.outcome.team;

        let _ = writeln!(out, "# Team Report ({} strategy)", team.strategy);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Overall required-skill coverage: **{:.1}**{}",
            self.outcome.coverage.aggregate,
            if team.partial_coverage {
                " _(partial: eligible pool below minimum team size)_"
            } else {
                ""
            }
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "## Roster");
        let _ = writeln!(out);
        for member in &team.members {
            let _ = writeln!(
                out,
                "- **{}** ({:?}) — {}",
                member.name, member.role, member.justification
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Coverage");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Skill | Achieved | Covered by |");
        let _ = writeln!(out, "|---|---|---|");
        for skill in &self.outcome.coverage.required {
            let _ = writeln!(
                out,
                "| {} | {:.1} | {} |",
                skill.skill,
                skill.achieved,
                skill.best_researcher_id.as_deref().unwrap_or("—")
            );
        }
        for skill in &self.outcome.coverage.preferred {
            let _ = writeln!(
                out,
                "| {} (preferred) | {:.1} | {} |",
                skill.skill,
                skill.achieved,
                skill.best_researcher_id.as_deref().unwrap_or("—")
            );
        }
        let _ = writeln!(out);

        if !self.gaps.is_empty() {
            let _ = writeln!(out, "## Gaps");
            let _ = writeln!(out);
            for gap in &self.gaps {
                let _ = writeln!(
                    out,
                    "- {} at {:.1}, below the {:.0} threshold",
                    gap.skill, gap.achieved, gap.threshold
                );
            }
            let _ = writeln!(out);
        }

        if self.evidence.iter().any(|e| !e.publications.is_empty()) {
            let _ = writeln!(out, "## Supporting evidence");
            let _ = writeln!(out);
            for member in &self.evidence {
                if member.publications.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "- **{}**:", member.name);
                for item in &member.publications {
                    let _ = writeln!(
                        out,
                        "  - `{}` for \"{}\" ({:.1})",
                        item.publication_id, item.skill, item.score
                    );
                }
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## Selection history");
        let _ = writeln!(out);
        for step in &self.outcome.trace {
            let candidate = step.researcher_id.as_deref().unwrap_or("—");
            let verdict = match step.decision {
                SelectionDecision::Selected => "selected",
                SelectionDecision::Seeded => "seeded",
                SelectionDecision::GainBelowEpsilon => "stopped: gain below epsilon",
                SelectionDecision::PoolExhausted => "stopped: pool exhausted",
            };
            let _ = writeln!(
                out,
                "{}. {} — {} (gain {:+.2}, coverage {:.1})",
                step.round, candidate, verdict, step.gain, step.aggregate_after
            );
        }

        out
    }
}

/// Strongest required-skill cells with evidence for one row.
fn member_evidence(matrix: &AffinityMatrix, row: usize) -> Vec<EvidenceItem> {
    let mut items: Vec<EvidenceItem> = matrix
        .required_columns()
        .filter_map(|column| {
            let cell = matrix.cell(row, column);
            cell.evidence_publication_id
                .as_ref()
                .map(|publication_id| EvidenceItem {
                    publication_id: publication_id.clone(),
                    skill: matrix.columns()[column].skill.clone(),
                    score: cell.score,
                })
        })
        .collect();
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.skill.cmp(&b.skill))
    });
    items.truncate(EVIDENCE_PER_MEMBER);
    items
}

// ABOUTME: Output formatting helpers for evalfit-cli
// ABOUTME: Renders clients, compositions, comparison tables, postural summaries, and insights as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use serde::Serialize;

use evalfit::insights::Insight;
use evalfit::intelligence::postural::{PosturalChange, ViewDeviation};
use evalfit::intelligence::{
    BodyComposition, ComparisonTable, PosturalSummary, SelectionWarning, SkinfoldEstimate,
    SkinfoldProtocol,
};
use evalfit::models::{Client, Evaluation, PosturalView};

const LABEL_WIDTH: usize = 30;
const COLUMN_WIDTH: usize = 20;

/// Pretty-print any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.1} {unit}"))
}

fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta:.1}")
    } else {
        format!("{delta:.1}")
    }
}

/// Client roster with evaluation counts
pub fn display_clients(clients: &[(Client, usize)]) {
    println!("\n{} client(s)", clients.len());
    println!("{}", "=".repeat(80));
    for (client, count) in clients {
        println!(
            "{:<24} {:>3} y  {:<11} {:>6.1} cm  {:>2} evaluation(s)",
            client.name, client.age, client.sex, client.height_cm, count
        );
        println!("   ID: {}", client.id);
    }
}

/// One line per evaluation, oldest first
pub fn display_evaluations(client: &Client, evaluations: &[Evaluation]) {
    println!("\n{} - {} evaluation(s)", client.name, evaluations.len());
    println!("{}", "=".repeat(80));
    for evaluation in evaluations {
        let device = evaluation
            .bioimpedance
            .as_ref()
            .map_or_else(|| "-".to_owned(), |b| b.scale_type().to_string());
        println!(
            "{}  weight {:<10} fat {:<8} device {:<7} postural {}",
            evaluation.date,
            format_optional(evaluation.weight_kg(), "kg"),
            format_optional(evaluation.body_fat_percentage, "%"),
            device,
            if evaluation.postural.is_some() { "yes" } else { "no" }
        );
        println!("   ID: {}", evaluation.id);
    }
}

/// Summary of a freshly created or reopened evaluation
pub fn display_new_evaluation(evaluation: &Evaluation, reopened: bool) {
    if reopened {
        println!("\nAn evaluation already exists for {}; returning it.", evaluation.date);
    } else {
        println!("\nCreated evaluation for {}", evaluation.date);
    }
    println!("   ID: {}", evaluation.id);
    println!("   Weight: {}", format_optional(evaluation.weight_kg(), "kg"));
    println!(
        "   Height: {}",
        format_optional(evaluation.measurements.height_cm, "cm")
    );
}

/// Mass decomposition for one evaluation
pub fn display_composition(client: &Client, evaluation: &Evaluation, composition: &BodyComposition) {
    println!("\nBody composition - {} ({})", client.name, evaluation.date);
    println!("{}", "=".repeat(60));
    let rows = [
        ("Weight", composition.weight_kg, None),
        ("Fat mass", composition.fat_mass_kg, Some(composition.fat_percentage)),
        ("Lean mass", composition.lean_mass_kg, Some(composition.lean_percentage)),
        ("Muscle mass", composition.muscle_mass_kg, Some(composition.muscle_percentage)),
        ("Bone mass", composition.bone_mass_kg, Some(composition.bone_percentage)),
        ("Residual mass", composition.residual_mass_kg, Some(composition.residual_percentage)),
        ("Ideal weight", composition.ideal_weight_kg, None),
        ("Fat loss needed", composition.fat_loss_needed_kg, None),
    ];
    for (label, kg, share) in rows {
        match share {
            Some(pct) => println!("   {label:<18} {kg:>7.2} kg  {pct:>5.1} %"),
            None => println!("   {label:<18} {kg:>7.2} kg"),
        }
    }
    if let Some(bmi) = composition.bmi {
        println!("   {:<18} {bmi:>7.1}", "BMI");
    }
    if let Some(ratio) = composition.waist_hip_ratio {
        println!("   {:<18} {ratio:>7.2}", "Waist/hip ratio");
    }
}

/// Skinfold-based body-fat estimate
pub fn display_skinfold_estimate(client: &Client, evaluation: &Evaluation, estimate: &SkinfoldEstimate) {
    let protocol = match estimate.protocol {
        SkinfoldProtocol::JacksonPollock3 => "Jackson-Pollock 3-site",
        SkinfoldProtocol::JacksonPollock7 => "Jackson-Pollock 7-site",
    };
    println!("\nSkinfold estimate - {} ({})", client.name, evaluation.date);
    println!("{}", "=".repeat(60));
    println!("   Protocol:      {protocol}");
    println!("   Sum of sites:  {:.1} mm", estimate.sum_mm);
    println!("   Body density:  {:.4} g/cm3", estimate.body_density);
    println!("   Body fat:      {:.1} %", estimate.body_fat_percentage);
    if let Some(measured) = evaluation.body_fat_percentage {
        println!("   Recorded:      {measured:.1} %");
    }
}

/// Field-by-evaluation grid with deltas against the previous column
pub fn display_comparison_table(table: &ComparisonTable) {
    let device = table
        .scale_type
        .map_or_else(|| "no device".to_owned(), |s| s.to_string());
    println!("\nComparison ({device})");
    println!("{}", "=".repeat(LABEL_WIDTH + COLUMN_WIDTH * table.columns.len()));

    print!("{:<LABEL_WIDTH$}", "Field");
    for column in &table.columns {
        print!("{:<COLUMN_WIDTH$}", column.date.to_string());
    }
    println!();

    for row in table.rows.iter().filter(|row| row.has_values()) {
        let label = if row.field.unit.is_empty() {
            row.field.label.to_owned()
        } else {
            format!("{} ({})", row.field.label, row.field.unit)
        };
        print!("{label:<LABEL_WIDTH$}");
        for cell in &row.cells {
            let text = match (cell.value, cell.delta, cell.trend) {
                (None, _, _) => "-".to_owned(),
                (Some(value), Some(delta), Some(trend)) => {
                    format!("{value:.1} ({} {})", format_delta(delta), trend.symbol())
                }
                (Some(value), _, _) => format!("{value:.1}"),
            };
            print!("{text:<COLUMN_WIDTH$}");
        }
        println!();
    }
}

fn join_labels(items: &[ViewDeviation]) -> String {
    if items.is_empty() {
        return "none".to_owned();
    }
    items
        .iter()
        .map(ViewDeviation::label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_change(change: &PosturalChange) {
    println!("   Resolved:   {}", join_labels(&change.resolved));
    println!("   New:        {}", join_labels(&change.new));
    println!("   Persisting: {}", join_labels(&change.persisting));
}

/// Deviation counts per view plus what changed between adjacent evaluations
pub fn display_postural_summary(summary: &PosturalSummary) {
    println!("\nPostural summary");
    println!("{}", "=".repeat(80));
    for snapshot in &summary.snapshots {
        if !snapshot.assessed {
            println!("{}  not assessed", snapshot.date);
            continue;
        }
        let per_view: Vec<String> = PosturalView::ALL
            .iter()
            .map(|view| {
                let count = snapshot.counts_by_view.get(view).copied().unwrap_or(0);
                format!("{} {count}", view.label())
            })
            .collect();
        println!(
            "{}  {} deviation(s)  [{}]",
            snapshot.date,
            snapshot.total,
            per_view.join(", ")
        );
    }

    for change in &summary.changes {
        println!("\n{} -> {}", change.from_date, change.to_date);
        display_change(change);
    }
}

/// Selection warning, shown the way the dashboard toast reads
pub fn display_warning(warning: &SelectionWarning) {
    eprintln!("Warning: {warning}");
}

/// Generated insight with provenance
pub fn display_insight(insight: &Insight) {
    println!("\n{} ({})", insight.kind, insight.model);
    println!("{}", "=".repeat(80));
    println!("{}", insight.content.trim());
    println!("{}", "=".repeat(80));
    if let Some(usage) = insight.usage {
        println!(
            "Tokens: {} prompt + {} completion",
            usage.prompt_tokens, usage.completion_tokens
        );
    }
    println!("Generated at {}", insight.generated_at.format("%Y-%m-%d %H:%M UTC"));
}

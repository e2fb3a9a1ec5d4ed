// ===== skyscore/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use skyscore::result::{ContestResult, ResultStatus};

fn fmt_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

pub fn print_result(name: &str, result: &ContestResult) {
    println!("\nTrace: {}", name);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let status_cell = match result.status {
        ResultStatus::Scored => Cell::new("SCORED").fg(Color::Green),
        ResultStatus::Unscored => Cell::new("UNSCORED").fg(Color::Yellow),
    };

    table.add_row(vec![
        Cell::new("Rule").add_attribute(Attribute::Bold),
        Cell::new("Status"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Distance"),
        Cell::new("Duration"),
        Cell::new("Closed"),
    ]);
    table.add_row(vec![
        Cell::new(result.rule.to_string()),
        status_cell,
        Cell::new(format!("{:.2} pts", result.score)).fg(Color::Cyan),
        Cell::new(format!("{:.2} km", result.distance_km)),
        Cell::new(fmt_duration(result.duration_secs)),
        Cell::new(if result.closed { "yes" } else { "no" }),
    ]);
    println!("{}", table);

    if result.path.is_empty() {
        return;
    }

    let mut turnpoints = Table::new();
    turnpoints
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    turnpoints.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Index"),
        Cell::new("Lat"),
        Cell::new("Lon"),
        Cell::new("Time"),
    ]);
    for i in 1..=4 {
        if let Some(col) = turnpoints.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    for (slot, fix) in result.path.iter().enumerate() {
        turnpoints.add_row(vec![
            Cell::new(slot.to_string()),
            Cell::new(fix.trace_index.to_string()),
            Cell::new(format!("{:.5}", fix.lat)),
            Cell::new(format!("{:.5}", fix.lon)),
            Cell::new(fmt_duration(fix.time)),
        ]);
    }
    println!("{}", turnpoints);
}

pub fn print_comparison(results: &[(String, ContestResult)]) {
    let Some(best) = results
        .iter()
        .max_by(|a, b| a.1.score.total_cmp(&b.1.score))
    else {
        return;
    };
    let best_score = best.1.score;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(format!("Comparison vs Best ({})", best.0)).add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Delta"),
        Cell::new("% Diff"),
    ]);
    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, result) in results {
        let delta = result.score - best_score;
        let pct = if best_score > 0.0 {
            (delta / best_score) * 100.0
        } else {
            0.0
        };

        let name_cell = if name == &best.0 {
            Cell::new(name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(name).add_attribute(Attribute::Bold)
        };

        table.add_row(vec![
            name_cell,
            Cell::new(format!("{:.2}", result.score)),
            Cell::new(format!("{:.2}", delta)),
            Cell::new(format!("{:.1}%", pct)),
        ]);
    }
    println!("\n{}", table);
}

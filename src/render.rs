//! Table rendering for human inspection of schedules and search statistics.

use prettytable::{Cell, Row, Table};

use crate::{
    schedule::ScheduleGrid,
    solver::{
        constraint::Constraint,
        engine::{ConstraintId, PerConstraintStats, SearchStats},
    },
};

/// Renders the schedule grid with the day header and the echoed daily rest
/// quota row.
pub fn render_schedule_table(grid: &ScheduleGrid) -> String {
    let mut table = Table::new();

    let mut header = vec![Cell::new("Day")];
    header.extend((1..=grid.horizon).map(|d| Cell::new(&d.to_string())));
    table.add_row(Row::new(header));

    let mut quota_row = vec![Cell::new("May rest")];
    quota_row.extend(grid.daily_rest_quota.iter().map(|q| Cell::new(&q.to_string())));
    table.add_row(Row::new(quota_row));

    for (person, name) in grid.people.iter().enumerate() {
        let mut row = vec![Cell::new(name)];
        row.extend((1..=grid.horizon).map(|day| Cell::new(&grid.state(person, day).to_string())));
        table.add_row(Row::new(row));
    }

    table.to_string()
}

/// Renders per-constraint revision counts and timings, slowest last.
pub fn render_stats_table(stats: &SearchStats, constraints: &[Box<dyn Constraint>]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(_, s)| s.time_spent_micros);

    for (constraint_id, constraint_stats) in sorted_stats {
        let descriptor = constraints[*constraint_id].descriptor();
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}

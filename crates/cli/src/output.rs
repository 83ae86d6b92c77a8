//! Terminal rendering for records and notices

use colored::Colorize;

use backoffice_console::{FieldError, ListController};
use backoffice_core::{EntityKind, Notice, NoticeLevel, Record};

/// Column paths printed by `list`
pub fn list_columns(kind: EntityKind) -> Vec<&'static str> {
    let mut columns = vec!["id"];
    columns.extend(kind.search_fields().iter().copied());
    columns
}

pub fn status_text(record: &Record) -> &'static str {
    match record.is_active() {
        Some(false) => "Inactive",
        _ => "Active",
    }
}

/// Render rows as a left-aligned, space-padded table
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.iter().map(|row| line(row)));
    out.join("\n")
}

/// Current page of a list as a table
pub fn list_table(list: &ListController) -> String {
    let columns = list_columns(list.kind());
    let mut headers: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    headers.push("status".to_string());

    let rows: Vec<Vec<String>> = list
        .visible()
        .into_iter()
        .map(|record| {
            let mut row: Vec<String> = columns.iter().map(|c| record.display(c)).collect();
            row.push(status_text(record).to_string());
            row
        })
        .collect();

    render_table(&headers, &rows)
}

pub fn page_footer(list: &ListController) -> String {
    format!(
        "Page {} of {} ({} matching)",
        list.page(),
        list.total_pages(),
        list.filtered_len()
    )
}

/// `key: value` lines for one record, in response order
pub fn record_details(record: &Record) -> String {
    let width = record
        .as_map()
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);

    record
        .as_map()
        .keys()
        .map(|key| format!("{:>width$}: {}", key, record.display(key), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a notice with a level marker
pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{} {}", "✓".green().bold(), notice.text),
        NoticeLevel::Info => println!("{} {}", "i".blue().bold(), notice.text),
        NoticeLevel::Warning => eprintln!("{} {}", "!".yellow().bold(), notice.text),
        NoticeLevel::Error => eprintln!("{} {}", "✗".red().bold(), notice.text),
    }
}

pub fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {} {}", format!("{}:", error.field).yellow(), error.message);
    }
}

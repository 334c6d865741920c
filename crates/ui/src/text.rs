//! Plain-text rendering of frames.

use std::fmt::Write as _;

use rowdeck_application::{DetailScreen, ListBody, ListScreen, RenderedTable, Screen};

use crate::bridge::Frame;
use crate::notice::Notice;

const COLUMN_SEPARATOR: &str = " | ";

/// Renders a frame as text, one screen per call.
#[must_use]
pub fn render_frame(frame: &Frame) -> String {
    let mut out = render_table(&frame.table);
    render_notices(&mut out, &frame.notices);
    out
}

/// Renders the table without notices.
#[must_use]
pub fn render_table(table: &RenderedTable) -> String {
    let mut out = match &table.screen {
        Screen::List(list) => render_list(list),
        Screen::Detail(detail) => render_detail(detail),
    };

    if table.confirmation.is_open {
        let target = table
            .confirmation
            .target
            .as_ref()
            .map_or_else(String::new, |id| format!(" {id}"));
        let _ = writeln!(out, "\nDelete record{target}? [yes] [no]");
    }
    out
}

fn render_list(list: &ListScreen) -> String {
    let mut out = String::new();

    let mut actions: Vec<String> = Vec::new();
    if list.show_refresh {
        actions.push("[refresh]".to_string());
    }
    actions.extend(list.extra_actions.iter().map(|label| format!("[{label}]")));
    if actions.is_empty() {
        let _ = writeln!(out, "{}", list.title);
    } else {
        let _ = writeln!(out, "{}  {}", list.title, actions.join(" "));
    }

    let mut header: Vec<String> = list.headers.iter().map(|h| h.display()).collect();
    let rows: Vec<Vec<String>> = match &list.body {
        ListBody::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                cells.push(index.to_string());
                cells.extend(row.cells.iter().cloned());
                cells
            })
            .collect(),
        ListBody::Loading(_) | ListBody::Empty(_) => Vec::new(),
    };
    header.insert(0, "#".to_string());

    let widths = column_widths(&header, &rows);
    let _ = writeln!(out, "{}", pad_row(&header, &widths));
    let rule_width =
        widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(rule_width));

    match &list.body {
        ListBody::Loading(message) | ListBody::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        ListBody::Rows(_) => {
            for row in &rows {
                let _ = writeln!(out, "{}", pad_row(row, &widths));
            }
        }
    }
    out
}

fn render_detail(detail: &DetailScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);

    let label_width = detail
        .fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);
    for field in &detail.fields {
        let _ = writeln!(
            out,
            "{}:{} {}",
            field.label,
            " ".repeat(label_width - field.label.chars().count()),
            field.value
        );
    }

    let mut actions = vec!["[back]"];
    if detail.show_delete {
        actions.push("[delete]");
    }
    let _ = writeln!(out, "{}", actions.join(" "));
    out
}

fn render_notices(out: &mut String, notices: &[Notice]) {
    if notices.is_empty() {
        return;
    }
    out.push('\n');
    for notice in notices {
        let _ = writeln!(out, "{notice}");
    }
}

fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let fill = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(fill))
        })
        .collect();
    padded.join(COLUMN_SEPARATOR).trim_end().to_string()
}

// src/table/parse.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use tracing::debug;

use super::RawTable;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should parse"));
static THEAD_TR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead tr").expect("thead tr selector should parse"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("cell selector should parse"));

/// Extract the stats table from a fetched league page.
///
/// The source hides some tables from naive parsers by wrapping them in an
/// HTML comment, so any comment carrying a `<table` payload is checked first;
/// if none parses, the first table in the document proper is used. Returns
/// None when neither exists.
pub fn parse_stats_table(html: &str) -> Option<RawTable> {
    let doc = Html::parse_document(html);

    for node in doc.tree.nodes() {
        if let Node::Comment(comment) = node.value() {
            let body: &str = &comment.comment;
            if !body.contains("<table") {
                continue;
            }
            let inner = Html::parse_document(body);
            if let Some(table) = inner.select(&TABLE).next().and_then(parse_table) {
                debug!("stats table found inside HTML comment");
                return Some(table);
            }
        }
    }

    doc.select(&TABLE).next().and_then(parse_table)
}

/// Parse one `<table>` element into a grid, preserving grouped headers.
fn parse_table(table: ElementRef) -> Option<RawTable> {
    let head_rows: Vec<ElementRef> = table.select(&THEAD_TR).collect();
    let head_ids: HashSet<_> = head_rows.iter().map(|tr| tr.id()).collect();

    let mut body_rows: Vec<ElementRef> = table
        .select(&TR)
        .filter(|tr| !head_ids.contains(&tr.id()))
        .collect();

    // Header rows: the last <thead> row holds the leaf column names; a row
    // above it (if any) is the group header, with colspans spanning each
    // category. Tables without a <thead> use their first row as the header.
    let (over_row, leaf_row) = match head_rows.len() {
        0 => {
            if body_rows.is_empty() {
                return None;
            }
            (None, body_rows.remove(0))
        }
        1 => (None, head_rows[0]),
        _ => (Some(head_rows[0]), *head_rows.last()?),
    };

    let headers: Vec<String> = leaf_row.select(&CELL).map(cell_text).collect();
    if headers.is_empty() {
        return None;
    }

    let mut groups = match over_row {
        Some(row) => expand_group_labels(row),
        None => Vec::new(),
    };
    if groups.len() != headers.len() {
        if !groups.is_empty() {
            debug!(
                groups = groups.len(),
                headers = headers.len(),
                "group header width differs from leaf header; padding"
            );
        }
        groups.resize(headers.len(), String::new());
    }

    let rows: Vec<Vec<String>> = body_rows
        .iter()
        .filter(|tr| !is_repeated_header(tr))
        .map(|tr| tr.select(&CELL).map(cell_text).collect())
        .collect();

    Some(RawTable {
        groups,
        headers,
        rows,
    })
}

/// Expand a group-header row into one label per leaf column via colspans.
fn expand_group_labels(row: ElementRef) -> Vec<String> {
    let mut labels = Vec::new();
    for cell in row.select(&CELL) {
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        let label = cell_text(cell);
        for _ in 0..span {
            labels.push(label.clone());
        }
    }
    labels
}

/// The source repeats the header row inside the body every screenful;
/// those rows are markup, not data.
fn is_repeated_header(tr: &ElementRef) -> bool {
    tr.value()
        .attr("class")
        .map(|c| c.split_whitespace().any(|c| c == "thead"))
        .unwrap_or(false)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

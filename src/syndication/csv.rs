// src/syndication/csv.rs

use crate::domain::listing::Listing;
use crate::syndication::columns::{columns, Cell};
use crate::syndication::ExportOptions;

/// Quotes a field when it holds a comma, quote, CR or LF; inner quotes are doubled.
pub fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render(cell: Cell) -> String {
    match cell {
        Cell::Text(s) => escape_csv(&s),
        Cell::Number(n) => n.to_string(),
        Cell::Empty => String::new(),
    }
}

/// Header row plus one row per listing, `\n`-terminated.
pub fn export_csv(listings: &[Listing], opts: &ExportOptions) -> String {
    let cols = columns(opts.include_photos, opts.include_private_fields);

    let mut out = cols.iter().map(|c| c.header).collect::<Vec<_>>().join(",");
    out.push('\n');

    for listing in listings {
        let row: Vec<String> = cols.iter().map(|c| render((c.value)(listing))).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

// src/syndication/xlsx.rs

use crate::domain::listing::Listing;
use crate::syndication::columns::{columns, Cell};
use crate::syndication::{ExportError, ExportOptions};
use rust_xlsxwriter::Workbook;
use tracing::warn;

/// Excel refuses strings longer than this many characters.
pub const MAX_CELL_CHARS: usize = 32_767;

fn fit_cell(text: &str, listing_id: &str, header: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    warn!(listing = %listing_id, column = %header, "cell truncated to spreadsheet limit");
    text.chars().take(MAX_CELL_CHARS).collect()
}

/// Same columns as the CSV export, as a single-sheet workbook.
pub fn export_xlsx(listings: &[Listing], opts: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let cols = columns(opts.include_photos, opts.include_private_fields);

    // Headers
    for (col, column) in cols.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, column.header)
            .map_err(|e| {
                ExportError::Xlsx(format!("Failed to write header '{}': {}", column.header, e))
            })?;
    }

    // Rows
    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;

        for (c, column) in cols.iter().enumerate() {
            let c = c as u16;
            let written = match (column.value)(listing) {
                Cell::Text(s) => worksheet
                    .write_string(r, c, fit_cell(&s, &listing.id, column.header))
                    .map(|_| ()),
                Cell::Number(n) => worksheet.write_number(r, c, n).map(|_| ()),
                Cell::Empty => Ok(()),
            };
            written.map_err(|e| {
                ExportError::Xlsx(format!(
                    "Failed to write {} for {}: {}",
                    column.header, listing.id, e
                ))
            })?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(format!("Failed to save workbook: {}", e)))
}

pub mod columns;
pub mod csv;
pub mod json;
pub mod partner;
pub mod xlsx;
pub mod xml;

use crate::domain::listing::Listing;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use partner::{
    builtin_partners, find_partner, generate_export_url, ExportFormat, SyndicationPartner,
    XmlSchema,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Xlsx(String),
}

/// Parameters shared by every formatter.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub partner_id: String,
    pub account_id: String,
    /// Used as the contact email on listings that have none.
    pub lead_email: String,
    pub include_photos: bool,
    pub include_private_fields: bool,
    pub generated_at: DateTime<Utc>,
}

impl ExportOptions {
    /// Options for a configured partner: its ids and lead email, photos on, private fields off.
    pub fn for_partner(partner: &SyndicationPartner) -> Self {
        Self {
            partner_id: partner.id.clone(),
            account_id: partner.account_id.clone(),
            lead_email: partner.lead_email.clone(),
            include_photos: true,
            include_private_fields: false,
            generated_at: Utc::now(),
        }
    }
}

/// A rendered export.
#[derive(Debug)]
pub enum ExportOutput {
    Text(String),
    Binary(Vec<u8>),
}

/// Serializes `listings` in `format`. XML uses the partner's `schema`.
pub fn export_listings(
    listings: &[Listing],
    format: ExportFormat,
    schema: XmlSchema,
    opts: &ExportOptions,
) -> Result<ExportOutput, ExportError> {
    Ok(match format {
        ExportFormat::Xml => ExportOutput::Text(xml::export_xml(listings, schema, opts)),
        ExportFormat::Csv => ExportOutput::Text(csv::export_csv(listings, opts)),
        ExportFormat::Json => ExportOutput::Text(json::export_json(listings, opts)?),
        ExportFormat::Xlsx => ExportOutput::Binary(xlsx::export_xlsx(listings, opts)?),
    })
}

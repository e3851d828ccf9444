// src/syndication/partner.rs

use crate::domain::fields::ListingField;
use crate::domain::listing::ListingType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xml,
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Xml => "xml",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unsupported format '{other}'")),
        }
    }
}

/// Which XML vocabulary a partner's feed is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XmlSchema {
    Zillow,
    #[serde(rename = "mhvillage")]
    MhVillage,
    #[default]
    Generic,
}

/// An external aggregator consuming our listing feed. Static configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyndicationPartner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub xml_schema: XmlSchema,
    #[serde(default)]
    pub lead_email: String,
    #[serde(default)]
    pub account_id: String,
    /// Empty means every listing type is accepted.
    #[serde(default)]
    pub listing_types: Vec<ListingType>,
    #[serde(default)]
    pub required_fields: Vec<ListingField>,
}

impl SyndicationPartner {
    pub fn accepts(&self, listing_type: ListingType) -> bool {
        self.listing_types.is_empty() || self.listing_types.contains(&listing_type)
    }
}

/// Zillow and MHVillage, used when configuration lists no partners.
pub fn builtin_partners() -> Vec<SyndicationPartner> {
    vec![
        SyndicationPartner {
            id: "zillow".into(),
            name: "Zillow".into(),
            format: ExportFormat::Xml,
            xml_schema: XmlSchema::Zillow,
            lead_email: String::new(),
            account_id: String::new(),
            listing_types: vec![
                ListingType::ManufacturedHome,
                ListingType::RentalProperty,
                ListingType::Land,
            ],
            required_fields: vec![
                ListingField::Price,
                ListingField::Address,
                ListingField::City,
                ListingField::State,
                ListingField::PostalCode,
                ListingField::Bedrooms,
                ListingField::Bathrooms,
                ListingField::Photos,
            ],
        },
        SyndicationPartner {
            id: "mhvillage".into(),
            name: "MHVillage".into(),
            format: ExportFormat::Xml,
            xml_schema: XmlSchema::MhVillage,
            lead_email: String::new(),
            account_id: String::new(),
            listing_types: vec![ListingType::ManufacturedHome],
            required_fields: vec![
                ListingField::Year,
                ListingField::Make,
                ListingField::Model,
                ListingField::Price,
                ListingField::Dimensions,
                ListingField::City,
                ListingField::State,
                ListingField::PostalCode,
            ],
        },
    ]
}

pub fn find_partner<'a>(
    partners: &'a [SyndicationPartner],
    id: &str,
) -> Option<&'a SyndicationPartner> {
    partners.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Feed URL handed to a partner. Parameters are form-urlencoded in a fixed
/// order; empty optional ones are left out.
pub fn generate_export_url(base_url: &str, partner: &SyndicationPartner) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("partnerId", &partner.id);
    query.append_pair("format", partner.format.as_str());
    if !partner.lead_email.is_empty() {
        query.append_pair("leadEmail", &partner.lead_email);
    }
    if !partner.account_id.is_empty() {
        query.append_pair("accountId", &partner.account_id);
    }
    if !partner.listing_types.is_empty() {
        let types: Vec<&str> = partner.listing_types.iter().map(|t| t.as_str()).collect();
        query.append_pair("listingTypes", &types.join(","));
    }

    let encoded_id: String = form_urlencoded::byte_serialize(partner.id.as_bytes()).collect();
    format!(
        "{}/feeds/{}?{}",
        base_url.trim_end_matches('/'),
        encoded_id,
        query.finish()
    )
}

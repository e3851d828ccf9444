use crate::config::Config;
use crate::db::listings::{list_listings, ListingFilter};
use crate::db::Database;
use crate::domain::listing::ListingType;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::export::{last_modified, render};
use crate::router::Query;
use crate::syndication::{find_partner, ExportFormat, ExportOptions, XmlSchema};
use astra::Request;
use tracing::debug;

/// Which vocabularies and formats a feed path serves.
fn feed_shape(
    feed_id: &str,
    config: &Config,
) -> Result<(XmlSchema, ExportFormat, &'static [ExportFormat]), ServerError> {
    const XML_ONLY: &[ExportFormat] = &[ExportFormat::Xml];
    const XML_OR_JSON: &[ExportFormat] = &[ExportFormat::Xml, ExportFormat::Json];
    const TEXT: &[ExportFormat] = &[ExportFormat::Xml, ExportFormat::Csv, ExportFormat::Json];

    match feed_id.to_ascii_lowercase().as_str() {
        "zillow" => Ok((XmlSchema::Zillow, ExportFormat::Xml, XML_ONLY)),
        "mhvillage" => Ok((XmlSchema::MhVillage, ExportFormat::Xml, XML_OR_JSON)),
        _ => {
            let partner = find_partner(&config.partners, feed_id).ok_or(ServerError::NotFound)?;
            Ok((partner.xml_schema, partner.format, TEXT))
        }
    }
}

/// GET /feeds/{feed}: the active inventory as a partner pulls it.
///
/// `partnerId` is required and echoed into the feed. `listingType`,
/// `listingTypes` and `companyId` narrow the inventory; `accountId` and
/// `leadEmail` override the configured partner's values.
pub fn partner_feed(req: &Request, db: &Database, config: &Config, feed_id: &str) -> ResultResp {
    let query = Query::from_request(req);
    let partner_id = query.required("partnerId")?;
    let (schema, default_format, allowed) = feed_shape(feed_id, config)?;

    let format = query
        .parse_opt::<ExportFormat>("format")?
        .unwrap_or(default_format);
    if !allowed.contains(&format) {
        return Err(ServerError::BadRequest(format!(
            "format {format} is not available for this feed"
        )));
    }

    let filter = ListingFilter {
        company_id: query.get("companyId").map(str::to_string),
        listing_type: query.parse_opt::<ListingType>("listingType")?,
        ..ListingFilter::active()
    };
    let mut listings = list_listings(db, &filter)?;

    let types = query.parse_list::<ListingType>("listingTypes")?;
    if !types.is_empty() {
        listings.retain(|l| types.contains(&l.listing_type));
    }

    let configured = find_partner(&config.partners, feed_id);
    if let Some(partner) = configured {
        listings.retain(|l| partner.accepts(l.listing_type));
    }

    let opts = ExportOptions {
        partner_id: partner_id.to_string(),
        account_id: query
            .get("accountId")
            .map(str::to_string)
            .or_else(|| configured.map(|p| p.account_id.clone()))
            .unwrap_or_default(),
        lead_email: query
            .get("leadEmail")
            .map(str::to_string)
            .or_else(|| configured.map(|p| p.lead_email.clone()))
            .unwrap_or_default(),
        include_photos: query.flag("includePhotos", true),
        include_private_fields: false,
        generated_at: last_modified(&listings),
    };

    debug!(feed = %feed_id, partner = %partner_id, count = listings.len(), "feed rendered");
    render(req, &listings, format, schema, &opts, None)
}

use crate::config::Config;
use crate::db::listings::{list_listings, ListingFilter};
use crate::db::Database;
use crate::domain::listing::{Listing, ListingStatus};
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx::XLSX_MIME;
use crate::responses::{feed_response, xlsx_response};
use crate::router::Query;
use crate::syndication::{
    export_listings, find_partner, ExportError, ExportFormat, ExportOptions, ExportOutput,
    XmlSchema,
};
use astra::Request;
use chrono::{DateTime, Utc};
use tracing::info;

pub fn content_type(format: ExportFormat) -> mime::Mime {
    match format {
        ExportFormat::Xml => mime::TEXT_XML,
        ExportFormat::Csv => mime::TEXT_CSV_UTF_8,
        ExportFormat::Json => mime::APPLICATION_JSON,
        ExportFormat::Xlsx => XLSX_MIME
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
    }
}

/// Feeds are stamped with the newest listing change, so an unchanged
/// inventory renders byte-identical output (and a stable ETag).
pub fn last_modified(listings: &[Listing]) -> DateTime<Utc> {
    listings
        .iter()
        .map(|l| l.updated_at)
        .max()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

pub fn if_none_match(req: &Request) -> Option<&str> {
    req.headers()
        .get("If-None-Match")
        .and_then(|v| v.to_str().ok())
}

/// Renders and wraps an export. `filename` makes it a download.
pub fn render(
    req: &Request,
    listings: &[Listing],
    format: ExportFormat,
    schema: XmlSchema,
    opts: &ExportOptions,
    filename: Option<&str>,
) -> ResultResp {
    let output = export_listings(listings, format, schema, opts).map_err(|e| match e {
        ExportError::Xlsx(msg) => ServerError::XlsxError(msg),
        other => ServerError::ExportError(other),
    })?;

    match output {
        ExportOutput::Text(body) => feed_response(
            body,
            content_type(format).as_ref(),
            if_none_match(req),
            filename,
        ),
        ExportOutput::Binary(bytes) => xlsx_response(
            bytes,
            filename.unwrap_or("listings.xlsx"),
        ),
    }
}

/// GET /export: a configured partner's export, with caller-chosen inclusions.
pub fn export(req: &Request, db: &Database, config: &Config) -> ResultResp {
    let query = Query::from_request(req);
    let partner_id = query.required("partnerId")?;
    let partner = find_partner(&config.partners, partner_id).ok_or(ServerError::NotFound)?;

    let format = query
        .parse_opt::<ExportFormat>("format")?
        .unwrap_or(partner.format);
    let status = query
        .parse_opt::<ListingStatus>("status")?
        .unwrap_or(ListingStatus::Active);

    let filter = ListingFilter {
        company_id: query.get("companyId").map(str::to_string),
        status: Some(status),
        ..ListingFilter::default()
    };
    let mut listings = list_listings(db, &filter)?;
    listings.retain(|l| partner.accepts(l.listing_type));

    let mut opts = ExportOptions::for_partner(partner);
    opts.include_photos = query.flag("includePhotos", true);
    opts.include_private_fields = query.flag("includePrivateFields", false);
    opts.generated_at = last_modified(&listings);

    info!(
        partner = %partner.id,
        format = %format,
        count = listings.len(),
        private = opts.include_private_fields,
        "export rendered"
    );

    let filename = format!("{}-listings.{}", partner.id, format.as_str());
    render(req, &listings, format, partner.xml_schema, &opts, Some(&filename))
}

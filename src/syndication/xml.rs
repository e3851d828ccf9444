// src/syndication/xml.rs
//
// XML feed writers. Optional elements are left out entirely when their value
// is falsy (missing, blank, zero, false); consumers key off tag presence.

use crate::domain::listing::Listing;
use crate::syndication::partner::XmlSchema;
use crate::syndication::ExportOptions;
use chrono::SecondsFormat;

/// Entity-escapes text for element content and attribute values, dropping
/// characters XML 1.0 cannot carry at all.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// A value that may appear in a feed. Falsy values are omitted.
pub trait FeedValue {
    fn is_truthy(&self) -> bool;
    fn render(&self) -> String;
}

impl FeedValue for &str {
    fn is_truthy(&self) -> bool {
        !self.trim().is_empty()
    }
    fn render(&self) -> String {
        self.trim().to_string()
    }
}

impl FeedValue for String {
    fn is_truthy(&self) -> bool {
        self.as_str().is_truthy()
    }
    fn render(&self) -> String {
        self.as_str().render()
    }
}

macro_rules! numeric_feed_value {
    ($($t:ty),+) => {
        $(impl FeedValue for $t {
            fn is_truthy(&self) -> bool {
                *self != (0 as $t)
            }
            fn render(&self) -> String {
                self.to_string()
            }
        })+
    };
}

numeric_feed_value!(i32, i64, u32);

impl FeedValue for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
    fn render(&self) -> String {
        // 2.0 renders as "2", 2.5 as "2.5".
        self.to_string()
    }
}

impl FeedValue for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: FeedValue> FeedValue for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(FeedValue::is_truthy)
    }
    fn render(&self) -> String {
        self.as_ref().map(FeedValue::render).unwrap_or_default()
    }
}

/// Indenting writer that only knows how to emit what feeds need.
pub struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            out: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs.iter().filter(|(_, v)| !v.is_empty()) {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_xml(value));
            self.out.push('"');
        }
    }

    /// Opens `tag`; attributes with empty values are skipped.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.push_attrs(attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.push_attrs(attrs);
        self.out.push_str("/>\n");
    }

    /// `<tag>value</tag>`, or nothing when the value is falsy.
    pub fn field(&mut self, tag: &str, value: impl FeedValue) {
        if !value.is_truthy() {
            return;
        }
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.out.push_str(&escape_xml(&value.render()));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// Wraps `items` in `outer`, one `inner` element each; nothing when empty.
    pub fn list<'a>(&mut self, outer: &str, inner: &str, items: impl IntoIterator<Item = &'a str>) {
        let items: Vec<&str> = items.into_iter().filter(|s| s.is_truthy()).collect();
        if items.is_empty() {
            return;
        }
        self.open(outer, &[]);
        for item in items {
            self.field(inner, item);
        }
        self.close(outer);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `listings` in the given partner vocabulary.
pub fn export_xml(listings: &[Listing], schema: XmlSchema, opts: &ExportOptions) -> String {
    let generated_at = opts.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut w = XmlWriter::new();

    match schema {
        XmlSchema::Zillow | XmlSchema::Generic => {
            w.open(
                "listings",
                &[("partnerId", opts.partner_id.as_str()), ("generatedAt", generated_at.as_str())],
            );
            for listing in listings {
                write_standard_listing(&mut w, listing, opts);
            }
            w.close("listings");
        }
        XmlSchema::MhVillage => {
            w.open(
                "MHVillageFeed",
                &[
                    ("partnerId", opts.partner_id.as_str()),
                    ("accountId", opts.account_id.as_str()),
                    ("generatedAt", generated_at.as_str()),
                ],
            );
            for listing in listings {
                write_mhvillage_home(&mut w, listing, opts);
            }
            w.close("MHVillageFeed");
        }
    }

    w.finish()
}

fn contact_email<'a>(listing: &'a Listing, opts: &'a ExportOptions) -> &'a str {
    if listing.contact.email.trim().is_empty() {
        &opts.lead_email
    } else {
        &listing.contact.email
    }
}

fn write_standard_listing(w: &mut XmlWriter, l: &Listing, opts: &ExportOptions) {
    w.open("listing", &[("id", l.id.as_str())]);

    w.field("status", l.status.as_str());
    w.field("offerType", l.offer_type.as_str());
    w.field("listingType", l.listing_type.as_str());
    w.field("title", l.title.as_str());
    w.field("year", l.year);
    w.field("make", l.make.as_str());
    w.field("model", l.model.as_str());

    if l.offer_type.sells() {
        w.field("salePrice", l.sale_price);
    }
    if l.offer_type.rents() {
        w.field("rentPrice", l.rent_price);
    }
    w.field("lotRent", l.lot_rent);

    w.field("bedrooms", l.bedrooms);
    w.field("bathrooms", l.bathrooms);
    w.field("squareFeet", l.square_feet);
    w.field("description", l.description.as_str());

    let loc = &l.location;
    let has_location = loc.address.is_truthy()
        || loc.city.is_truthy()
        || loc.state.is_truthy()
        || loc.postal_code.is_truthy()
        || loc.latitude.is_truthy()
        || loc.longitude.is_truthy();
    if has_location {
        w.open("location", &[]);
        w.field("street", loc.address.as_str());
        w.field("city", loc.city.as_str());
        w.field("state", loc.state.as_str());
        w.field("zip", loc.postal_code.as_str());
        w.field("community", loc.community_name.as_str());
        w.field("lat", loc.latitude);
        w.field("lng", loc.longitude);
        w.close("location");
    }

    if opts.include_photos {
        let photos = l.media.ordered_photos();
        if !photos.is_empty() {
            w.open("photos", &[]);
            for url in photos {
                w.empty("photo", &[("url", url)]);
            }
            w.close("photos");
        }
    }

    w.list("features", "feature", l.enabled_features());

    let email = contact_email(l, opts);
    if l.contact.name.is_truthy() || email.is_truthy() || l.contact.phone.is_truthy() {
        w.open("contact", &[]);
        w.field("name", l.contact.name.as_str());
        w.field("email", email);
        w.field("phone", l.contact.phone.as_str());
        w.close("contact");
    }

    if opts.include_private_fields {
        w.field("serialNumber", l.serial_number.as_deref());
        w.field("acquisitionCost", l.private.acquisition_cost);
        w.field("internalNotes", l.private.internal_notes.as_str());
        w.field("sellerName", l.private.seller_name.as_str());
    }

    w.close("listing");
}

fn write_mhvillage_home(w: &mut XmlWriter, l: &Listing, opts: &ExportOptions) {
    w.open("Home", &[("id", l.id.as_str())]);

    w.field("Status", l.status.as_str());
    w.field("OfferType", l.offer_type.as_str());
    w.field("Year", l.year);
    w.field("Manufacturer", l.make.as_str());
    w.field("Model", l.model.as_str());
    w.field("Width", l.width);
    w.field("Length", l.length);
    w.field("Bedrooms", l.bedrooms);
    w.field("Bathrooms", l.bathrooms);
    w.field("SquareFeet", l.square_feet);

    if l.offer_type.sells() {
        w.field("Price", l.sale_price);
    }
    if l.offer_type.rents() {
        w.field("RentPrice", l.rent_price);
    }
    w.field("LotRent", l.lot_rent);

    w.field("Title", l.title.as_str());
    w.field("Description", l.description.as_str());

    w.field("CommunityName", l.location.community_name.as_str());
    w.field("Address", l.location.address.as_str());
    w.field("City", l.location.city.as_str());
    w.field("State", l.location.state.as_str());
    w.field("Zip", l.location.postal_code.as_str());
    w.field("Latitude", l.location.latitude);
    w.field("Longitude", l.location.longitude);

    if opts.include_photos {
        w.list("Photos", "Photo", l.media.ordered_photos());
    }
    w.list("Features", "Feature", l.enabled_features());

    w.field("ContactName", l.contact.name.as_str());
    w.field("ContactEmail", contact_email(l, opts));
    w.field("ContactPhone", l.contact.phone.as_str());

    if opts.include_private_fields {
        w.field("SerialNumber", l.serial_number.as_deref());
        w.field("AcquisitionCost", l.private.acquisition_cost);
        w.field("InternalNotes", l.private.internal_notes.as_str());
    }

    w.close("Home");
}

use crate::config::Config;
use crate::errors::{ResultResp, ServerError};
use crate::responses::json_response;
use crate::syndication::{find_partner, generate_export_url, SyndicationPartner};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartnerView<'a> {
    #[serde(flatten)]
    partner: &'a SyndicationPartner,
    export_url: String,
}

pub fn list(config: &Config) -> ResultResp {
    let partners: Vec<PartnerView> = config
        .partners
        .iter()
        .map(|partner| PartnerView {
            partner,
            export_url: generate_export_url(&config.public_base_url, partner),
        })
        .collect();
    json_response(&partners)
}

pub fn export_url(config: &Config, id: &str) -> ResultResp {
    let partner = find_partner(&config.partners, id).ok_or(ServerError::NotFound)?;
    json_response(&json!({ "url": generate_export_url(&config.public_base_url, partner) }))
}

// templates/pages/home.rs

use crate::syndication::SyndicationPartner;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub struct PartnerFeedVm<'a> {
    pub partner: &'a SyndicationPartner,
    pub export_url: String,
}

pub fn home_page(partners: &[PartnerFeedVm<'_>], active_listings: usize) -> Markup {
    desktop_layout(
        "Listing Feeds",
        html! {},
        html! {
            h1 { "Syndication feeds" }
            p { (active_listings) " active listings are currently syndicated." }

            @for vm in partners {
                (card(&vm.partner.name, &vm.partner.id, html! {
                    dl {
                        dt { "Format" }
                        dd { (vm.partner.format.as_str()) }
                        dt { "Feed URL" }
                        dd { a href=(vm.export_url) { code { (vm.export_url) } } }
                        @if !vm.partner.listing_types.is_empty() {
                            dt { "Listing types" }
                            dd {
                                @for (i, t) in vm.partner.listing_types.iter().enumerate() {
                                    @if i > 0 { ", " }
                                    (t.as_str())
                                }
                            }
                        }
                    }
                }))
            }
        },
    )
}

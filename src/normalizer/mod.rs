//! Product URL canonicalization.
//!
//! Every URL the collector navigates to is derived from the canonical
//! reviews-listing URL produced here, so a link pasted with tracking
//! parameters or without the `/reviews` segment still lands on the same
//! listing.

use url::Url;

use crate::app::{GleanerError, Result};
use crate::domain::SortOrder;

/// Host suffix of the only site the collector understands.
pub const SITE_HOST: &str = "ozon.ru";

const PRODUCT_MARKER: &str = "ozon.ru/product/";
const REVIEWS_SEGMENT: &str = "/reviews";

/// Query parameter that keeps listings scoped to the viewed product variant.
pub const VARIANT_PARAM: &str = "reviewsVariantMode";
const VARIANT_VALUE: &str = "2";

/// Canonicalize a product URL into its reviews-listing form.
///
/// Pure string transform: query string and fragment are dropped, a missing
/// `/reviews` segment is appended to product URLs, and trailing slashes are
/// removed.
pub fn normalize(raw_url: &str) -> String {
    let mut url = raw_url.trim();

    if let Some(idx) = url.find(['?', '#']) {
        url = url[..idx].trim_end();
    }

    let mut url = url.to_string();

    if url.contains(PRODUCT_MARKER) && !url.contains(REVIEWS_SEGMENT) {
        if url.ends_with('/') {
            url.push_str("reviews/");
        } else {
            url.push_str("/reviews/");
        }
    }

    url.trim_end_matches('/').to_string()
}

/// Build the listing URL for one sort order on top of a normalized base.
pub fn listing_url(base: &str, sort: SortOrder) -> String {
    format!(
        "{}?sort={}&{}={}",
        base,
        sort.query_value(),
        VARIANT_PARAM,
        VARIANT_VALUE
    )
}

/// Append the variant filter unless the URL already carries it.
pub fn ensure_variant_filter(url: &str) -> String {
    if url.contains(VARIANT_PARAM) {
        return url.to_string();
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, VARIANT_PARAM, VARIANT_VALUE)
}

/// Whether `url` parses and points at the collector's site.
pub fn is_site_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(is_site_host))
        .unwrap_or(false)
}

fn is_site_host(host: &str) -> bool {
    host == SITE_HOST || host.ends_with(&format!(".{}", SITE_HOST))
}

/// Validate untrusted input before a browser is launched for it.
///
/// Returns the canonical listing URL.
/// Links pasted without a scheme (`ozon.ru/product/...`) are read as https.
pub fn parse_product_url(raw_url: &str) -> Result<String> {
    let trimmed = raw_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&with_scheme)?;

    let on_site = parsed.host_str().map(is_site_host).unwrap_or(false);
    if !on_site || !parsed.path().starts_with("/product/") {
        return Err(GleanerError::NotAProduct(trimmed.to_string()));
    }

    Ok(normalize(&with_scheme))
}

//! `{"count", "next", "previous", "results"}` envelopes with absolute links.

use axum::http::Uri;
use url::Url;

use foodgram_domain::pagination::{Page, PageRequest, Paged};

/// Link to `page` of the listing at `uri`, keeping every other query
/// parameter. Page 1 drops the `page` parameter.
fn page_link(public_url: &str, uri: &Uri, page: u32) -> Option<String> {
    let mut url = Url::parse(public_url).ok()?.join(uri.path()).ok()?;
    let kept: Vec<(String, String)> = Url::parse(&format!("http://localhost{uri}"))
        .ok()?
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(kept);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Some(url.into())
}

/// Wrap one page of results, mapping each item into its response shape.
pub fn envelope<T, U>(
    public_url: &str,
    uri: &Uri,
    request: PageRequest,
    paged: Paged<T>,
    f: impl FnMut(T) -> U,
) -> Page<U> {
    let request = request.clamped();
    let next = request
        .has_next(paged.count)
        .then(|| page_link(public_url, uri, request.page + 1))
        .flatten();
    let previous = request
        .has_previous()
        .then(|| page_link(public_url, uri, request.page - 1))
        .flatten();
    Page {
        count: paged.count,
        next,
        previous,
        results: paged.items.into_iter().map(f).collect(),
    }
}

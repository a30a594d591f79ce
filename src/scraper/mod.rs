pub(crate) mod circuit;
pub(crate) mod match_detail;
pub(crate) mod matchlist;

use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};

pub(crate) const EVENT_PREFIX: &str = "/event/";
pub(crate) const TEAM_PREFIX: &str = "/team/";
pub(crate) const PLAYER_PREFIX: &str = "/player/";
pub(crate) const MATCH_PREFIX: &str = "/";

/// GET a URL and return the response body as raw markup.
pub(crate) async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| VlrError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(VlrError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| VlrError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Cut the id out of a site link: strip `prefix`, keep everything up to the
/// next `/`.
///
/// `id_from_href("/team/2/sentinels", "/team/")` is `"2"`.
pub(crate) fn id_from_href<'a>(href: &'a str, prefix: &'static str) -> Result<&'a str> {
    let malformed = || VlrError::MalformedLink {
        href: href.to_owned(),
        prefix,
    };
    let rest = href.strip_prefix(prefix).ok_or_else(malformed)?;
    let (id, _) = rest.split_once('/').ok_or_else(malformed)?;
    if id.is_empty() {
        return Err(malformed());
    }
    Ok(id)
}

/// The `href` of an anchor, or a [`VlrError::MalformedLink`] if it has none.
pub(crate) fn href<'a>(anchor: &ElementRef<'a>, prefix: &'static str) -> Result<&'a str> {
    anchor
        .value()
        .attr("href")
        .ok_or_else(|| VlrError::MalformedLink {
            href: String::new(),
            prefix,
        })
}

#[cfg(test)]
mod tests {
    use ::scraper::Html;

    use super::*;

    #[test]
    fn test_id_from_href() {
        assert_eq!(id_from_href("/event/1001/champions-tour", EVENT_PREFIX).unwrap(), "1001");
        assert_eq!(id_from_href("/team/2/sentinels", TEAM_PREFIX).unwrap(), "2");
        assert_eq!(id_from_href("/player/9/tenz", PLAYER_PREFIX).unwrap(), "9");
        assert_eq!(id_from_href("/123456/teamx-vs-teamy", MATCH_PREFIX).unwrap(), "123456");
    }

    #[test]
    fn test_id_from_href_rejects_bad_shapes() {
        for (href, prefix) in [
            ("/players/9/tenz", PLAYER_PREFIX),
            ("/team/2", TEAM_PREFIX),
            ("/event//slug", EVENT_PREFIX),
            ("https://www.vlr.gg/123456/x", MATCH_PREFIX),
        ] {
            match id_from_href(href, prefix) {
                Err(VlrError::MalformedLink { href: h, prefix: p }) => {
                    assert_eq!(h, href);
                    assert_eq!(p, prefix);
                }
                other => panic!("expected MalformedLink for {href}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_select_text_first_non_empty_node() {
        let html = Html::parse_fragment("<div><span>\n\t</span><span> Ascent \n</span></div>");
        let root = html.root_element();
        let selector = Selector::parse("div").unwrap();
        assert_eq!(select_text(&root, &selector), "Ascent");

        let missing = Selector::parse("table").unwrap();
        assert_eq!(select_text(&root, &missing), "");
    }

    #[test]
    fn test_href_missing_attribute() {
        let html = Html::parse_fragment(r#"<a class="match-header-link">TBD</a>"#);
        let selector = Selector::parse("a").unwrap();
        let anchor = html.select(&selector).next().unwrap();
        assert!(matches!(
            href(&anchor, TEAM_PREFIX),
            Err(VlrError::MalformedLink { .. })
        ));
    }
}

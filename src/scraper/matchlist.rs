use ::scraper::{Html, Selector};
use tracing::debug;

use crate::error::Result;
use crate::model::MatchStub;
use crate::scraper::{href, id_from_href, MATCH_PREFIX};

/// Path marker of exhibition matches, which are never official.
const SHOWMATCH_MARKER: &str = "showmatch";

/// Read the official matches of a tournament match list, in page order.
pub(crate) fn parse_matchlist(markup: &str) -> Result<Vec<MatchStub>> {
    let document = Html::parse_document(markup);
    let match_item_selector = Selector::parse("a.match-item")?;
    let completed_selector = Selector::parse(".mod-completed")?;

    let mut stubs = vec![];
    for element in document.select(&match_item_selector) {
        let href = href(&element, MATCH_PREFIX)?;
        if is_showmatch(href) {
            debug!(href, "skipping showmatch");
            continue;
        }
        stubs.push(MatchStub {
            id: id_from_href(href, MATCH_PREFIX)?.to_string(),
            completed: element.select(&completed_selector).next().is_some(),
        });
    }
    debug!(count = stubs.len(), "parsed match list");
    Ok(stubs)
}

fn is_showmatch(href: &str) -> bool {
    href.to_ascii_lowercase().contains(SHOWMATCH_MARKER)
}

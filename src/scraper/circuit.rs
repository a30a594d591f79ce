use ::scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};
use crate::model::TournamentLink;
use crate::scraper::{href, id_from_href, select_text, EVENT_PREFIX};

/// Read the tournaments listed on a circuit page, in page order (newest first).
pub(crate) fn parse_circuit(markup: &str) -> Result<Vec<TournamentLink>> {
    let document = Html::parse_document(markup);
    let event_selector = Selector::parse("a.event-item")?;
    let title_selector = Selector::parse("div.event-item-title")?;

    let mut links = vec![];
    for element in document.select(&event_selector) {
        let id = id_from_href(href(&element, EVENT_PREFIX)?, EVENT_PREFIX)?;
        if element.select(&title_selector).next().is_none() {
            return Err(VlrError::ElementNotFound {
                context: "event title (div.event-item-title)",
            });
        }
        links.push(TournamentLink {
            id: id.to_string(),
            name: select_text(&element, &title_selector),
        });
    }
    debug!(count = links.len(), "parsed circuit page");
    Ok(links)
}

use tracing::debug;
use web_sys::{Document, Window};

use shakes_site_core::{LinkConfig, Result, active_links, current_page};

use crate::dom::{JsResultExt, query_all, set_class};

/// Mark the navigation link for the current page. Returns how many links
/// were marked.
pub fn highlight(window: &Window, document: &Document, config: &LinkConfig) -> Result<usize> {
    let path = window
        .location()
        .pathname()
        .js_context("reading location path")?;
    let page = current_page(&path, &config.home_page);

    let links = query_all(document, &config.link_selector)?;
    let hrefs: Vec<Option<String>> = links.iter().map(|l| l.get_attribute("href")).collect();
    let active = active_links(hrefs.iter().map(|h| h.as_deref()), page);

    for &index in &active {
        set_class(&links[index], &config.active_class, true);
    }
    debug!(page, marked = active.len(), "highlighted navigation");
    Ok(active.len())
}

//! Highlighting the navigation link for the page being viewed.

/// The file name of the current page: the last path segment, or `home` when
/// the path ends in a slash or is empty.
pub fn current_page<'a>(path: &'a str, home: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => home,
    }
}

/// Indices of the links whose `href` names `page`.
pub fn active_links<'a, I>(hrefs: I, page: &str) -> Vec<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    hrefs
        .into_iter()
        .enumerate()
        .filter(|(_, href)| *href == Some(page))
        .map(|(index, _)| index)
        .collect()
}

use reqwest::Url;

use crate::models::RelationLink;

const PRIMARY_MARKER: &str = "wikipedia";
const LINKED_DATA_MARKER: &str = "wikidata";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    WikipediaTitle(String),
    WikidataEntity(String),
}

/// First Wikipedia relation, else first Wikidata relation, else nothing.
pub fn select_biography_link(relations: &[RelationLink]) -> Option<&RelationLink> {
    find_by_marker(relations, PRIMARY_MARKER).or_else(|| find_by_marker(relations, LINKED_DATA_MARKER))
}

pub fn biography_target(relations: &[RelationLink]) -> Option<LinkTarget> {
    select_biography_link(relations).and_then(|link| link_target(&link.url))
}

pub fn link_target(url: &str) -> Option<LinkTarget> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let segments: Vec<&str> = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();
    // Titles may contain '/', so everything after `wiki/` belongs to the title.
    let start = segments
        .iter()
        .position(|segment| *segment == "wiki")
        .map_or(segments.len().saturating_sub(1), |idx| idx + 1);
    let title = segments.get(start..)?.join("/");
    let decoded = urlencoding::decode(&title).ok()?.trim().to_string();
    if decoded.is_empty() {
        return None;
    }

    if host.contains("wikipedia.org") {
        Some(LinkTarget::WikipediaTitle(decoded))
    } else if host.contains("wikidata.org") && decoded.starts_with('Q') {
        Some(LinkTarget::WikidataEntity(decoded))
    } else {
        None
    }
}

fn find_by_marker<'a>(relations: &'a [RelationLink], marker: &str) -> Option<&'a RelationLink> {
    relations
        .iter()
        .find(|link| link.kind.to_lowercase().contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(kind: &str, url: &str) -> RelationLink {
        RelationLink {
            kind: kind.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn wikipedia_beats_wikidata_regardless_of_position() {
        let relations = [
            link("wikidata", "https://www.wikidata.org/wiki/Q15920"),
            link("Wikipedia", "https://en.wikipedia.org/wiki/Metallica"),
        ];
        assert_eq!(
            select_biography_link(&relations).map(|link| link.kind.as_str()),
            Some("Wikipedia")
        );
    }

    #[test]
    fn first_of_equal_preference_wins() {
        let relations = [
            link("wikipedia", "https://en.wikipedia.org/wiki/First"),
            link("wikipedia", "https://en.wikipedia.org/wiki/Second"),
        ];
        assert_eq!(
            biography_target(&relations),
            Some(LinkTarget::WikipediaTitle("First".to_string()))
        );
    }

    #[test]
    fn unrelated_links_are_ignored() {
        let relations = [
            link("official homepage", "https://www.metallica.com"),
            link("discogs", "https://www.discogs.com/artist/18839"),
        ];
        assert_eq!(select_biography_link(&relations), None);
        assert_eq!(biography_target(&relations), None);
    }

    #[test]
    fn wikipedia_titles_are_percent_decoded() {
        assert_eq!(
            link_target("https://en.wikipedia.org/wiki/Mot%C3%B6rhead"),
            Some(LinkTarget::WikipediaTitle("Motörhead".to_string()))
        );
    }

    #[test]
    fn titles_keep_their_slashes() {
        assert_eq!(
            link_target("https://en.wikipedia.org/wiki/AC/DC"),
            Some(LinkTarget::WikipediaTitle("AC/DC".to_string()))
        );
        assert_eq!(
            link_target("https://en.wikipedia.org/wiki/AC%2FDC"),
            Some(LinkTarget::WikipediaTitle("AC/DC".to_string()))
        );
    }

    #[test]
    fn wikidata_links_yield_entity_ids() {
        assert_eq!(
            link_target("https://www.wikidata.org/wiki/Q15920"),
            Some(LinkTarget::WikidataEntity("Q15920".to_string()))
        );
    }

    #[test]
    fn malformed_urls_yield_nothing() {
        assert_eq!(link_target("not a url"), None);
        assert_eq!(link_target("https://en.wikipedia.org/"), None);
        assert_eq!(link_target("https://example.com/wiki/Metallica"), None);
    }
}

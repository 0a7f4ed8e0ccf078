use crate::models::{BandRecord, BandStatus};

const DESCRIPTION_LIMIT: usize = 300;
const MAX_GENRE_TAGS: usize = 3;

pub fn placeholder_image(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=111111&color=ff4444&size=512",
        urlencoding::encode(name)
    )
}

pub fn display_image(band: &BandRecord) -> String {
    band.image
        .clone()
        .unwrap_or_else(|| placeholder_image(&band.name))
}

/// Biography text when enrichment found one, otherwise a sentence built from the status.
pub fn display_description(band: &BandRecord) -> String {
    match band.description.as_deref().filter(|text| !text.trim().is_empty()) {
        Some(text) => truncate(text, DESCRIPTION_LIMIT),
        None => templated_description(band),
    }
}

pub fn templated_description(band: &BandRecord) -> String {
    let name = &band.name;
    let genre = band.genre.to_lowercase();
    let country = &band.country;

    match band.status {
        BandStatus::Active => format!(
            "{name} is an active {genre} band from {country}. They continue to create and perform music, contributing to the metal scene with their unique sound and style."
        ),
        BandStatus::SplitUp => format!(
            "{name} was a {genre} band from {country} that has since disbanded. Despite their split, their music continues to influence the metal community."
        ),
        BandStatus::OnHold => format!(
            "{name} is a {genre} band from {country} that is currently on hiatus. Fans eagerly await their potential return to the metal scene."
        ),
        BandStatus::ChangedName => format!(
            "{name} was a {genre} band from {country} that has since changed their name and continues under a different moniker."
        ),
        BandStatus::Unknown => format!(
            "{name} is a {genre} band from {country}. Information about their current activity status is currently unavailable."
        ),
    }
}

pub fn genre_tags(band: &BandRecord) -> Vec<String> {
    band.genre
        .split([',', '/'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(MAX_GENRE_TAGS)
        .map(str::to_string)
        .collect()
}

pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 band".to_string()
    } else {
        format!("{count} bands")
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push('…');
    cut
}

use crate::models::{BandRecord, FilterSelection};

/// Keeps the bands whose genre, country and status contain every non-blank filter,
/// ignoring case. Order is preserved.
pub fn filter_bands(bands: &[BandRecord], filters: &FilterSelection) -> Vec<BandRecord> {
    let genre = needle(filters.genre());
    let country = needle(filters.country());
    let status = needle(filters.status());

    bands
        .iter()
        .filter(|band| {
            matches(&band.genre, genre.as_deref())
                && matches(&band.country, country.as_deref())
                && matches(band.status.label(), status.as_deref())
        })
        .cloned()
        .collect()
}

fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn matches(field: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => field.to_lowercase().contains(needle),
        None => true,
    }
}

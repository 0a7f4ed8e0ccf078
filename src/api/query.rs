/// Country names offered by the filter bar and their ISO 3166-1 codes.
pub const COUNTRY_CODES: [(&str, &str); 12] = [
    ("United States", "US"),
    ("United Kingdom", "GB"),
    ("Germany", "DE"),
    ("Sweden", "SE"),
    ("Norway", "NO"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Italy", "IT"),
    ("Poland", "PL"),
    ("Canada", "CA"),
    ("Brazil", "BR"),
    ("Japan", "JP"),
];

const DEFAULT_GENRE_CLAUSE: &str = r#"tag:"metal" OR tag:"heavy metal""#;

pub fn country_code(country: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
}

/// Builds the MusicBrainz artist search query for the popular view.
pub fn build_filter_query(genre: Option<&str>, country: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);

    match genre.filter(|value| !value.is_empty()) {
        Some(genre) => parts.push(format!(r#"tag:"{genre}""#)),
        None => parts.push(DEFAULT_GENRE_CLAUSE.to_string()),
    }

    if let Some(country) = country.filter(|value| !value.is_empty()) {
        match country_code(country) {
            Some(code) => parts.push(format!("country:{code}")),
            None => parts.push(format!(r#"area:"{country}""#)),
        }
    }

    parts.join(" AND ")
}

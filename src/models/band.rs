use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandStatus {
    Active,
    SplitUp,
    OnHold,
    ChangedName,
    #[default]
    Unknown,
}

impl BandStatus {
    pub const ALL: [BandStatus; 5] = [
        BandStatus::Active,
        BandStatus::SplitUp,
        BandStatus::OnHold,
        BandStatus::ChangedName,
        BandStatus::Unknown,
    ];

    /// MusicBrainz only tells us whether the life-span has ended.
    pub fn from_ended(ended: bool) -> Self {
        if ended { Self::SplitUp } else { Self::Active }
    }

    pub fn label(self) -> &'static str {
        match self {
            BandStatus::Active => "Active",
            BandStatus::SplitUp => "Split-up",
            BandStatus::OnHold => "On hold",
            BandStatus::ChangedName => "Changed name",
            BandStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationLink {
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandRecord {
    pub id: String,
    pub name: String,
    pub profile_link: String,
    pub country: String,
    pub genre: String,
    pub status: BandStatus,
    pub image: Option<String>,
    pub description: Option<String>,
    pub relations: Vec<RelationLink>,
}

impl Default for BandRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            profile_link: String::new(),
            country: "Unknown".to_string(),
            genre: "Unknown".to_string(),
            status: BandStatus::Unknown,
            image: None,
            description: None,
            relations: Vec::new(),
        }
    }
}

impl BandRecord {
    pub fn is_enriched(&self) -> bool {
        self.image.is_some() || self.description.is_some()
    }

    pub fn summary_line(&self) -> String {
        format!("{} • {} • {}", self.country, self.genre, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_life_span() {
        assert_eq!(BandStatus::from_ended(true), BandStatus::SplitUp);
        assert_eq!(BandStatus::from_ended(false), BandStatus::Active);
    }

    #[test]
    fn status_labels_match_display_text() {
        let labels: Vec<String> = BandStatus::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            ["Active", "Split-up", "On hold", "Changed name", "Unknown"]
        );
    }

    #[test]
    fn default_record_is_unenriched_with_unknown_fields() {
        let record = BandRecord::default();
        assert_eq!(record.country, "Unknown");
        assert_eq!(record.genre, "Unknown");
        assert!(!record.is_enriched());
        assert_eq!(record.status, BandStatus::Unknown);
    }
}

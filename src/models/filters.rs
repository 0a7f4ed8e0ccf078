/// Genre, country and status selections from the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub genre: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
}

impl FilterSelection {
    pub fn new(genre: Option<&str>, country: Option<&str>, status: Option<&str>) -> Self {
        Self {
            genre: non_blank(genre),
            country: non_blank(country),
            status: non_blank(status),
        }
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// What still has to be matched locally on results fetched with `queried`.
    /// Genre and country already in the query are not re-applied; status always is.
    pub fn beyond(&self, queried: &FilterSelection) -> Self {
        Self {
            genre: self.genre.clone().filter(|_| self.genre != queried.genre),
            country: self.country.clone().filter(|_| self.country != queried.country),
            status: self.status.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

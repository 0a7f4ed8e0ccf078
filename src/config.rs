use std::time::Duration;

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use log::LevelFilter;
use uuid::Uuid;

const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2";
const DEFAULT_PROFILE_URL: &str = "https://musicbrainz.org/artist";
const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1";
const DEFAULT_WIKIDATA_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";
const DEFAULT_CONTACT: &str = "metla@example.com";

/// Endpoints, identification and timeouts shared by every client.
#[derive(Clone, Debug)]
pub struct AppConfig {
    musicbrainz_url: String,
    profile_url: String,
    wikipedia_url: String,
    wikidata_url: String,
    user_agent: String,
    client_id: String,
    http_timeout: Duration,
    batch_timeout: Duration,
    record_timeout: Option<Duration>,
    log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client_id = format!("metla-client-{}", Uuid::new_v4());

        Self {
            musicbrainz_url: DEFAULT_MUSICBRAINZ_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
            wikidata_url: DEFAULT_WIKIDATA_URL.to_string(),
            user_agent: user_agent_for(DEFAULT_CONTACT),
            client_id,
            http_timeout: Duration::from_secs(30),
            batch_timeout: Duration::from_secs(20),
            record_timeout: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Layers `Metla.toml` (optional) and `METLA_*` environment variables over the defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("musicbrainz_url", DEFAULT_MUSICBRAINZ_URL)?
            .set_default("profile_url", DEFAULT_PROFILE_URL)?
            .set_default("wikipedia_url", DEFAULT_WIKIPEDIA_URL)?
            .set_default("wikidata_url", DEFAULT_WIKIDATA_URL)?
            .set_default("contact", DEFAULT_CONTACT)?
            .set_default("http_timeout_secs", 30_i64)?
            .set_default("batch_timeout_secs", 20_i64)?
            .set_default("record_timeout_secs", 0_i64)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("Metla").required(false))
            .add_source(Environment::with_prefix("METLA"))
            .build()
            .context("failed to assemble configuration sources")?;

        let log_level = settings
            .get_string("log_level")?
            .parse::<LevelFilter>()
            .context("log_level must be one of off, error, warn, info, debug, trace")?;

        let record_timeout = match seconds(&settings, "record_timeout_secs")? {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            musicbrainz_url: trim_base(settings.get_string("musicbrainz_url")?),
            profile_url: trim_base(settings.get_string("profile_url")?),
            wikipedia_url: trim_base(settings.get_string("wikipedia_url")?),
            wikidata_url: trim_base(settings.get_string("wikidata_url")?),
            user_agent: user_agent_for(&settings.get_string("contact")?),
            client_id: defaults.client_id,
            http_timeout: Duration::from_secs(seconds(&settings, "http_timeout_secs")?),
            batch_timeout: Duration::from_secs(seconds(&settings, "batch_timeout_secs")?),
            record_timeout,
            log_level,
        })
    }

    pub fn musicbrainz_url(&self) -> &str {
        &self.musicbrainz_url
    }

    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    pub fn wikipedia_url(&self) -> &str {
        &self.wikipedia_url
    }

    pub fn wikidata_url(&self) -> &str {
        &self.wikidata_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }

    pub fn record_timeout(&self) -> Option<Duration> {
        self.record_timeout
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

fn user_agent_for(contact: &str) -> String {
    format!("metla/{} ( {contact} )", env!("CARGO_PKG_VERSION"))
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn seconds(settings: &Config, key: &str) -> Result<u64> {
    let value = settings.get_int(key)?;
    u64::try_from(value).with_context(|| format!("{key} must not be negative, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = AppConfig::default();
        assert_eq!(config.musicbrainz_url(), "https://musicbrainz.org/ws/2");
        assert_eq!(config.wikipedia_url(), "https://en.wikipedia.org/api/rest_v1");
        assert!(config.user_agent().starts_with("metla/"));
        assert!(config.client_id().starts_with("metla-client-"));
        assert_eq!(config.record_timeout(), None);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(
            trim_base("http://localhost:8080/ws/2/".to_string()),
            "http://localhost:8080/ws/2"
        );
    }
}

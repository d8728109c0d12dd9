use crate::error::ConfigError;
use std::collections::HashSet;
use std::fmt;
use url::Url;

const LANGUAGE_KEY: &str = "l";
const LANGUAGE_VALUE: &str = "english";

/// The watched profile, normalized into the URL that is actually fetched.
///
/// The page wording the classifier matches on is English, so the language
/// parameter is always forced. Repeated query keys keep their first value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidTarget {
            url: raw.to_string(),
            reason,
        };

        let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        let mut seen = HashSet::new();
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != LANGUAGE_KEY && seen.insert(key.to_string()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        pairs.push((LANGUAGE_KEY.into(), LANGUAGE_VALUE.into()));

        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

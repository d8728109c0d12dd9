use crate::error::ShieldError;
use scraper::Html;

/// Wording the profile page uses for the age of the most recent ban.
pub const BAN_AGE_PHRASE: &str = "day(s) since last ban";

/// What a single page says about the watched profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A ban issued today: "0 day(s) since last ban".
    Fresh(String),
    /// A ban with a non-zero age. Already known, never actionable.
    Stale(String),
    Clean,
}

/// Turns page markup into a [`Verdict`].
///
/// Kept behind a trait so the matching strategy can change without touching
/// the poll loop.
pub trait BanClassifier: Send + Sync {
    fn classify(&self, markup: &str) -> Result<Verdict, ShieldError>;
}

/// Scans text nodes in document order for [`BAN_AGE_PHRASE`] and reads the
/// day count in front of it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPatternClassifier;

impl BanClassifier for TextPatternClassifier {
    fn classify(&self, markup: &str) -> Result<Verdict, ShieldError> {
        let document = Html::parse_document(markup);
        let Some((raw, lowered)) = document
            .root_element()
            .text()
            .map(|node| (node, node.to_lowercase()))
            .find(|(_, lowered)| lowered.contains(BAN_AGE_PHRASE))
        else {
            return Ok(Verdict::Clean);
        };

        let text = normalize_whitespace(raw);
        match ban_age_days(&lowered) {
            Some(0) => Ok(Verdict::Fresh(text)),
            Some(_) => Ok(Verdict::Stale(text)),
            None => Err(ShieldError::Parse(format!("unreadable ban age in '{text}'"))),
        }
    }
}

/// Day count written directly before the phrase. Thousands separators are
/// tolerated.
fn ban_age_days(lowered: &str) -> Option<u64> {
    let idx = lowered.find(BAN_AGE_PHRASE)?;
    let head = lowered[..idx].trim_end();
    let token_start = head
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == ','))
        .map_or(0, |(pos, c)| pos + c.len_utf8());
    let digits: String = head[token_start..].chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

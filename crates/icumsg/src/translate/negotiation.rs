//! `Accept-Language` content negotiation.

use serde::Serialize;

use crate::interpreter::base_language;

/// One `tag;q=quality` entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f64,
}

impl LanguageRange {
    pub fn new(tag: impl Into<String>, quality: f64) -> Self {
        Self {
            tag: tag.into(),
            quality,
        }
    }

    /// Returns true for the `*` range.
    pub fn is_wildcard(&self) -> bool {
        self.tag == "*"
    }
}

/// Parse an `Accept-Language` header into ranges, highest quality first.
///
/// Quality defaults to 1.0. Entries with an empty tag, or a quality that is
/// not a number in `[0, 1]`, are dropped. Parameters without a value are
/// ignored. Ranges of equal quality keep their
/// header order.
///
/// ```
/// use icumsg::translate::parse_accept_language;
///
/// let ranges = parse_accept_language("de;q=0.8, en-US, fr;q=0.8, es;q=oops");
/// let tags: Vec<&str> = ranges.iter().map(|r| r.tag.as_str()).collect();
/// assert_eq!(tags, ["en-US", "de", "fr"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header.split(',').filter_map(parse_range).collect();
    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

fn parse_range(entry: &str) -> Option<LanguageRange> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() {
        return None;
    }
    let mut quality = 1.0;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            quality = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|q| q.is_finite() && (0.0..=1.0).contains(q))?;
        }
    }
    Some(LanguageRange::new(tag, quality))
}

/// The highest-quality tag of a header, if any.
pub fn preferred_language(header: &str) -> Option<String> {
    parse_accept_language(header)
        .into_iter()
        .next()
        .map(|range| range.tag)
}

/// Pick the first available language acceptable to the header.
///
/// Each range is tried as written and then by its base subtag, comparing
/// case-insensitively. Ranges with quality 0 and the wildcard are skipped.
///
/// ```
/// use icumsg::translate::negotiate;
///
/// let available = ["en", "de", "pt-BR"];
/// assert_eq!(negotiate("fr, de-AT;q=0.9", &available), Some("de".to_string()));
/// assert_eq!(negotiate("pt-br", &available), Some("pt-BR".to_string()));
/// assert_eq!(negotiate("fr", &available), None);
/// ```
pub fn negotiate<S: AsRef<str>>(header: &str, available: &[S]) -> Option<String> {
    let find = |tag: &str| {
        available
            .iter()
            .map(AsRef::as_ref)
            .find(|candidate| candidate.eq_ignore_ascii_case(tag))
            .map(str::to_string)
    };
    parse_accept_language(header)
        .iter()
        .filter(|range| range.quality > 0.0 && !range.is_wildcard())
        .find_map(|range| find(&range.tag).or_else(|| find(&base_language(&range.tag))))
}

/// Candidate resource tags for a range: the tag itself, then its base
/// subtag when different.
pub(crate) fn candidate_tags(range: &LanguageRange) -> Vec<String> {
    let base = base_language(&range.tag);
    if base.eq_ignore_ascii_case(&range.tag) {
        vec![range.tag.clone()]
    } else {
        vec![range.tag.clone(), base]
    }
}

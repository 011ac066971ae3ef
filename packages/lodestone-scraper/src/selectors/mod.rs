//! Declarative field selectors.
//!
//! A [`SelectorInfo`] turns an HTML node into an ordered list of strings.
//! Index 0 is the primary value; later indices carry positional secondary
//! values (a server field yields `[world, data_center]`).
//!
//! Two extraction modes exist:
//! - [`SelectorInfo::parse`] reads the node it is given (the node was found
//!   by matching the selector at document level, or it is an entry root whose
//!   own text carries the value);
//! - [`SelectorInfo::parse_through_children`] queries the node's descendants.
//!
//! Selectors are loaded once from the JSON assets compiled into the crate and
//! shared read-only across every page of a crawl.

pub mod profile;
pub mod search;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

pub use profile::{AchievementSelectors, ProfileSelectors};
pub use search::{
    CharacterSearchSelectors, CrestLayerSelectors, CwlsSearchSelectors,
    FreeCompanySearchSelectors, LinkshellSearchSelectors, PvpTeamSearchSelectors,
    SearchSelectors,
};

/// A compiled selector plus the rule for turning matched nodes into values.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSelectorInfo")]
pub struct SelectorInfo {
    source: String,
    selector: Selector,
    attribute: Option<String>,
    regex: Option<Regex>,
    multiple: bool,
}

/// On-disk shape of a selector entry.
#[derive(Debug, Deserialize)]
struct RawSelectorInfo {
    selector: String,
    #[serde(default)]
    attribute: Option<String>,
    #[serde(default)]
    regex: Option<String>,
    #[serde(default)]
    multiple: bool,
}

impl TryFrom<RawSelectorInfo> for SelectorInfo {
    type Error = ConfigError;

    fn try_from(raw: RawSelectorInfo) -> ConfigResult<Self> {
        let mut info = SelectorInfo::new(&raw.selector)?;
        info.attribute = raw.attribute.filter(|a| !a.is_empty());
        if let Some(pattern) = raw.regex.filter(|r| !r.is_empty()) {
            info = info.with_regex(&pattern)?;
        }
        info.multiple = raw.multiple;
        Ok(info)
    }
}

impl SelectorInfo {
    /// Compile a CSS selector that reads node text.
    pub fn new(selector: &str) -> ConfigResult<Self> {
        let compiled = Selector::parse(selector).map_err(|e| ConfigError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: selector.to_string(),
            selector: compiled,
            attribute: None,
            regex: None,
            multiple: false,
        })
    }

    /// Read an attribute instead of the node text.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Post-process values with a regex; its capture groups become the values.
    pub fn with_regex(mut self, pattern: &str) -> ConfigResult<Self> {
        self.regex = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Read every matching descendant instead of only the first.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// The compiled CSS selector.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The selector as written in the asset.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// All nodes in the document matching this selector, in document order.
    pub fn select<'a, 'b>(&'b self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'b
    where
        'a: 'b,
    {
        document.select(&self.selector)
    }

    /// Direct mode: read the given node itself.
    pub fn parse(&self, node: ElementRef<'_>) -> Vec<String> {
        self.read(node).map(|v| self.apply_regex(v)).unwrap_or_default()
    }

    /// Through-children mode: query the node's descendants.
    pub fn parse_through_children(&self, node: ElementRef<'_>) -> Vec<String> {
        let mut matches = node.select(&self.selector);
        if self.multiple {
            return matches.flat_map(|el| self.parse(el)).collect();
        }
        matches.next().map(|el| self.parse(el)).unwrap_or_default()
    }

    /// Direct mode applied to the first document-level match.
    pub fn parse_document(&self, document: &Html) -> Vec<String> {
        self.select(document)
            .next()
            .map(|el| self.parse(el))
            .unwrap_or_default()
    }

    fn read(&self, node: ElementRef<'_>) -> Option<String> {
        match &self.attribute {
            Some(attr) => node.value().attr(attr).map(|v| v.trim().to_string()),
            None => Some(collapse_whitespace(node.text())),
        }
    }

    fn apply_regex(&self, value: String) -> Vec<String> {
        let Some(regex) = &self.regex else {
            return vec![value];
        };

        match regex.captures(&value) {
            Some(caps) => caps
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
            None => Vec::new(),
        }
    }
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in parts.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Defensive accessors over extracted values.
///
/// Missing indices and unparseable strings yield the zero value; nothing here
/// fails, so a bad field never costs the record it belongs to.
pub trait FieldValues {
    /// The value at `index`, or an empty string.
    fn text(&self, index: usize) -> String;

    /// The value at `index` as a `u32`, or 0.
    fn number(&self, index: usize) -> u32;

    /// The value at `index` as unix seconds, or `None`.
    fn timestamp(&self, index: usize) -> Option<DateTime<Utc>>;
}

impl FieldValues for [String] {
    fn text(&self, index: usize) -> String {
        self.get(index).cloned().unwrap_or_default()
    }

    fn number(&self, index: usize) -> u32 {
        self.get(index).and_then(|v| parse_u32(v)).unwrap_or(0)
    }

    fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        self.get(index).and_then(|v| parse_unix_timestamp(v))
    }
}

/// Parse a count as rendered by the listing (`"1,234"`, `" 42 "`).
///
/// A `.` is only read as a thousands separator (`"1.234"` on the German
/// site) when every group after it has three digits, so `"12.5"` is
/// rejected instead of read as 125.
pub fn parse_u32(raw: &str) -> Option<u32> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | ' '))
        .collect();
    let mut groups = cleaned.split('.');
    let head = groups.next().unwrap_or_default();
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || head.is_empty() {
            tracing::trace!(raw = %raw, "Decimal point in number field");
            return None;
        }
        digits.push_str(group);
    }
    match digits.parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::trace!(raw = %raw, error = %e, "Unparseable number field");
            None
        }
    }
}

/// Parse unix seconds into a UTC timestamp.
pub fn parse_unix_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let seconds = match raw.trim().parse::<i64>() {
        Ok(s) => s,
        Err(e) => {
            tracing::trace!(raw = %raw, error = %e, "Unparseable timestamp field");
            return None;
        }
    };
    DateTime::from_timestamp(seconds, 0)
}

/// Deserialize one packed selector asset.
pub(crate) fn load_asset<T: DeserializeOwned>(asset: &'static str, json: &str) -> ConfigResult<T> {
    serde_json::from_str(json).map_err(|source| ConfigError::Json { asset, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"
        <div class="entry">
            <a class="entry__link" href="/lodestone/character/12345/">
                <p class="entry__name">  Alpha   Beta </p>
                <p class="entry__world">Gilgamesh [Aether]</p>
                <img class="icon" src="a.png"><img class="icon" src="b.png">
            </a>
            <script>ldst_strftime(1596045323, 'YMD');</script>
        </div>
    "#;

    fn entry(document: &Html) -> ElementRef<'_> {
        let root = SelectorInfo::new(".entry").unwrap();
        let element = root.select(document).next().unwrap();
        element
    }

    #[test]
    fn test_through_children_reads_text() {
        let document = Html::parse_fragment(ENTRY);
        let name = SelectorInfo::new(".entry__name").unwrap();
        assert_eq!(name.parse_through_children(entry(&document)), vec!["Alpha Beta"]);
    }

    #[test]
    fn test_through_children_reads_attribute_with_regex() {
        let document = Html::parse_fragment(ENTRY);
        let id = SelectorInfo::new(".entry__link")
            .unwrap()
            .with_attribute("href")
            .with_regex(r"/lodestone/character/(?P<ID>\d+)/")
            .unwrap();
        assert_eq!(id.parse_through_children(entry(&document)), vec!["12345"]);
    }

    #[test]
    fn test_regex_groups_are_positional() {
        let document = Html::parse_fragment(ENTRY);
        let server = SelectorInfo::new(".entry__world")
            .unwrap()
            .with_regex(r"(?P<World>\w+)\s+\[(?P<DC>\w+)\]")
            .unwrap();
        let values = server.parse_through_children(entry(&document));
        assert_eq!(values.text(0), "Gilgamesh");
        assert_eq!(values.text(1), "Aether");
    }

    #[test]
    fn test_direct_mode_reads_the_node_itself() {
        let document = Html::parse_fragment(ENTRY);
        let formed = SelectorInfo::new(".entry")
            .unwrap()
            .with_regex(r"ldst_strftime\((?P<Timestamp>\d+),")
            .unwrap();
        let values = formed.parse(entry(&document));
        assert_eq!(values.timestamp(0).unwrap().timestamp(), 1596045323);
    }

    #[test]
    fn test_multiple_collects_every_match() {
        let document = Html::parse_fragment(ENTRY);
        let icons = SelectorInfo::new(".icon").unwrap().with_attribute("src").multiple();
        assert_eq!(icons.parse_through_children(entry(&document)), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_missing_values_are_empty_not_errors() {
        let document = Html::parse_fragment(ENTRY);
        let absent = SelectorInfo::new(".does-not-exist").unwrap();
        let values = absent.parse_through_children(entry(&document));
        assert!(values.is_empty());
        assert_eq!(values.text(0), "");
        assert_eq!(values.number(0), 0);
        assert!(values.timestamp(0).is_none());

        let no_attr = SelectorInfo::new(".entry__name").unwrap().with_attribute("href");
        assert!(no_attr.parse_through_children(entry(&document)).is_empty());

        let no_match = SelectorInfo::new(".entry__name").unwrap().with_regex(r"(\d+)").unwrap();
        assert!(no_match.parse_through_children(entry(&document)).is_empty());
    }

    #[test]
    fn test_parse_u32_tolerates_separators() {
        assert_eq!(parse_u32("1,234"), Some(1234));
        assert_eq!(parse_u32(" 42 "), Some(42));
        assert_eq!(parse_u32("n/a"), None);
        assert_eq!(parse_u32(""), None);
    }

    #[test]
    fn test_parse_u32_dot_only_groups_thousands() {
        assert_eq!(parse_u32("1.234"), Some(1234));
        assert_eq!(parse_u32("12.345.678"), Some(12_345_678));
        assert_eq!(parse_u32("12.5"), None);
        assert_eq!(parse_u32("1.2345"), None);
        assert_eq!(parse_u32(".123"), None);
    }

    #[test]
    fn test_parse_unix_timestamp() {
        assert_eq!(parse_unix_timestamp("0").unwrap().timestamp(), 0);
        assert!(parse_unix_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_deserialize_raw_selector() {
        let info: SelectorInfo = serde_json::from_str(
            r#"{"selector": ".entry__link", "attribute": "href", "regex": "(\\d+)"}"#,
        )
        .unwrap();
        assert_eq!(info.as_str(), ".entry__link");
        assert_eq!(info.attribute.as_deref(), Some("href"));
        assert!(info.regex.is_some());
    }

    #[test]
    fn test_bad_selector_is_a_config_error() {
        let err = serde_json::from_str::<SelectorInfo>(r#"{"selector": "!!"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid CSS selector"));

        let err = serde_json::from_str::<SelectorInfo>(r#"{"selector": "p", "regex": "("}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid regex"));
    }
}

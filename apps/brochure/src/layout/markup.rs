//! Markup handling for HTML-bearing package fields.
//!
//! Markup is never rendered; only its text survives. A free-text field is
//! classified once, list markers first: any `<ul`, `<ol` or `<li` makes it a
//! list, otherwise it is split into paragraphs on blank lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref RE_LIST_MARKER: Regex = Regex::new(r"(?i)<(ul|ol|li)\b").unwrap();
    static ref RE_LIST_ITEM: Regex = Regex::new(r"(?is)<li\b[^>]*>(.*?)</li\s*>").unwrap();
    static ref RE_BLANK_LINES: Regex = Regex::new(r"\r?\n\s*\r?\n").unwrap();
    static ref RE_NUMERIC_ENTITY: Regex = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap();
}

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&rsquo;", "\u{2019}"),
    ("&lsquo;", "\u{2018}"),
    ("&ndash;", "\u{2013}"),
    ("&mdash;", "\u{2014}"),
    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    ("&amp;", "&"),
];

/// How a free-text field is to be laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum FreeText {
    List(Vec<String>),
    Paragraphs(Vec<String>),
}

impl FreeText {
    pub fn is_empty(&self) -> bool {
        match self {
            FreeText::List(items) => items.is_empty(),
            FreeText::Paragraphs(paragraphs) => paragraphs.is_empty(),
        }
    }
}

/// Removes every tag and decodes the common entities.
pub fn strip_tags(raw: &str) -> String {
    decode_entities(&RE_TAG.replace_all(raw, ""))
}

/// Classifies and splits a free-text field.
pub fn classify(raw: &str) -> FreeText {
    if RE_LIST_MARKER.is_match(raw) {
        let items = RE_LIST_ITEM
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| strip_tags(m.as_str()).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return FreeText::List(items);
    }

    let text = strip_tags(raw);
    let paragraphs = RE_BLANK_LINES
        .split(&text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    FreeText::Paragraphs(paragraphs)
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let numeric = RE_NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = match body.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => body.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    NAMED_ENTITIES
        .iter()
        .fold(numeric.into_owned(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

/*!
 * Caption document model.
 *
 * A `CaptionSet` buckets timed captions by language tag and carries the
 * style-class registry shared by all of them. Readers build it, writers only
 * ever borrow it.
 */

pub mod layout;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::webvtt::timestamp;

pub use layout::{HorizontalAlignment, Layout, Padding, Point, Size, Stretch, Unit};

/// Style attributes keyed by name (`italics`, `bold`, `class`, `classes`, ...)
pub type StyleMap = BTreeMap<String, StyleValue>;

/// A single style attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Flag(bool),
    Classes(Vec<String>),
    Text(String),
}

impl StyleValue {
    /// Whether the attribute counts as switched on
    pub fn is_truthy(&self) -> bool {
        match self {
            StyleValue::Flag(flag) => *flag,
            StyleValue::Classes(classes) => !classes.is_empty(),
            StyleValue::Text(text) => !text.is_empty(),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(flag: bool) -> Self {
        StyleValue::Flag(flag)
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        StyleValue::Text(text.to_string())
    }
}

/// Atomic content item within a caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptionNode {
    /// Plain text run, optionally positioned on its own
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layout: Option<Layout>,
    },
    /// Explicit line break
    Break,
    /// Style toggle; `opening` marks the start of the styled run
    Style { attributes: StyleMap, opening: bool },
    /// In-stream comment (WebVTT NOTE block)
    Comment { text: String },
}

impl CaptionNode {
    pub fn text(content: impl Into<String>) -> Self {
        CaptionNode::Text {
            content: content.into(),
            layout: None,
        }
    }

    pub fn positioned_text(content: impl Into<String>, layout: Layout) -> Self {
        CaptionNode::Text {
            content: content.into(),
            layout: Some(layout),
        }
    }

    pub fn line_break() -> Self {
        CaptionNode::Break
    }

    pub fn style(attributes: StyleMap, opening: bool) -> Self {
        CaptionNode::Style { attributes, opening }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        CaptionNode::Comment { text: text.into() }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CaptionNode::Text { .. })
    }
}

/// One timed unit of caption content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Start time in microseconds
    pub start: u64,

    /// End time in microseconds
    pub end: u64,

    /// Ordered content nodes
    pub nodes: Vec<CaptionNode>,

    /// Caption-wide style
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,

    /// Caption-wide positioning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl Caption {
    pub fn new(start: u64, end: u64, nodes: Vec<CaptionNode>) -> Self {
        Self {
            start,
            end,
            nodes,
            style: StyleMap::new(),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: Option<Layout>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Plain text of the caption with breaks rendered as newlines
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.nodes {
            match node {
                CaptionNode::Text { content, .. } => text.push_str(content),
                CaptionNode::Break => text.push('\n'),
                CaptionNode::Style { .. } | CaptionNode::Comment { .. } => {}
            }
        }
        text
    }

    /// Concatenated text of all comment nodes, if there are any
    pub fn comment(&self) -> Option<String> {
        let comments: Vec<&str> = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                CaptionNode::Comment { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if comments.is_empty() {
            None
        } else {
            Some(comments.concat())
        }
    }

    pub fn format_start(&self) -> String {
        timestamp::format(self.start)
    }

    pub fn format_end(&self) -> String {
        timestamp::format(self.end)
    }

    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Ordered captions for a single language
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptionList {
    pub captions: Vec<Caption>,

    /// Default positioning for every caption in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl CaptionList {
    pub fn new(captions: Vec<Caption>) -> Self {
        Self { captions, layout: None }
    }

    pub fn with_layout(mut self, layout: Option<Layout>) -> Self {
        self.layout = layout;
        self
    }

    pub fn push(&mut self, caption: Caption) {
        self.captions.push(caption);
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Caption> {
        self.captions.iter()
    }

    pub fn last(&self) -> Option<&Caption> {
        self.captions.last()
    }
}

impl<'a> IntoIterator for &'a CaptionList {
    type Item = &'a Caption;
    type IntoIter = std::slice::Iter<'a, Caption>;

    fn into_iter(self) -> Self::IntoIter {
        self.captions.iter()
    }
}

/// Captions for every language of a document, plus the shared style registry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptionSet {
    captions: BTreeMap<String, CaptionList>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    styles: BTreeMap<String, StyleMap>,
}

impl CaptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding a single language
    pub fn with_language(language: &str, captions: CaptionList) -> Self {
        let mut set = Self::new();
        set.set_captions(language, captions);
        set
    }

    pub fn set_captions(&mut self, language: &str, captions: CaptionList) {
        self.captions.insert(language.to_string(), captions);
    }

    pub fn captions(&self, language: &str) -> Option<&CaptionList> {
        self.captions.get(language)
    }

    /// Language tags in ascending order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.captions.keys().map(String::as_str)
    }

    /// The language a single-language writer picks: the smallest tag
    pub fn primary_language(&self) -> Option<&str> {
        self.languages().next()
    }

    /// Default layout of a language's caption list
    pub fn layout(&self, language: &str) -> Option<&Layout> {
        self.captions.get(language).and_then(|list| list.layout.as_ref())
    }

    pub fn set_style(&mut self, name: &str, style: StyleMap) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn style(&self, name: &str) -> Option<&StyleMap> {
        self.styles.get(name)
    }

    pub fn styles(&self) -> &BTreeMap<String, StyleMap> {
        &self.styles
    }

    /// True when no language holds any caption
    pub fn is_empty(&self) -> bool {
        self.captions.values().all(CaptionList::is_empty)
    }
}

/*!
 * Style resolution for caption output.
 *
 * A style map may reference named classes from the document's registry
 * through `class` or `classes`. Resolution merges the referenced classes in
 * order (later wins) and overlays the inline attributes on top. Classes that
 * reference themselves, directly or through other classes, are rejected.
 */

use std::collections::BTreeMap;

use crate::caption::{StyleMap, StyleValue};
use crate::errors::CaptionWriteError;

/// Boolean style toggles with markup, in opening order
const STYLE_TAGS: [(&str, &str, &str); 3] = [
    ("italics", "<i>", "</i>"),
    ("underline", "<u>", "</u>"),
    ("bold", "<b>", "</b>"),
];

/// Opening and closing markup for a resolved style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTags {
    pub open: String,
    pub close: String,
}

impl StyleTags {
    /// Build well-nested tags for every active toggle.
    ///
    /// Open order is italics, underline, bold; close order is the reverse.
    pub fn for_style(style: &StyleMap) -> Self {
        let mut tags = StyleTags::default();
        for (name, open, close) in STYLE_TAGS {
            if style.get(name).is_some_and(StyleValue::is_truthy) {
                tags.open.push_str(open);
                tags.close.insert_str(0, close);
            }
        }
        tags
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Class names a style map references, in listed order
fn referenced_classes(style: &StyleMap) -> Vec<&str> {
    match style.get("classes") {
        Some(StyleValue::Classes(classes)) => classes.iter().map(String::as_str).collect(),
        Some(StyleValue::Text(class)) => vec![class.as_str()],
        _ => match style.get("class") {
            Some(StyleValue::Text(class)) => vec![class.as_str()],
            Some(StyleValue::Classes(classes)) => classes.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        },
    }
}

/// Resolves style maps against a class registry
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    registry: &'a BTreeMap<String, StyleMap>,
}

impl<'a> StyleResolver<'a> {
    pub fn new(registry: &'a BTreeMap<String, StyleMap>) -> Self {
        Self { registry }
    }

    /// Merge referenced classes and inline attributes into one map.
    ///
    /// Unknown class names resolve to nothing.
    pub fn resolve(&self, style: &StyleMap) -> Result<StyleMap, CaptionWriteError> {
        let mut path = Vec::new();
        self.resolve_with_path(style, &mut path)
    }

    /// Resolve and turn the result into markup
    pub fn tags(&self, style: &StyleMap) -> Result<StyleTags, CaptionWriteError> {
        Ok(StyleTags::for_style(&self.resolve(style)?))
    }

    fn resolve_with_path<'s>(&self, style: &'s StyleMap, path: &mut Vec<&'s str>) -> Result<StyleMap, CaptionWriteError>
    where
        'a: 's,
    {
        let mut resolved = StyleMap::new();

        for class in referenced_classes(style) {
            if path.contains(&class) {
                let mut cycle: Vec<&str> = path.clone();
                cycle.push(class);
                return Err(CaptionWriteError::StyleCycle(cycle.join(" -> ")));
            }

            let Some(class_style) = self.registry.get(class) else {
                continue;
            };

            path.push(class);
            let sub_style = self.resolve_with_path(class_style, path)?;
            path.pop();

            resolved.extend(sub_style);
        }

        resolved.extend(style.iter().map(|(key, value)| (key.clone(), value.clone())));
        Ok(resolved)
    }
}

/*!
 * WebVTT writer.
 *
 * Renders one language of a `CaptionSet` as WebVTT. Each caption becomes
 * one cue per layout group: runs of text that share positioning. The
 * caption set is only borrowed; per-call values such as the default layout
 * live in a `WriteContext` that is dropped when the call returns.
 */

use log::debug;

use crate::app_config::WriterConfig;
use crate::caption::{Caption, CaptionNode, CaptionSet, Layout};
use crate::errors::CaptionWriteError;
use crate::style::{StyleResolver, StyleTags};

use super::{cue_settings, text};

/// Header written at the top of every document
pub const HEADER: &str = "WEBVTT\n\n";

/// Stand-in for cue lines that would otherwise be empty
const NBSP: &str = "&nbsp;";

/// Everything one `write` call needs, derived from its inputs
#[derive(Debug, Clone, Copy)]
pub struct WriteContext<'a> {
    pub config: &'a WriterConfig,
    pub styles: StyleResolver<'a>,
    pub default_layout: Option<&'a Layout>,
}

/// Encoded cue text sharing one layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGroup<'a> {
    pub text: String,
    pub layout: Option<&'a Layout>,
}

/// Writes caption sets as WebVTT
#[derive(Debug, Clone, Default)]
pub struct WebVttWriter {
    config: WriterConfig,
}

impl WebVttWriter {
    /// Create a writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom configuration
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write the document's primary (smallest-tagged) language
    pub fn write(&self, caption_set: &CaptionSet) -> Result<String, CaptionWriteError> {
        match caption_set.primary_language() {
            Some(language) if !caption_set.is_empty() => self.write_language(caption_set, language),
            _ => Ok(HEADER.to_string()),
        }
    }

    /// Write one chosen language of the document
    pub fn write_language(&self, caption_set: &CaptionSet, language: &str) -> Result<String, CaptionWriteError> {
        let Some(captions) = caption_set.captions(language) else {
            return Ok(HEADER.to_string());
        };

        let context = WriteContext {
            config: &self.config,
            styles: StyleResolver::new(caption_set.styles()),
            default_layout: caption_set.layout(language),
        };

        let mut cues = Vec::new();
        for caption in captions {
            cues.extend(Self::write_caption(caption, &context)?);
        }

        debug!("Wrote {} WebVTT cues for {} captions ({})", cues.len(), captions.len(), language);
        Ok(format!("{}{}", HEADER, cues.join("\n")))
    }

    /// Render a caption as one cue block per layout group
    pub fn write_caption(caption: &Caption, context: &WriteContext<'_>) -> Result<Vec<String>, CaptionWriteError> {
        let timespan = format!("{} --> {}", caption.format_start(), caption.format_end());
        let cue_style = context.styles.tags(&caption.style)?;

        Self::layout_groups(&caption.nodes, context)?
            .into_iter()
            .map(|group| -> Result<String, CaptionWriteError> {
                let layout = group.layout.or(caption.layout.as_ref()).or(context.default_layout);
                let settings = cue_settings::format(layout, context.config)?;
                Ok(format!(
                    "{}{}\n{}{}{}\n",
                    timespan, settings, cue_style.open, group.text, cue_style.close
                ))
            })
            .collect()
    }

    /// Split a caption's nodes into runs of text sharing a layout.
    ///
    /// A text node whose layout differs from the previous one starts a new
    /// group, unless nothing has been written to the current group yet.
    pub fn layout_groups<'n>(
        nodes: &'n [CaptionNode],
        context: &WriteContext<'_>,
    ) -> Result<Vec<LayoutGroup<'n>>, CaptionWriteError> {
        let mut groups = Vec::new();
        let mut current_layout: Option<&'n Layout> = None;
        let mut buffer = String::new();

        for (index, node) in nodes.iter().enumerate() {
            match node {
                CaptionNode::Text { content, layout } => {
                    let layout = layout.as_ref();
                    if !buffer.is_empty() && layout != current_layout {
                        groups.push(LayoutGroup {
                            text: std::mem::take(&mut buffer),
                            layout: current_layout,
                        });
                    }
                    let encoded = text::encode(content);
                    buffer.push_str(if encoded.is_empty() { NBSP } else { &encoded });
                    current_layout = layout;
                }
                CaptionNode::Style { attributes, opening } => {
                    let tags: StyleTags = context.styles.tags(attributes)?;
                    buffer.push_str(if *opening { &tags.open } else { &tags.close });
                }
                CaptionNode::Break => {
                    // keep the line visible when nothing textual precedes it
                    let after_non_text = index > 0 && !nodes[index - 1].is_text();
                    if index == 0 || after_non_text {
                        buffer.push_str(NBSP);
                    }
                    buffer.push('\n');
                }
                CaptionNode::Comment { .. } => {}
            }
        }

        if !buffer.is_empty() {
            groups.push(LayoutGroup {
                text: buffer,
                layout: current_layout,
            });
        }

        Ok(groups)
    }
}

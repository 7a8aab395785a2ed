/*!
 * WebVTT reader.
 *
 * A line-oriented state machine: timing lines open a caption, content lines
 * accumulate text (or comments inside a NOTE block attached to the open
 * caption), and a blank line closes the caption.
 */

use log::{debug, warn};

use crate::app_config::ReaderConfig;
use crate::caption::{Caption, CaptionList, CaptionNode, CaptionSet, Layout};
use crate::errors::CaptionReadError;

use super::{cue_settings, text, timestamp};

/// Token every WebVTT document carries in its header
pub const HEADER_TOKEN: &str = "WEBVTT";

/// Marker line that starts a comment block
pub const NOTE_MARKER: &str = "NOTE";

/// Separator between the start and end timestamps of a timing line
pub const TIMING_SEPARATOR: &str = "-->";

/// Split text into lines at `\n`, `\r\n` or a lone `\r`.
///
/// A trailing line break does not produce an empty last line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(index) => {
                lines.push(&rest[..index]);
                let break_len = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[index + break_len..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Pieces of a timing line, before timestamp parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingLine<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub settings: Option<&'a str>,
}

/// Split `<start> --> <end> [settings]` into its parts.
///
/// Both timestamps must be single tokens separated from the arrow by
/// whitespace. Settings are everything after the end token, right-trimmed.
pub fn split_timing_line(line: &str) -> Result<TimingLine<'_>, CaptionReadError> {
    let invalid = || CaptionReadError::syntax("Invalid timing format.");

    let start_len = line.find(char::is_whitespace).ok_or_else(invalid)?;
    let start = &line[..start_len];
    if start.is_empty() {
        return Err(invalid());
    }

    let rest = line[start_len..].trim_start();
    let rest = rest.strip_prefix(TIMING_SEPARATOR).ok_or_else(invalid)?;
    if !rest.starts_with(char::is_whitespace) {
        return Err(invalid());
    }

    let rest = rest.trim_start();
    let end_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let end = &rest[..end_len];
    if end.is_empty() {
        return Err(invalid());
    }

    let settings = rest[end_len..].trim();
    Ok(TimingLine {
        start,
        end,
        settings: if settings.is_empty() { None } else { Some(settings) },
    })
}

/// Timing of the currently open caption
#[derive(Debug, Clone)]
struct CueTiming {
    start: u64,
    end: u64,
    layout: Option<Layout>,
}

/// Parser state between lines
#[derive(Debug)]
enum ParserState {
    Idle,
    Open {
        timing: CueTiming,
        nodes: Vec<CaptionNode>,
        in_note: bool,
    },
}

/// Reads WebVTT documents into the caption model
#[derive(Debug, Clone, Default)]
pub struct WebVttReader {
    config: ReaderConfig,
}

impl WebVttReader {
    /// Create a reader that tolerates timing errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Cheap sniff: does the content look like WebVTT at all?
    pub fn detect(content: &str) -> bool {
        content.contains(HEADER_TOKEN)
    }

    /// Read raw bytes, rejecting anything that is not UTF-8 text
    pub fn read_bytes(&self, content: &[u8], language: &str) -> Result<CaptionSet, CaptionReadError> {
        let content = std::str::from_utf8(content)
            .map_err(|e| CaptionReadError::InvalidInput(format!("The content is not a unicode string: {}", e)))?;
        self.read(content, language)
    }

    /// Read a WebVTT document into a single-language caption set
    pub fn read(&self, content: &str, language: &str) -> Result<CaptionSet, CaptionReadError> {
        let lines = split_lines(content);
        let captions = self.parse_lines(&lines)?;

        if captions.is_empty() {
            return Err(CaptionReadError::NoCaptions("empty caption file".to_string()));
        }

        debug!("Read {} WebVTT captions for language {}", captions.len(), language);
        Ok(CaptionSet::with_language(language, captions))
    }

    /// Run the state machine over already split lines
    pub fn parse_lines(&self, lines: &[&str]) -> Result<CaptionList, CaptionReadError> {
        let mut captions = CaptionList::default();
        let mut state = ParserState::Idle;

        for (index, &line) in lines.iter().enumerate() {
            let previous_line = index.checked_sub(1).map(|i| lines[i]);
            let next_line = lines.get(index + 1).copied();

            if line.contains(TIMING_SEPARATOR) {
                let last_start = captions.last().map_or(0, |caption| caption.start);
                let timing = self
                    .parse_timing_line(line, last_start)
                    .map_err(|e| e.at_line(index + 1))?;

                state = match state {
                    // Content that was never closed by a blank line carries over
                    ParserState::Open { nodes, .. } => ParserState::Open {
                        timing,
                        nodes,
                        in_note: false,
                    },
                    ParserState::Idle => ParserState::Open {
                        timing,
                        nodes: Vec::new(),
                        in_note: false,
                    },
                };
                continue;
            }

            match &mut state {
                ParserState::Open { in_note: true, .. } if line == NOTE_MARKER && previous_line == Some("") => {
                    // the marker line of a NOTE block
                }
                ParserState::Open { nodes, in_note, .. } if line.is_empty() => {
                    if next_line == Some(NOTE_MARKER) {
                        *in_note = true;
                    } else if nodes.is_empty() {
                        // stays open: following content lines still belong to this timing
                        warn!("Cue without text before blank line (line {})", index + 1);
                    } else {
                        Self::close(&mut state, &mut captions);
                    }
                }
                ParserState::Open { nodes, in_note: true, .. } => {
                    nodes.push(CaptionNode::comment(line));
                }
                ParserState::Open { nodes, .. } => {
                    if !nodes.is_empty() {
                        nodes.push(CaptionNode::line_break());
                    }
                    nodes.push(CaptionNode::text(text::decode(line)));
                }
                ParserState::Idle => {
                    // header, file-level comments and stray text outside any cue
                }
            }
        }

        // The last cue may not be followed by a blank line
        Self::close(&mut state, &mut captions);

        Ok(captions)
    }

    /// Emit the open caption, if it has any content, and return to idle
    fn close(state: &mut ParserState, captions: &mut CaptionList) {
        if let ParserState::Open { timing, nodes, .. } = std::mem::replace(state, ParserState::Idle) {
            if !nodes.is_empty() {
                captions.push(Caption::new(timing.start, timing.end, nodes).with_layout(timing.layout));
            }
        }
    }

    fn parse_timing_line(&self, line: &str, last_start: u64) -> Result<CueTiming, CaptionReadError> {
        let parts = split_timing_line(line)?;

        let start = timestamp::parse(parts.start)?;
        let end = timestamp::parse(parts.end)?;

        if self.config.strict_timing {
            Self::validate_timings(start, end, last_start)?;
        }

        Ok(CueTiming {
            start,
            end,
            layout: parts.settings.and_then(cue_settings::parse),
        })
    }

    fn validate_timings(start: u64, end: u64, last_start: u64) -> Result<(), CaptionReadError> {
        if start > end {
            return Err(CaptionReadError::timing_order(
                "End timestamp is not greater than start timestamp.",
            ));
        }
        if start < last_start {
            return Err(CaptionReadError::timing_order(
                "Start timestamp is not greater than or equal to start timestamp of previous cue.",
            ));
        }
        Ok(())
    }
}

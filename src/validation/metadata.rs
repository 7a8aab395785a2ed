/*!
 * Sequenced-metadata validation for WebVTT streams.
 *
 * Streams accepted here carry a JSON object in a NOTE block of every cue,
 * with an integer sequence id (`Seq`) and a game id (`game_id`). Raw input
 * is checked before parsing (header on the first line, no doubled blank
 * lines) and the parsed cues after. The first violation wins.
 */

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::caption::{Caption, CaptionList};
use crate::errors::{CaptionReadError, MetadataError};
use crate::webvtt::reader::{split_lines, WebVttReader, HEADER_TOKEN};

/// JSON key of the sequence id
pub const SEQ_KEY: &str = "Seq";

/// JSON key of the game id
pub const GAME_ID_KEY: &str = "game_id";

/// A cue together with its validated metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencedCaption {
    pub caption: Caption,
    pub seq: i64,
    pub game_id: i64,
    /// The full metadata object
    pub metadata: Value,
}

/// Read an id that may be stored as a JSON number or a numeric string
fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

fn required_id(metadata: &Value, key: &str, index: usize) -> Result<i64, MetadataError> {
    let value = metadata.get(key).ok_or_else(|| match key {
        SEQ_KEY => MetadataError::MissingSeq { index },
        _ => MetadataError::MissingGameId { index },
    })?;

    coerce_id(value).ok_or_else(|| MetadataError::NonCoercibleId {
        index,
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Validator for sequenced-metadata WebVTT streams
#[derive(Debug, Clone, Default)]
pub struct MetadataValidator {
    reader: WebVttReader,
}

impl MetadataValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific reader (e.g. one with strict timing)
    pub fn with_reader(reader: WebVttReader) -> Self {
        Self { reader }
    }

    /// Check the raw text before it is parsed
    pub fn pre_validate(content: &str) -> Result<(), MetadataError> {
        let lines = split_lines(content);

        match lines.first() {
            Some(first) if first.contains(HEADER_TOKEN) => {}
            _ => return Err(MetadataError::MissingHeader),
        }

        for (index, pair) in lines.windows(2).enumerate() {
            if pair[0].is_empty() && pair[1].is_empty() {
                return Err(MetadataError::ConsecutiveBlankLines { line: index + 2 });
            }
        }

        Ok(())
    }

    /// Check parsed cues and extract their metadata
    pub fn post_validate(captions: &CaptionList) -> Result<Vec<SequencedCaption>, MetadataError> {
        if captions.is_empty() {
            return Err(MetadataError::NoCues);
        }

        captions
            .iter()
            .enumerate()
            .map(|(index, caption)| Self::validate_caption(index, caption))
            .collect()
    }

    fn validate_caption(index: usize, caption: &Caption) -> Result<SequencedCaption, MetadataError> {
        let comment = caption
            .comment()
            .filter(|comment| !comment.trim().is_empty())
            .ok_or(MetadataError::MissingComment { index })?;

        let metadata: Value = serde_json::from_str(&comment).map_err(|e| MetadataError::InvalidJsonComment {
            index,
            reason: e.to_string(),
        })?;

        let seq = required_id(&metadata, SEQ_KEY, index)?;
        let game_id = required_id(&metadata, GAME_ID_KEY, index)?;

        Ok(SequencedCaption {
            caption: caption.clone(),
            seq,
            game_id,
            metadata,
        })
    }

    /// Pre-validate, parse and post-validate a stream
    pub fn read(&self, content: &str, language: &str) -> Result<Vec<SequencedCaption>, MetadataError> {
        Self::pre_validate(content)?;

        let caption_set = self.reader.read(content, language).map_err(|e| match e {
            CaptionReadError::NoCaptions(_) => MetadataError::NoCues,
            other => MetadataError::Read(other),
        })?;

        let captions = caption_set.captions(language).ok_or(MetadataError::NoCues)?;
        let sequenced = Self::post_validate(captions)?;

        debug!("Validated metadata of {} cues", sequenced.len());
        Ok(sequenced)
    }
}

/// Sorted copy of the cues, ascending by sequence id
pub fn sort_by_seq(captions: &[SequencedCaption]) -> Vec<SequencedCaption> {
    let mut sorted = captions.to_vec();
    sorted.sort_by_key(|caption| caption.seq);
    sorted
}

/// Cues whose sequence id lies in `[start, end]`, ascending
pub fn slice_by_seq(captions: &[SequencedCaption], start: i64, end: i64) -> Vec<SequencedCaption> {
    sort_by_seq(captions)
        .into_iter()
        .filter(|caption| (start..=end).contains(&caption.seq))
        .collect()
}

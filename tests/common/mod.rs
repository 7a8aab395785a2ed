/*!
 * Common test utilities for the cuecodec test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cuecodec::caption::{CaptionList, CaptionSet};
use cuecodec::WebVttReader;

/// Language tag used by most tests
pub const LANG: &str = "en-US";

/// A small document with a multi-line cue, an escaped entity and a voice span
pub const SAMPLE_VTT: &str = "WEBVTT

00:00:01.000 --> 00:00:04.000
This is a test caption.

00:00:05.000 --> 00:00:09.000 align:start line:85%
It contains <v Roger>multiple</v>
lines &amp; entities.

00:00:10.000 --> 00:00:14.000
For testing purposes.
";

/// A sequenced-metadata stream, out of order
pub const SEQUENCED_VTT: &str = "WEBVTT

00:00:01.000 --> 00:00:02.000
one

NOTE
{\"Seq\": 5, \"game_id\": 7}

00:00:02.000 --> 00:00:03.000
two

NOTE
{\"Seq\": 1, \"game_id\": 7}

00:00:03.000 --> 00:00:04.000
three

NOTE
{\"Seq\": \"3\", \"game_id\": \"7\"}

00:00:04.000 --> 00:00:05.000
four

NOTE
{\"Seq\": 2, \"game_id\": 7}

00:00:05.000 --> 00:00:06.000
five

NOTE
{\"Seq\": 4, \"game_id\": 7}
";

/// Initialise test logging once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample WebVTT file for testing
pub fn create_test_captions(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_VTT)
}

/// Parse a document with the default reader
pub fn read_vtt(content: &str) -> CaptionSet {
    WebVttReader::new().read(content, LANG).expect("sample should parse")
}

/// The caption list of the default language
pub fn captions_of(set: &CaptionSet) -> &CaptionList {
    set.captions(LANG).expect("language should be present")
}

/// (start, end, text) triples of every caption
pub fn triples(set: &CaptionSet) -> Vec<(u64, u64, String)> {
    captions_of(set)
        .iter()
        .map(|caption| (caption.start, caption.end, caption.text()))
        .collect()
}

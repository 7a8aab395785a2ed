/*!
 * Tests for the WebVTT reader
 */

use cuecodec::app_config::ReaderConfig;
use cuecodec::caption::{CaptionNode, HorizontalAlignment, Size};
use cuecodec::errors::CaptionReadError;
use cuecodec::WebVttReader;

use crate::common::{self, LANG};

fn strict_reader() -> WebVttReader {
    WebVttReader::with_config(ReaderConfig::strict())
}

/// Test the header sniff
#[test]
fn test_detect_withHeaderToken_shouldReturnTrue() {
    assert!(WebVttReader::detect("WEBVTT\n\n"));
    assert!(WebVttReader::detect("\u{feff}WEBVTT - some title\n"));
    assert!(!WebVttReader::detect("1\n00:00:01,000 --> 00:00:02,000\nsrt\n"));
}

/// Test reading the shared sample document
#[test]
fn test_read_withSampleDocument_shouldKeepOrderAndText() {
    common::init_logging();
    let set = common::read_vtt(common::SAMPLE_VTT);

    assert_eq!(
        common::triples(&set),
        vec![
            (1_000_000, 4_000_000, "This is a test caption.".to_string()),
            (5_000_000, 9_000_000, "It contains Roger: multiple\nlines & entities.".to_string()),
            (10_000_000, 14_000_000, "For testing purposes.".to_string()),
        ]
    );
}

/// Test that cue settings are attached to the caption layout
#[test]
fn test_read_withCueSettings_shouldAttachLayout() {
    let set = common::read_vtt(common::SAMPLE_VTT);
    let captions = common::captions_of(&set);

    assert!(captions.captions[0].layout.is_none());

    let layout = captions.captions[1].layout.as_ref().unwrap();
    assert_eq!(layout.webvtt_positioning.as_deref(), Some("align:start line:85%"));
    assert_eq!(layout.alignment, Some(HorizontalAlignment::Start));
    assert_eq!(layout.origin.unwrap().y, Size::percent(85.0));
}

/// Test the NOTE block example: one caption, text then comment
#[test]
fn test_read_withNoteBlock_shouldProduceTextThenComment() {
    let content = "WEBVTT\n\n00:00.000 --> 00:05.000\nHello\n\nNOTE\nworld\n\n";
    let set = WebVttReader::new().read(content, LANG).unwrap();
    let captions = common::captions_of(&set);

    assert_eq!(captions.len(), 1);
    assert_eq!(
        captions.captions[0].nodes,
        vec![CaptionNode::text("Hello"), CaptionNode::comment("world")]
    );
    assert_eq!(captions.captions[0].comment().as_deref(), Some("world"));
}

/// Test that multi-line comments are concatenated
#[test]
fn test_read_withMultiLineNote_shouldConcatenateComment() {
    let content = "WEBVTT\n\n00:00.000 --> 00:05.000\nHello\n\nNOTE\n{\"Seq\": 1,\n\"game_id\": 2}\n";
    let set = WebVttReader::new().read(content, LANG).unwrap();
    let caption = &common::captions_of(&set).captions[0];

    assert_eq!(caption.comment().as_deref(), Some("{\"Seq\": 1,\"game_id\": 2}"));
    assert_eq!(caption.text(), "Hello");
}

/// Test that a cue holding only a NOTE block keeps its comment
#[test]
fn test_read_withNoteOnlyCue_shouldKeepComment() {
    let content = "WEBVTT\n\n00:00.000 --> 00:05.000\n\nNOTE\nonly a comment\n\n00:06.000 --> 00:07.000\nnext\n";
    let set = WebVttReader::new().read(content, LANG).unwrap();
    let captions = common::captions_of(&set);

    assert_eq!(captions.len(), 2);
    assert_eq!(captions.captions[0].nodes, vec![CaptionNode::comment("only a comment")]);
    assert_eq!(captions.captions[1].text(), "next");
}

/// Test that CRLF line endings are accepted
#[test]
fn test_read_withCrlfLineEndings_shouldParse() {
    let content = "WEBVTT\r\n\r\n00:01.000 --> 00:02.000\r\nfirst\r\n\r\n00:03.000 --> 00:04.000\r\nsecond\r\n";
    let set = WebVttReader::new().read(content, LANG).unwrap();

    assert_eq!(common::captions_of(&set).len(), 2);
}

/// Test that a lone carriage return also ends a line
#[test]
fn test_read_withCarriageReturnLineEndings_shouldParse() {
    let content = "WEBVTT\r\r00:01.000 --> 00:02.000\rfirst\rsecond\r\r00:03.000 --> 00:04.000\rthird\r";
    let set = WebVttReader::new().read(content, LANG).unwrap();

    assert_eq!(
        common::triples(&set),
        vec![
            (1_000_000, 2_000_000, "first\nsecond".to_string()),
            (3_000_000, 4_000_000, "third".to_string()),
        ]
    );
}

/// Test that a blank line right after a timing keeps the cue open for later text
#[test]
fn test_read_withBlankLineAfterTiming_shouldKeepTiming() {
    let content = "WEBVTT\n\n00:01.000 --> 00:02.000\n\nHello\n";
    let set = WebVttReader::new().read(content, LANG).unwrap();

    assert_eq!(common::triples(&set), vec![(1_000_000, 2_000_000, "Hello".to_string())]);
}

/// Test that an hour count past the microsecond range fails at its line
#[test]
fn test_read_withOverflowingHours_shouldFailWithSyntax() {
    let content = "WEBVTT\n\n99999999999999999:00:00.000 --> 99999999999999999:00:01.000\ntext\n";
    let error = WebVttReader::new().read(content, LANG).unwrap_err();

    assert!(matches!(error, CaptionReadError::Syntax { .. }));
    assert_eq!(error.line(), Some(3));
}

/// Test that a document without cues is a distinct failure
#[test]
fn test_read_withHeaderOnly_shouldFailWithNoCaptions() {
    let result = WebVttReader::new().read("WEBVTT\n\nNOTE\nnothing here\n", LANG);
    assert!(matches!(result, Err(CaptionReadError::NoCaptions(_))));
}

/// Test that a header with empty cues only also fails
#[test]
fn test_read_withOnlyEmptyCues_shouldFailWithNoCaptions() {
    let result = WebVttReader::new().read("WEBVTT\n\n00:01.000 --> 00:02.000\n\n", LANG);
    assert!(matches!(result, Err(CaptionReadError::NoCaptions(_))));
}

/// Test that malformed timestamps report their line
#[test]
fn test_read_withBadTimestamp_shouldReportLineNumber() {
    let content = "WEBVTT\n\n00:01.000 --> 00:02.000\nok\n\n00:03.0 --> 00:04.000\nbad\n";
    let error = WebVttReader::new().read(content, LANG).unwrap_err();

    assert!(matches!(error, CaptionReadError::Syntax { .. }));
    assert_eq!(error.line(), Some(6));
    assert_eq!(error.to_string(), "Invalid timing format. (line 6)");
}

/// Test that an arrow without surrounding whitespace is a syntax error
#[test]
fn test_read_withGluedArrow_shouldFailWithSyntax() {
    let content = "WEBVTT\n\n00:01.000-->00:02.000\ntext\n";
    let error = WebVttReader::new().read(content, LANG).unwrap_err();

    assert_eq!(error.line(), Some(3));
}

/// Test that backwards start times are only rejected in strict mode
#[test]
fn test_read_withBackwardsStart_shouldFailOnlyWhenStrict() {
    let content = "WEBVTT\n\n00:05.000 --> 00:06.000\nsecond\n\n00:01.000 --> 00:02.000\nfirst\n";

    let lenient = WebVttReader::new().read(content, LANG).unwrap();
    assert_eq!(common::captions_of(&lenient).len(), 2);

    let error = strict_reader().read(content, LANG).unwrap_err();
    assert!(matches!(error, CaptionReadError::TimingOrder { .. }));
    assert_eq!(error.line(), Some(6));
}

/// Test that inverted cues are rejected in strict mode
#[test]
fn test_read_withInvertedCue_shouldFailWhenStrict() {
    let content = "WEBVTT\n\n00:05.000 --> 00:01.000\ninverted\n";
    let error = strict_reader().read(content, LANG).unwrap_err();

    assert!(matches!(error, CaptionReadError::TimingOrder { .. }));
}

/// Test that equal start times pass strict mode
#[test]
fn test_read_withEqualStarts_shouldPassStrict() {
    let content = "WEBVTT\n\n00:01.000 --> 00:02.000\na\n\n00:01.000 --> 00:03.000\nb\n";
    let set = strict_reader().read(content, LANG).unwrap();

    assert_eq!(common::captions_of(&set).len(), 2);
}

/// Test that non UTF-8 bytes are rejected as invalid input
#[test]
fn test_readBytes_withInvalidUtf8_shouldFailWithInvalidInput() {
    let bytes = b"WEBVTT\n\n00:01.000 --> 00:02.000\n\xff\xfe\n";
    let result = WebVttReader::new().read_bytes(bytes, LANG);

    assert!(matches!(result, Err(CaptionReadError::InvalidInput(_))));
}

/// Test that valid bytes read like text
#[test]
fn test_readBytes_withUtf8_shouldParse() {
    let set = WebVttReader::new().read_bytes(common::SAMPLE_VTT.as_bytes(), LANG).unwrap();
    assert_eq!(common::captions_of(&set).len(), 3);
    assert_eq!(set.primary_language(), Some(LANG));
}

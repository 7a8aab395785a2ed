/*!
 * Tests for sequenced-metadata validation
 */

use cuecodec::app_config::ReaderConfig;
use cuecodec::errors::{CaptionReadError, MetadataError};
use cuecodec::validation::{slice_by_seq, sort_by_seq, MetadataValidator};
use cuecodec::WebVttReader;

use crate::common::{self, LANG};

fn cue_with_note(comment: &str) -> String {
    format!("WEBVTT\n\n00:00.000 --> 00:01.000\nline\n\nNOTE\n{}\n", comment)
}

/// Test that a missing header on line one is rejected before parsing
#[test]
fn test_read_withoutHeaderOnFirstLine_shouldRejectMissingHeader() {
    let content = "\nWEBVTT\n\n00:00.000 --> 00:01.000\nline\n";
    let result = MetadataValidator::new().read(content, LANG);

    assert_eq!(result, Err(MetadataError::MissingHeader));
    assert_eq!(MetadataError::MissingHeader.to_string(), "Header WebVTT is missing");
}

/// Test that two blank lines in a row are rejected with the line number
#[test]
fn test_preValidate_withDoubleBlankLine_shouldRejectConsecutiveBlanks() {
    let content = "WEBVTT\n\n00:00.000 --> 00:01.000\nline\n\n\n00:02.000 --> 00:03.000\nmore\n";
    let result = MetadataValidator::pre_validate(content);

    assert_eq!(result, Err(MetadataError::ConsecutiveBlankLines { line: 6 }));
}

/// Test that a cue without a comment is rejected
#[test]
fn test_read_withoutNote_shouldRejectMissingComment() {
    let content = "WEBVTT\n\n00:00.000 --> 00:01.000\nline\n";
    let result = MetadataValidator::new().read(content, LANG);

    assert_eq!(result, Err(MetadataError::MissingComment { index: 0 }));
}

/// Test that a non-JSON comment is rejected
#[test]
fn test_read_withPlainComment_shouldRejectInvalidJson() {
    let result = MetadataValidator::new().read(&cue_with_note("not json"), LANG);
    assert!(matches!(result, Err(MetadataError::InvalidJsonComment { index: 0, .. })));
}

/// Test that a missing game id is rejected
#[test]
fn test_read_withSeqOnly_shouldRejectMissingGameId() {
    let result = MetadataValidator::new().read(&cue_with_note("{\"Seq\":1}"), LANG);
    assert_eq!(result, Err(MetadataError::MissingGameId { index: 0 }));
}

/// Test that a missing sequence id is rejected
#[test]
fn test_read_withGameIdOnly_shouldRejectMissingSeq() {
    let result = MetadataValidator::new().read(&cue_with_note("{\"game_id\":1}"), LANG);
    assert_eq!(result, Err(MetadataError::MissingSeq { index: 0 }));
}

/// Test that ids which are not integers are rejected
#[test]
fn test_read_withTextualSeq_shouldRejectNonCoercibleId() {
    let result = MetadataValidator::new().read(&cue_with_note("{\"Seq\":\"two\",\"game_id\":1}"), LANG);

    assert_eq!(
        result,
        Err(MetadataError::NonCoercibleId {
            index: 0,
            key: "Seq".to_string(),
            value: "\"two\"".to_string(),
        })
    );
}

/// Test that numeric strings are coerced to integers
#[test]
fn test_read_withStringIds_shouldCoerceToIntegers() {
    let sequenced = MetadataValidator::new()
        .read(&cue_with_note("{\"Seq\":\"2\",\"game_id\":\"7\"}"), LANG)
        .unwrap();

    assert_eq!(sequenced.len(), 1);
    assert_eq!(sequenced[0].seq, 2);
    assert_eq!(sequenced[0].game_id, 7);
    assert_eq!(sequenced[0].metadata["Seq"], "2");
    assert_eq!(sequenced[0].caption.text(), "line");
}

/// Test that a header-only stream has no cues
#[test]
fn test_read_withHeaderOnly_shouldRejectNoCues() {
    let result = MetadataValidator::new().read("WEBVTT\n", LANG);
    assert_eq!(result, Err(MetadataError::NoCues));
}

/// Test that the first invalid cue wins
#[test]
fn test_read_withSeveralInvalidCues_shouldReportFirst() {
    let content = "WEBVTT\n\n00:00.000 --> 00:01.000\nok\n\nNOTE\n{\"Seq\":1,\"game_id\":1}\n\n\
                   00:01.000 --> 00:02.000\nno game\n\nNOTE\n{\"Seq\":2}\n\n\
                   00:02.000 --> 00:03.000\nno note\n";
    let result = MetadataValidator::new().read(content, LANG);

    assert_eq!(result, Err(MetadataError::MissingGameId { index: 1 }));
}

/// Test that reader failures are passed through
#[test]
fn test_read_withStrictReaderAndBackwardsCue_shouldWrapReadError() {
    let content = "WEBVTT\n\n00:05.000 --> 00:06.000\na\n\n00:01.000 --> 00:02.000\nb\n";
    let validator = MetadataValidator::with_reader(WebVttReader::with_config(ReaderConfig::strict()));

    let result = validator.read(content, LANG);
    assert!(matches!(
        result,
        Err(MetadataError::Read(CaptionReadError::TimingOrder { .. }))
    ));
}

/// Test sorting and inclusive slicing by sequence id
#[test]
fn test_sliceBySeq_withShuffledIds_shouldReturnSortedRange() {
    let sequenced = MetadataValidator::new().read(common::SEQUENCED_VTT, LANG).unwrap();
    let original: Vec<i64> = sequenced.iter().map(|entry| entry.seq).collect();
    assert_eq!(original, vec![5, 1, 3, 2, 4]);

    let sorted: Vec<i64> = sort_by_seq(&sequenced).iter().map(|entry| entry.seq).collect();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);

    let sliced = slice_by_seq(&sequenced, 2, 4);
    let ids: Vec<i64> = sliced.iter().map(|entry| entry.seq).collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert_eq!(sliced[0].caption.text(), "four");

    // the input itself is left in stream order
    assert_eq!(sequenced[0].seq, 5);
}

/// Test that an empty or inverted range selects nothing
#[test]
fn test_sliceBySeq_withInvertedRange_shouldBeEmpty() {
    let sequenced = MetadataValidator::new().read(common::SEQUENCED_VTT, LANG).unwrap();
    assert!(slice_by_seq(&sequenced, 4, 2).is_empty());
    assert!(slice_by_seq(&sequenced, 10, 20).is_empty());
}

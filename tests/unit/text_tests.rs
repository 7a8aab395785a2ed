/*!
 * Tests for cue text decoding and escaping
 */

use cuecodec::webvtt::text;

/// Test that formatting tags are removed and their content kept
#[test]
fn test_decode_withFormattingTags_shouldKeepInnerText() {
    assert_eq!(text::decode("<i>soft</i> and <b>loud</b>"), "soft and loud");
    assert_eq!(text::decode("<c.yellow.bg_blue>colored</c>"), "colored");
    assert_eq!(text::decode("<ruby>漢<rt>kan</rt></ruby>"), "漢kan");
    assert_eq!(text::decode("<lang en-GB>colour</lang>"), "colour");
}

/// Test that inline timestamp tags are stripped
#[test]
fn test_decode_withTimestampTags_shouldRemoveThem() {
    assert_eq!(text::decode("one <00:00:01.500>two <00:02.000>three"), "one two three");
}

/// Test that voice spans become speaker prefixes
#[test]
fn test_decode_withVoiceSpan_shouldPrefixSpeaker() {
    assert_eq!(text::decode("<v Esme>It's a blue apple tree!</v>"), "Esme: It's a blue apple tree!");
}

/// Test that character references are resolved once
#[test]
fn test_decode_withEntities_shouldResolveWithoutDoubleDecoding() {
    assert_eq!(text::decode("a &lt; b &gt; c"), "a < b > c");
    assert_eq!(text::decode("Tom &amp; Jerry"), "Tom & Jerry");
    assert_eq!(text::decode("&amp;lt;"), "&lt;");
    assert_eq!(text::decode("x&nbsp;y"), "x\u{a0}y");
    assert_eq!(text::decode("&lrm;&rlm;"), "\u{200e}\u{200f}");
}

/// Test that surrounding whitespace is trimmed
#[test]
fn test_decode_withPadding_shouldTrim() {
    assert_eq!(text::decode("   spaced out \t"), "spaced out");
}

/// Test that unknown tags are left alone
#[test]
fn test_removeStyles_withUnknownTag_shouldKeepIt() {
    assert_eq!(text::remove_styles("<span>kept</span>"), "<span>kept</span>");
}

/// Test escaping of plain text for cue payloads
#[test]
fn test_encode_withSpecialCharacters_shouldEscape() {
    assert_eq!(text::encode("a & b"), "a &amp; b");
    assert_eq!(text::encode("1 < 2"), "1 &lt; 2");
    assert_eq!(text::encode("3 > 2"), "3 > 2");
    assert_eq!(text::encode("go --> there"), "go --&gt; there");
    assert_eq!(text::encode(""), "");
}

/// Test that encoded text decodes back to the original
#[test]
fn test_encode_thenDecode_shouldRestoreText() {
    let original = "Fish & chips <cheap> --> now";
    assert_eq!(text::decode(&text::encode(original)), original);
}

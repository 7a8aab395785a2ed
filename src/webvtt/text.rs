/*!
 * Cue text span decoding and encoding.
 *
 * Decoding turns WebVTT cue payload into plain text: voice spans become a
 * `Name: ` prefix, the other recognized tags are stripped and character
 * references are resolved. Encoding escapes plain text for a cue payload.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// `<v Name>` or `<v.loud.quiet Name>`
static VOICE_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<v(?:\.\w+)* ([^>]*)>").expect("Invalid voice span regex")
});

/// Class, italic, bold, underline, voice, ruby, rt, lang and timestamp tags
static OTHER_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?(?:[cibuv]|ruby|rt|lang|\d+:\d{2}(?::\d{2})?\.\d{3}).*?>")
        .expect("Invalid span tag regex")
});

/// Character references resolved on decode, in resolution order.
/// `&amp;` must stay last so it cannot form new references.
const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&lrm;", "\u{200e}"),
    ("&rlm;", "\u{200f}"),
    ("&nbsp;", "\u{00a0}"),
    ("&amp;", "&"),
];

/// Rewrite voice spans as `Name: ` prefixes and drop other recognized tags
pub fn remove_styles(line: &str) -> String {
    let voiced = VOICE_SPAN_REGEX.replace_all(line, "${1}: ");
    OTHER_SPAN_REGEX.replace_all(&voiced, "").into_owned()
}

/// Convert one cue payload line to plain text
pub fn decode(line: &str) -> String {
    let mut text = remove_styles(line.trim());
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    text
}

/// Escape plain text for use in a cue payload.
///
/// `>` is left alone; `-->` is broken up so it cannot read as a timing separator.
pub fn encode(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace("-->", "--&gt;")
}

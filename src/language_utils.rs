use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for caption language tags
///
/// Caption sets are keyed by tags such as `en`, `en-US` or `fra-CA`. These
/// helpers validate the primary subtag against ISO 639-1 / ISO 639-2 and
/// resolve it to a language name.
/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"), // French
    ("ger", "deu"), // German
    ("dut", "nld"), // Dutch
    ("gre", "ell"), // Greek
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("ice", "isl"), // Icelandic
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("per", "fas"), // Persian
    ("geo", "kat"), // Georgian
    ("may", "msa"), // Malay
    ("mac", "mkd"), // Macedonian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("wel", "cym"), // Welsh
];

/// Primary language subtag of a tag (`en` for `en-US`, `pt` for `pt_BR`)
pub fn primary_subtag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Normalize the primary subtag of a language tag to ISO 639-2/T
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    let code = primary_subtag(tag).to_lowercase();

    match code.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&code) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&code).is_some() {
                return Ok(code);
            }
            if let Some((_, part2t)) = PART2B_TO_PART2T.iter().find(|(part2b, _)| *part2b == code) {
                return Ok(part2t.to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Invalid language tag: {}", tag))
}

/// Validate that a tag starts with a known ISO 639 language code
pub fn validate_language_tag(tag: &str) -> Result<()> {
    normalize_to_part2t(tag).map(|_| ())
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let normalized = normalize_to_part2t(tag)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

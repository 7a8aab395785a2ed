/*!
 * Translation between WebVTT cue settings and `Layout`.
 *
 * Reading keeps the raw settings string so a WebVTT-to-WebVTT round trip is
 * lossless, and fills in whatever structured fields can be recognized.
 * Writing turns a layout into `align:`/`position:`/`line:`/`size:` settings.
 */

use log::trace;

use crate::app_config::WriterConfig;
use crate::caption::{HorizontalAlignment, Layout, Point, Size, Stretch};
use crate::errors::LayoutError;

/// Alignment keyword WebVTT leaves implicit
pub const DEFAULT_ALIGNMENT: &str = "middle";

/// WebVTT keyword for a horizontal alignment
pub fn webvtt_alignment(alignment: HorizontalAlignment) -> &'static str {
    match alignment {
        HorizontalAlignment::Left => "left",
        HorizontalAlignment::Center => "middle",
        HorizontalAlignment::Right => "right",
        HorizontalAlignment::Start => "start",
        HorizontalAlignment::End => "end",
    }
}

fn parse_alignment(value: &str) -> Option<HorizontalAlignment> {
    match value {
        "left" => Some(HorizontalAlignment::Left),
        "center" | "middle" => Some(HorizontalAlignment::Center),
        "right" => Some(HorizontalAlignment::Right),
        "start" => Some(HorizontalAlignment::Start),
        "end" => Some(HorizontalAlignment::End),
        _ => None,
    }
}

// "40%" or "40%,line-left"
fn parse_percentage(value: &str) -> Option<f64> {
    let number = value.split(',').next()?.strip_suffix('%')?;
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build a layout from the settings part of a timing line.
///
/// Returns `None` for blank settings. Unknown settings and line numbers
/// (`line:-1`) are only kept in the raw string.
pub fn parse(settings: &str) -> Option<Layout> {
    let settings = settings.trim();
    if settings.is_empty() {
        return None;
    }

    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut alignment = None;

    for token in settings.split_whitespace() {
        let Some((name, value)) = token.split_once(':') else {
            continue;
        };
        match name {
            "align" => alignment = parse_alignment(value),
            "position" => x = parse_percentage(value),
            "line" => y = parse_percentage(value),
            "size" => width = parse_percentage(value),
            _ => trace!("Keeping cue setting '{}' as raw text only", token),
        }
    }

    let origin = if x.is_some() || y.is_some() {
        Some(Point::new(
            Size::percent(x.unwrap_or(0.0)),
            Size::percent(y.unwrap_or(0.0)),
        ))
    } else {
        None
    };

    Some(Layout {
        origin,
        extent: width.map(|w| Stretch::new(Size::percent(w), Size::percent(0.0))),
        padding: None,
        alignment,
        webvtt_positioning: Some(settings.to_string()),
    })
}

/// Render a layout as cue settings, each prefixed with a space.
///
/// Returns an empty string when there is nothing to emit.
pub fn format(layout: Option<&Layout>, config: &WriterConfig) -> Result<String, LayoutError> {
    let Some(layout) = layout else {
        return Ok(String::new());
    };

    // WebVTT to WebVTT: keep the settings untouched
    if let Some(raw) = &layout.webvtt_positioning {
        return Ok(format!(" {}", raw));
    }

    let already_relative = layout.is_relative();
    if !config.relativize && !already_relative {
        // absolute positioning is dropped rather than approximated
        return Ok(String::new());
    }

    let mut layout = if already_relative {
        layout.clone()
    } else {
        layout.as_percentage_of(config.video_width, config.video_height)?
    };

    if config.fit_to_screen {
        layout = layout.fit_to_screen();
    }

    let mut left_offset = layout.origin.map(|origin| origin.x);
    let mut top_offset = layout.origin.map(|origin| origin.y);
    let mut cue_width = layout.extent.map(|extent| extent.horizontal);

    // WebVTT has no padding: fold it into the offsets and width
    if let Some(padding) = layout.padding {
        if let Some(left) = left_offset.as_mut() {
            *left = *left + padding.start;
            if let Some(width) = cue_width.as_mut() {
                *width = *width - padding.start;
            }
        }
        if let Some(width) = cue_width.as_mut() {
            *width = *width - padding.end;
        }
        if let Some(top) = top_offset.as_mut() {
            *top = *top + padding.before;
        }
        // padding.after is dropped: the cue box is only as tall as its text
    }

    let mut cue_settings = String::new();

    if let Some(alignment) = layout.alignment.map(webvtt_alignment) {
        if alignment != DEFAULT_ALIGNMENT {
            cue_settings.push_str(&format!(" align:{}", alignment));
        }
    }
    if let Some(left) = left_offset {
        cue_settings.push_str(&format!(" position:{},start", left));
    }
    if let Some(top) = top_offset {
        cue_settings.push_str(&format!(" line:{}", top));
    }
    if let Some(width) = cue_width {
        cue_settings.push_str(&format!(" size:{}", width));
    }

    Ok(cue_settings)
}

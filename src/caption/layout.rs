/*!
 * Layout geometry for captions.
 *
 * A `Layout` describes where a caption (or a run of its text) sits on the
 * video frame: origin, extent, padding and horizontal alignment. Values are
 * either absolute pixels or percentages of the video frame.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::errors::LayoutError;

/// Measurement unit of a `Size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Absolute pixels on the video frame
    Pixel,
    /// Percentage of the matching video dimension
    Percent,
}

impl Unit {
    fn suffix(&self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Percent => "%",
        }
    }
}

/// A single length along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub value: f64,
    pub unit: Unit,
}

impl Size {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub fn pixels(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    pub fn is_relative(&self) -> bool {
        self.unit == Unit::Percent
    }

    /// Express this size as a percentage of `dimension` (video width or height).
    pub fn as_percentage_of(&self, dimension: Option<u32>, axis: &'static str) -> Result<Size, LayoutError> {
        match self.unit {
            Unit::Percent => Ok(*self),
            Unit::Pixel => match dimension {
                None => Err(LayoutError::MissingVideoDimensions { axis }),
                Some(0) => Err(LayoutError::ZeroVideoDimension { axis }),
                Some(dimension) => Ok(Size::percent(self.value * 100.0 / f64::from(dimension))),
            },
        }
    }

    fn clamp_percent(&self, min: f64, max: f64) -> Size {
        Size::new(self.value.clamp(min, max), self.unit)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.value + rhs.value, self.unit)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.value - rhs.value, self.unit)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.value * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 {
            write!(f, "{}{}", rounded as i64, self.unit.suffix())
        } else {
            write!(f, "{}{}", rounded, self.unit.suffix())
        }
    }
}

/// Top-left corner of a box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Size,
    pub y: Size,
}

impl Point {
    pub fn new(x: Size, y: Size) -> Self {
        Self { x, y }
    }

    pub fn is_relative(&self) -> bool {
        self.x.is_relative() && self.y.is_relative()
    }
}

/// Width and height of a box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stretch {
    pub horizontal: Size,
    pub vertical: Size,
}

impl Stretch {
    pub fn new(horizontal: Size, vertical: Size) -> Self {
        Self { horizontal, vertical }
    }

    pub fn is_relative(&self) -> bool {
        self.horizontal.is_relative() && self.vertical.is_relative()
    }
}

/// Inner spacing of a box, in writing-direction terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub before: Size,
    pub after: Size,
    pub start: Size,
    pub end: Size,
}

impl Padding {
    pub fn new(before: Size, after: Size, start: Size, end: Size) -> Self {
        Self { before, after, start, end }
    }

    pub fn is_relative(&self) -> bool {
        self.before.is_relative()
            && self.after.is_relative()
            && self.start.is_relative()
            && self.end.is_relative()
    }
}

impl Default for Padding {
    fn default() -> Self {
        let zero = Size::percent(0.0);
        Self::new(zero, zero, zero, zero)
    }
}

/// Horizontal text alignment inside the caption box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    Start,
    End,
}

/// Positioning metadata for a caption or a run of caption text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Point>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Stretch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<HorizontalAlignment>,

    /// Cue settings exactly as read from a WebVTT timing line.
    /// Only used when writing WebVTT back out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webvtt_positioning: Option<String>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_extent(mut self, extent: Stretch) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// True when every geometric component present is measured in percent
    pub fn is_relative(&self) -> bool {
        self.origin.as_ref().is_none_or(Point::is_relative)
            && self.extent.as_ref().is_none_or(Stretch::is_relative)
            && self.padding.as_ref().is_none_or(Padding::is_relative)
    }

    /// Convert every component to a percentage of the given video frame.
    ///
    /// Horizontal quantities use the width, vertical ones the height.
    pub fn as_percentage_of(&self, video_width: Option<u32>, video_height: Option<u32>) -> Result<Layout, LayoutError> {
        let horizontal = |size: Size| size.as_percentage_of(video_width, "width");
        let vertical = |size: Size| size.as_percentage_of(video_height, "height");

        let origin = match self.origin {
            Some(origin) => Some(Point::new(horizontal(origin.x)?, vertical(origin.y)?)),
            None => None,
        };
        let extent = match self.extent {
            Some(extent) => Some(Stretch::new(horizontal(extent.horizontal)?, vertical(extent.vertical)?)),
            None => None,
        };
        let padding = match self.padding {
            Some(padding) => Some(Padding::new(
                vertical(padding.before)?,
                vertical(padding.after)?,
                horizontal(padding.start)?,
                horizontal(padding.end)?,
            )),
            None => None,
        };

        Ok(Layout {
            origin,
            extent,
            padding,
            alignment: self.alignment,
            webvtt_positioning: self.webvtt_positioning.clone(),
        })
    }

    /// Keep a relative layout inside the visible frame.
    ///
    /// Origin coordinates are clamped to [0, 100] and the extent is shrunk so
    /// that origin + extent never passes 100 on either axis. Layouts with
    /// absolute components are returned unchanged.
    pub fn fit_to_screen(&self) -> Layout {
        if !self.is_relative() {
            return self.clone();
        }

        let origin = self
            .origin
            .map(|origin| Point::new(origin.x.clamp_percent(0.0, 100.0), origin.y.clamp_percent(0.0, 100.0)));

        let extent = self.extent.map(|extent| {
            let (x, y) = origin.map_or((0.0, 0.0), |origin| (origin.x.value, origin.y.value));
            Stretch::new(
                extent.horizontal.clamp_percent(0.0, 100.0 - x),
                extent.vertical.clamp_percent(0.0, 100.0 - y),
            )
        });

        Layout {
            origin,
            extent,
            padding: self.padding,
            alignment: self.alignment,
            webvtt_positioning: self.webvtt_positioning.clone(),
        }
    }
}

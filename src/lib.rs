/*!
 * # cuecodec - WebVTT caption codec
 *
 * A Rust library for converting WebVTT caption streams to a structured,
 * timing-indexed document model and back.
 *
 * ## Features
 *
 * - State-machine WebVTT reader with NOTE-block comments and cue settings
 * - WebVTT writer with style-class resolution and layout translation
 *   (pixel to percentage conversion, screen clamping, padding folding)
 * - Optional strict timing checks
 * - Sequenced-metadata validation of JSON comments (`Seq`, `game_id`)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption`: Document model (`CaptionSet`, `Caption`, `CaptionNode`, `Layout`)
 * - `webvtt`: WebVTT wire format:
 *   - `webvtt::timestamp`: Timestamp codec
 *   - `webvtt::text`: Cue text decoding and escaping
 *   - `webvtt::cue_settings`: Cue settings <-> layout translation
 *   - `webvtt::reader`: Cue parser
 *   - `webvtt::writer`: Cue serializer
 * - `style`: Style class resolution
 * - `validation`: Sequenced-metadata policy checks
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language tag utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod caption;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod style;
pub mod validation;
pub mod webvtt;

// Re-export main types for easier usage
pub use app_config::{Config, ReaderConfig, WriterConfig};
pub use caption::{Caption, CaptionList, CaptionNode, CaptionSet, Layout};
pub use errors::{AppError, CaptionReadError, CaptionWriteError, LayoutError, MetadataError};
pub use validation::{MetadataValidator, SequencedCaption};
pub use webvtt::{WebVttReader, WebVttWriter};

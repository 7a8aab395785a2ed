/*!
 * WebVTT wire format.
 *
 * - `timestamp`: `[H:]MM:SS.mmm` <-> microseconds
 * - `text`: cue payload decoding and escaping
 * - `cue_settings`: cue settings <-> `Layout`
 * - `reader`: line state machine producing captions
 * - `writer`: caption rendering with style and layout translation
 */

pub mod cue_settings;
pub mod reader;
pub mod text;
pub mod timestamp;
pub mod writer;

pub use reader::WebVttReader;
pub use writer::WebVttWriter;

/*!
 * Validation of caption streams beyond the WebVTT grammar.
 *
 * # Architecture
 *
 * - `metadata`: sequenced-metadata policy (header/blank-line pre-checks,
 *   JSON comment post-checks, sequence-id sorting and slicing)
 */

pub mod metadata;

// Re-export main types
pub use metadata::{slice_by_seq, sort_by_seq, MetadataValidator, SequencedCaption};

/// 7-segment digit engine for segclock.
///
/// Turns a decimal digit and a segment size into a character grid.
pub mod digit;
pub mod segments;

pub use digit::{render_digit, render_digit_sequential};
pub use segments::{SEGMENT_PATTERNS, Segment, SegmentPattern};

/*!
 * Subtitle handling: SRT parsing, WebVTT output and the conversion pipeline
 * that glues them to the encoding detector.
 */

pub mod model;
pub mod pipeline;
pub mod srt;
pub mod timecode;
pub mod vtt;

pub use model::{Cue, SubtitleDocument};
pub use pipeline::ConversionPipeline;
pub use srt::{ParserState, SrtParser, Transition};
pub use timecode::TimeCode;
pub use vtt::{VttOptions, VttWriter};

/*!
 * In-memory subtitle document model.
 *
 * A document is built by one parse call, read once by a serializer and then
 * dropped. Cue order is playback order.
 */

use super::timecode::TimeCode;

/// One subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Cue number as written in the source, after control-character stripping
    pub id: String,

    pub start: TimeCode,

    /// Not required to be after `start`
    pub end: TimeCode,

    /// Text lines in display order
    pub lines: Vec<String>,
}

impl Cue {
    pub fn new(id: impl Into<String>, start: TimeCode, end: TimeCode) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            lines: Vec::new(),
        }
    }

    /// Builder-style helper used mostly by tests
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Ordered collection of cues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleDocument {
    cues: Vec<Cue>,
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl From<Vec<Cue>> for SubtitleDocument {
    fn from(cues: Vec<Cue>) -> Self {
        Self { cues }
    }
}

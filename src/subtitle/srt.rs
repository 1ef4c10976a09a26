/*!
 * Strict SRT parser.
 *
 * Parsing is an explicit state machine: every input line is fed to
 * [`ParserState::step`], a pure transition that either yields the next state
 * (plus a finished cue when one closes) or a typed error. [`SrtParser`] owns
 * the state and the document under construction and aborts on the first
 * error.
 *
 * The accepted shape is the classic one:
 *
 * ```text
 * 1
 * 00:01:21,456 --> 00:01:23,417
 * First line
 * Second line
 *
 * ```
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Cue, SubtitleDocument};
use super::timecode::TimeCode;
use crate::errors::SubtitleError;

// @const: Any of the three line terminators
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

// @const: Unicode "Other" category (control, format, private use, unassigned)
static NON_PRINTABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{C}").unwrap());

const ARROW: &str = "-->";
const ARROW_RANGE: std::ops::Range<usize> = 13..16;
const START_RANGE: std::ops::Range<usize> = 0..12;
const END_OFFSET: usize = 17;

/// Position of the parser between two lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Between cues; blank lines are skipped here
    #[default]
    AwaitingCueId,
    /// Cue number read, timecode line expected
    CueIdRead { id: String },
    /// Timecode read, no text yet
    TimecodeRead(Cue),
    /// At least one text line read
    CueTextRead(Cue),
}

/// Outcome of feeding one line to a [`ParserState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ParserState,
    /// Set when the line closed a cue
    pub completed: Option<Cue>,
}

impl Transition {
    fn to(next: ParserState) -> Self {
        Self {
            next,
            completed: None,
        }
    }
}

impl ParserState {
    /// Apply one raw input line. `line_no` is 1-based and only used for errors.
    pub fn step(self, line_no: usize, raw_line: &str) -> Result<Transition, SubtitleError> {
        let line = raw_line.trim();

        match self {
            Self::AwaitingCueId => {
                if line.is_empty() {
                    return Ok(Transition::to(Self::AwaitingCueId));
                }

                let id = NON_PRINTABLE.replace_all(line, "");
                if id.parse::<i32>().is_err() {
                    return Err(SubtitleError::InvalidCueNumber {
                        line: line_no,
                        content: line.to_string(),
                    });
                }

                Ok(Transition::to(Self::CueIdRead { id: id.into_owned() }))
            }
            Self::CueIdRead { id } => {
                if line.is_empty() {
                    return Err(SubtitleError::UnexpectedLine {
                        line: line_no,
                        content: line.to_string(),
                    });
                }

                let (start, end) = parse_timecode_line(line).ok_or_else(|| {
                    SubtitleError::MalformedTimecode {
                        line: line_no,
                        content: line.to_string(),
                    }
                })?;

                Ok(Transition::to(Self::TimecodeRead(Cue::new(id, start, end))))
            }
            Self::TimecodeRead(mut cue) | Self::CueTextRead(mut cue) => {
                if line.is_empty() {
                    return Ok(Transition {
                        next: Self::AwaitingCueId,
                        completed: Some(cue),
                    });
                }

                cue.lines.push(line.to_string());
                Ok(Transition::to(Self::CueTextRead(cue)))
            }
        }
    }

    /// Close the state at end of input, flushing a cue that is still open
    pub fn finish(self) -> Result<Option<Cue>, SubtitleError> {
        match self {
            Self::AwaitingCueId => Ok(None),
            Self::CueIdRead { id } => Err(SubtitleError::IncompleteCue { id }),
            Self::TimecodeRead(cue) | Self::CueTextRead(cue) => Ok(Some(cue)),
        }
    }
}

/// Split `start --> end` at its fixed offsets
fn parse_timecode_line(line: &str) -> Option<(TimeCode, TimeCode)> {
    if line.get(ARROW_RANGE)? != ARROW {
        return None;
    }

    let start = TimeCode::parse_fixed(line.get(START_RANGE)?)?;
    let end = TimeCode::parse_fixed(line.get(END_OFFSET..)?)?;
    Some((start, end))
}

/// Split text into lines the way a buffered line reader does: `\r\n`, `\n`
/// and lone `\r` all terminate a line, and a trailing terminator does not
/// produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Single-use SRT parser. Discard it after an error.
#[derive(Debug, Default)]
pub struct SrtParser {
    state: ParserState,
    document: SubtitleDocument,
    line_no: usize,
}

impl SrtParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete SRT text
    pub fn parse_str(text: &str) -> Result<SubtitleDocument, SubtitleError> {
        let mut parser = Self::new();
        for line in split_lines(text) {
            parser.feed_line(line)?;
        }
        parser.finish()
    }

    /// Feed the next input line
    pub fn feed_line(&mut self, line: &str) -> Result<(), SubtitleError> {
        self.line_no += 1;

        let state = std::mem::take(&mut self.state);
        let transition = state.step(self.line_no, line)?;

        if let Some(cue) = transition.completed {
            self.document.push(cue);
        }
        self.state = transition.next;

        Ok(())
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// End of input: flush any open cue and hand over the document
    pub fn finish(mut self) -> Result<SubtitleDocument, SubtitleError> {
        if let Some(cue) = self.state.finish()? {
            self.document.push(cue);
        }

        debug!("Parsed {} cues from {} lines", self.document.len(), self.line_no);
        Ok(self.document)
    }
}

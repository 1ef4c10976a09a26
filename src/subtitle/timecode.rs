use std::fmt;

// @module: Media timestamps with fixed-width SRT/WebVTT rendering

/// A media timestamp split into its clock components.
///
/// Components come straight from the source text, so values outside their
/// nominal ranges (minute 75, millisecond 1500) are kept as written rather
/// than normalised. Ordering compares hour, minute, second, millisecond in
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeCode {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl TimeCode {
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Parse `HH:MM:SS,mmm` by fixed offsets.
    ///
    /// Only the digit fields are inspected; the characters between them are
    /// not. Anything past offset 12 is ignored.
    pub fn parse_fixed(text: &str) -> Option<Self> {
        let field = |range: std::ops::Range<usize>| text.get(range)?.parse::<u32>().ok();

        Some(Self {
            hour: field(0..2)?,
            minute: field(3..5)?,
            second: field(6..8)?,
            millisecond: field(9..12)?,
        })
    }

    /// Render as `HH:MM:SS<sep>mmm`
    pub fn format_with(&self, separator: char) -> String {
        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            self.hour, self.minute, self.second, separator, self.millisecond
        )
    }

    pub fn to_srt_string(&self) -> String {
        self.format_with(',')
    }

    pub fn to_vtt_string(&self) -> String {
        self.format_with('.')
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_srt_string())
    }
}

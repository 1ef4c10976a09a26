use super::model::SubtitleDocument;
use crate::encoding::TextEncoding;

// @module: WebVTT serialization

/// File signature, first line of every WebVTT file
pub const WEBVTT_HEADER: &str = "WEBVTT";

/// Rendering switches for [`VttWriter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VttOptions {
    /// Emit each cue's source id on its own line before the timing line
    pub include_cue_ids: bool,
}

/// Renders a [`SubtitleDocument`] as WebVTT
#[derive(Debug, Clone, Default)]
pub struct VttWriter {
    options: VttOptions,
}

impl VttWriter {
    pub fn new(options: VttOptions) -> Self {
        Self { options }
    }

    /// Render to text. Every cue, the last one included, ends with a blank line.
    pub fn render(&self, document: &SubtitleDocument) -> String {
        let mut out = String::with_capacity(16 + document.len() * 64);
        out.push_str(WEBVTT_HEADER);
        out.push_str("\n\n");

        for cue in document.cues() {
            if self.options.include_cue_ids {
                out.push_str(&cue.id);
                out.push('\n');
            }

            out.push_str(&cue.start.to_vtt_string());
            out.push_str(" --> ");
            out.push_str(&cue.end.to_vtt_string());
            out.push('\n');

            for line in &cue.lines {
                out.push_str(line);
                out.push('\n');
            }

            out.push('\n');
        }

        out
    }

    /// Render and encode in one go
    pub fn serialize(&self, document: &SubtitleDocument, encoding: TextEncoding) -> Vec<u8> {
        encoding.encode(&self.render(document))
    }
}

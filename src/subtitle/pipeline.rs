use log::{debug, warn};

use super::model::SubtitleDocument;
use super::srt::SrtParser;
use super::vtt::{VttOptions, VttWriter};
use crate::encoding::{EncodingDetector, TextEncoding};
use crate::errors::SubtitleError;

// @module: SRT bytes to WebVTT bytes

/// Detect → decode → parse → serialize.
///
/// This is the only subtitle entry point the file-serving side calls. A parse
/// failure is returned as is and nothing is written; callers are expected to
/// fall back to the original bytes.
#[derive(Debug, Clone, Default)]
pub struct ConversionPipeline {
    detector: EncodingDetector,
    writer: VttWriter,
}

impl ConversionPipeline {
    pub fn new(detector: EncodingDetector, options: VttOptions) -> Self {
        Self {
            detector,
            writer: VttWriter::new(options),
        }
    }

    /// Convert raw SRT bytes in an unknown encoding into UTF-8 WebVTT
    pub fn convert(&self, raw: &[u8]) -> Result<Vec<u8>, SubtitleError> {
        let document = self.parse(raw)?;
        Ok(self.writer.serialize(&document, TextEncoding::Utf8))
    }

    /// The first half of [`convert`](Self::convert): bytes to document
    pub fn parse(&self, raw: &[u8]) -> Result<SubtitleDocument, SubtitleError> {
        let encoding = self.detector.detect(raw);
        let text = self.decode(raw, encoding);

        let document = SrtParser::parse_str(&text)?;
        debug!(
            "Converted subtitle: {} bytes, encoding {}, {} cues",
            raw.len(),
            encoding,
            document.len()
        );
        Ok(document)
    }

    fn decode(&self, raw: &[u8], encoding: TextEncoding) -> String {
        match encoding.decode_strict(raw) {
            Some(text) => text,
            None => {
                // Only reachable through the UTF-8 fallback of the detector
                warn!("Input is not valid {}, decoding lossily", encoding);
                String::from_utf8_lossy(raw).into_owned()
            }
        }
    }
}

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use log::debug;
use serde::{Deserialize, Serialize};

// @module: Text encoding sniffing for subtitle files

/// Candidate order used when nothing else is configured
pub const DEFAULT_CANDIDATES: [TextEncoding; 5] = [
    TextEncoding::Utf8,
    TextEncoding::Iso8859_1,
    TextEncoding::UsAscii,
    TextEncoding::Utf16,
    TextEncoding::Windows1252,
];

/// Character sets the detector knows how to try
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "UTF-8", alias = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "ISO-8859-1", alias = "iso-8859-1", alias = "latin1")]
    Iso8859_1,
    #[serde(rename = "US-ASCII", alias = "us-ascii", alias = "ascii")]
    UsAscii,
    #[serde(rename = "UTF-16", alias = "utf-16", alias = "utf16")]
    Utf16,
    #[serde(rename = "windows-1252", alias = "WINDOWS-1252", alias = "cp1252")]
    Windows1252,
}

impl TextEncoding {
    // @returns: Canonical charset name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
            Self::Utf16 => "UTF-16",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes`, returning `None` on the first malformed sequence
    pub fn decode_strict(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            Self::Iso8859_1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Self::UsAscii => {
                if bytes.is_ascii() {
                    Some(bytes.iter().map(|&b| b as char).collect())
                } else {
                    None
                }
            }
            Self::Utf16 => {
                let (encoding, body) = match bytes {
                    [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                    [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                    _ => (UTF_16BE, bytes),
                };
                encoding
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|text| text.into_owned())
            }
            Self::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }

    /// Encode `text`; unmappable characters are replaced, never rejected
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Iso8859_1 => text
                .chars()
                .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
                .collect(),
            Self::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Utf16 => {
                let mut out = Vec::with_capacity(2 + text.len() * 2);
                out.extend_from_slice(&[0xFE, 0xFF]);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            Self::Windows1252 => {
                let (bytes, _, _) = WINDOWS_1252.encode(text);
                bytes.into_owned()
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" => Ok(Self::Iso8859_1),
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            "utf-16" | "utf16" => Ok(Self::Utf16),
            "windows-1252" | "cp1252" => Ok(Self::Windows1252),
            _ => Err(anyhow!("Unsupported text encoding: {}", s)),
        }
    }
}

/// Priority-ordered charset sniffer.
///
/// The first candidate that decodes the whole buffer wins. This is not a
/// statistical detector: ISO-8859-1 accepts every byte sequence, so anything
/// listed after it is only reached when the order is reconfigured.
#[derive(Debug, Clone)]
pub struct EncodingDetector {
    candidates: Vec<TextEncoding>,
}

impl Default for EncodingDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES.to_vec())
    }
}

impl EncodingDetector {
    pub fn new(candidates: Vec<TextEncoding>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[TextEncoding] {
        &self.candidates
    }

    /// Guess the encoding of `bytes`, falling back to UTF-8
    pub fn detect(&self, bytes: &[u8]) -> TextEncoding {
        let detected = self
            .candidates
            .iter()
            .copied()
            .find(|candidate| candidate.decode_strict(bytes).is_some());

        match detected {
            Some(encoding) => encoding,
            None => {
                debug!("No candidate encoding decodes {} bytes, assuming UTF-8", bytes.len());
                TextEncoding::Utf8
            }
        }
    }
}

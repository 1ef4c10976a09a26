/*!
 * # cinema-family - media library core
 *
 * The library half of a personal media server that browses a directory tree
 * and serves videos with their subtitles to a browser.
 *
 * ## Features
 *
 * - Convert SRT subtitles in an unknown encoding to UTF-8 WebVTT
 * - Order directory entries naturally (`ep2` before `ep10`)
 * - Hide filesystem paths behind reversible opaque identifiers
 * - List folders and videos, find the subtitles that belong to a video
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `encoding`: Priority-ordered text encoding detection
 * - `subtitle`: SRT parsing and WebVTT output:
 *   - `subtitle::timecode`: Timestamp value type
 *   - `subtitle::srt`: State-machine SRT parser
 *   - `subtitle::vtt`: WebVTT writer
 *   - `subtitle::pipeline`: Bytes-to-bytes conversion
 * - `natural_order`: Natural string comparison
 * - `path_id`: Path identifier codec
 * - `file_utils`: Listing element types and filesystem helpers
 * - `language_utils`: ISO language code utilities
 * - `app_controller`: Request-level operations
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the Apache License 2.0
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoding;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod natural_order;
pub mod path_id;
pub mod subtitle;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ServedFile};
pub use encoding::{EncodingDetector, TextEncoding};
pub use errors::{AppError, IdentifierError, SubtitleError};
pub use file_utils::{ElementKind, FileSystemElement};
pub use path_id::PathIdCodec;
pub use subtitle::{ConversionPipeline, Cue, SrtParser, SubtitleDocument, TimeCode, VttWriter};

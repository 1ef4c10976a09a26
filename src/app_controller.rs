use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{ContentSniffer, ExtensionSniffer, FileManager, FileSystemElement};
use crate::language_utils;
use crate::natural_order;
use crate::path_id::PathIdCodec;
use crate::subtitle::ConversionPipeline;

// @module: Request-level operations of the media library

/// Content type of converted subtitles
pub const VTT_CONTENT_TYPE: &str = "text/vtt";

/// Content type when the sniffer has no answer
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file ready to be handed to the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// True when the bytes were produced by subtitle conversion
    pub converted: bool,
}

/// Main application controller for browsing and serving media
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Mints and resolves path identifiers
    codec: PathIdCodec,
    // @field: MIME detection collaborator
    sniffer: Box<dyn ContentSniffer>,
    // @field: SRT to WebVTT conversion
    pipeline: ConversionPipeline,
}

impl Controller {
    // @method: Create a controller with an OS-seeded codec and the extension sniffer
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        Self::with_parts(config, PathIdCodec::from_os_rng(), Box::new(ExtensionSniffer))
    }

    /// Create a controller from explicit collaborators
    pub fn with_parts(
        config: Config,
        codec: PathIdCodec,
        sniffer: Box<dyn ContentSniffer>,
    ) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let pipeline = ConversionPipeline::new(
            config.subtitles.detector(),
            config.subtitles.vtt_options(),
        );

        Ok(Self {
            config,
            codec,
            sniffer,
            pipeline,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn codec(&self) -> &PathIdCodec {
        &self.codec
    }

    /// Listing of the configured root directory
    pub fn root_listing(&self) -> Result<Vec<FileSystemElement>, AppError> {
        let root = self.config.root_dir.clone();
        if !FileManager::dir_exists(&root) {
            return Err(AppError::NotFound(format!("Root directory {:?}", root)));
        }
        self.list_directory(&root)
    }

    /// Listing of the folder behind `folder_id`
    pub fn folder_listing(&self, folder_id: &str) -> Result<Vec<FileSystemElement>, AppError> {
        let dir = self.resolve(folder_id)?;
        if !dir.is_dir() {
            return Err(AppError::NotFound(format!("Not a folder: {}", folder_id)));
        }
        self.list_directory(&dir)
    }

    /// Folders first, then video files, each group in natural order.
    /// Anything that is not a folder or a video is left out.
    pub fn list_directory(&self, dir: &Path) -> Result<Vec<FileSystemElement>, AppError> {
        let mut folders = Vec::new();
        let mut videos = Vec::new();

        for path in FileManager::list_dir(dir)? {
            let name = FileManager::display_name(&path);

            if path.is_dir() {
                folders.push(FileSystemElement::folder(self.codec.encode(&path), name));
            } else if self.is_video(&path) {
                let poster = self.find_poster(&path);
                videos.push(FileSystemElement::video(self.codec.encode(&path), name, poster));
            }
        }

        natural_order::sort_natural(&mut folders, |e| e.name.as_str());
        natural_order::sort_natural(&mut videos, |e| e.name.as_str());

        debug!(
            "Listed {:?}: {} folders, {} videos",
            dir,
            folders.len(),
            videos.len()
        );

        folders.append(&mut videos);
        Ok(folders)
    }

    /// Final path component behind `id`, used for page titles
    pub fn display_name(&self, id: &str) -> Result<String, AppError> {
        Ok(FileManager::display_name(self.resolve(id)?))
    }

    /// Subtitle files that belong to the video behind `video_id`.
    ///
    /// A candidate is a plain-text sibling named like the video, either with
    /// a different extension (`movie.srt`) or with a language code in front
    /// of it (`movie.es.srt`).
    pub fn video_subtitles(&self, video_id: &str) -> Result<Vec<FileSystemElement>, AppError> {
        let video = self.resolve(video_id)?;
        let video_name = FileManager::display_name(&video);
        let video_stem = FileManager::name_without_extension(&video_name).to_string();

        let parent = match video.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut candidates: Vec<(String, PathBuf, Option<String>)> = Vec::new();
        for path in FileManager::list_dir(&parent)? {
            if !path.is_file() || path == video {
                continue;
            }

            let name = FileManager::display_name(&path);
            let Some(language) = subtitle_language(&video_stem, &name) else {
                continue;
            };

            if self.sniffer.detect(&path).as_deref() == Some("text/plain") {
                candidates.push((name, path, language));
            }
        }

        natural_order::sort_natural(&mut candidates, |(name, _, _)| name.as_str());

        let subtitles = candidates
            .into_iter()
            .enumerate()
            .map(|(index, (name, path, language))| {
                let (language_id, language_name) = match language {
                    Some(code) => {
                        let language_name = language_utils::get_language_name(&code)
                            .unwrap_or_else(|_| code.clone());
                        (code, language_name)
                    }
                    None => (format!("lang{}", index + 1), format!("Language {}", index + 1)),
                };
                FileSystemElement::subtitle(self.codec.encode(&path), name, language_id, language_name)
            })
            .collect::<Vec<_>>();

        debug!("Found {} subtitle(s) for {:?}", subtitles.len(), video);
        Ok(subtitles)
    }

    /// Raw file with its sniffed content type
    pub fn load_file(&self, id: &str) -> Result<ServedFile, AppError> {
        let path = self.resolve_file(id)?;
        let content_type = self
            .sniffer
            .detect(&path)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Ok(ServedFile {
            file_name: FileManager::display_name(&path),
            content_type,
            bytes: FileManager::read_bytes(&path)?,
            converted: false,
        })
    }

    /// Subtitle converted to WebVTT.
    ///
    /// If the file is too large or does not parse, the original bytes are
    /// served with the fallback content type instead of failing the request.
    pub fn load_subtitle(&self, id: &str) -> Result<ServedFile, AppError> {
        let path = self.resolve_file(id)?;
        let file_name = FileManager::display_name(&path);

        let size = FileManager::file_size(&path)?;
        if size > self.config.subtitles.max_input_bytes {
            warn!(
                "Subtitle {:?} is {} bytes (limit {}), serving it unconverted",
                path, size, self.config.subtitles.max_input_bytes
            );
            return Ok(self.unconverted(file_name, FileManager::read_bytes(&path)?));
        }

        let raw = FileManager::read_bytes(&path)?;
        match self.pipeline.convert(&raw) {
            Ok(bytes) => Ok(ServedFile {
                file_name: format!("{}.vtt", FileManager::name_without_extension(&file_name)),
                content_type: VTT_CONTENT_TYPE.to_string(),
                bytes,
                converted: true,
            }),
            Err(e) => {
                warn!("Subtitle conversion failed for {:?}: {}. Serving original file.", path, e);
                Ok(self.unconverted(file_name, raw))
            }
        }
    }

    fn unconverted(&self, file_name: String, bytes: Vec<u8>) -> ServedFile {
        ServedFile {
            file_name,
            content_type: self.config.subtitles.fallback_content_type.clone(),
            bytes,
            converted: false,
        }
    }

    fn find_poster(&self, video: &Path) -> Option<Vec<u8>> {
        if !self.config.listing.load_posters {
            return None;
        }

        let poster = FileManager::find_sibling_with_extension(video, &self.config.listing.poster_extensions)?;
        match FileManager::read_bytes(&poster) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Failed to read poster {:?}: {}", poster, e);
                None
            }
        }
    }

    fn is_video(&self, path: &Path) -> bool {
        self.sniffer
            .detect(path)
            .is_some_and(|mime| mime.starts_with("video"))
    }

    // @returns: Existing path behind `id`, NotFound otherwise
    fn resolve(&self, id: &str) -> Result<PathBuf, AppError> {
        let path = self.codec.decode(id)?;
        if !path.exists() {
            return Err(AppError::NotFound(format!("File not found {}", id)));
        }
        Ok(path)
    }

    fn resolve_file(&self, id: &str) -> Result<PathBuf, AppError> {
        let path = self.resolve(id)?;
        if !path.is_file() {
            return Err(AppError::NotFound(format!("Not a file: {}", id)));
        }
        Ok(path)
    }
}

// Some(None) for `<stem>.<ext>`, Some(Some(code)) for `<stem>.<code>.<ext>`,
// None when the name does not belong to the video
fn subtitle_language(video_stem: &str, file_name: &str) -> Option<Option<String>> {
    let stem = FileManager::name_without_extension(file_name);
    if stem == video_stem {
        return Some(None);
    }

    let code = stem.strip_prefix(video_stem)?.strip_prefix('.')?;
    language_utils::is_language_code(code).then(|| Some(code.to_lowercase()))
}

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: Filesystem helpers and listing element types

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemElement {
    /// Opaque identifier of the entry's path
    pub id: String,
    /// Display name (final path component)
    pub name: String,
    pub kind: ElementKind,
}

/// What a listing entry is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Folder,
    VideoFile {
        /// Image bytes of a poster found next to the video
        poster: Option<Vec<u8>>,
    },
    SubtitleFile {
        language_id: String,
        language_name: String,
    },
}

impl FileSystemElement {
    pub fn folder(id: String, name: String) -> Self {
        Self {
            id,
            name,
            kind: ElementKind::Folder,
        }
    }

    pub fn video(id: String, name: String, poster: Option<Vec<u8>>) -> Self {
        Self {
            id,
            name,
            kind: ElementKind::VideoFile { poster },
        }
    }

    pub fn subtitle(id: String, name: String, language_id: String, language_name: String) -> Self {
        Self {
            id,
            name,
            kind: ElementKind::SubtitleFile {
                language_id,
                language_name,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ElementKind::Folder)
    }

    // @returns: Short label for the element kind
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            ElementKind::Folder => "folder",
            ElementKind::VideoFile { .. } => "video",
            ElementKind::SubtitleFile { .. } => "subtitle",
        }
    }
}

/// Guesses the MIME type of a file.
///
/// Real content sniffing is delegated to implementors; the library only cares
/// about the resulting type string.
pub trait ContentSniffer: Send + Sync {
    fn detect(&self, path: &Path) -> Option<String>;
}

/// Sniffer that looks at the file extension only
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSniffer;

impl ContentSniffer for ExtensionSniffer {
    fn detect(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();

        let mime = match ext.as_str() {
            "mp4" | "m4v" => "video/mp4",
            "mkv" => "video/x-matroska",
            "webm" => "video/webm",
            "avi" => "video/x-msvideo",
            "mov" => "video/quicktime",
            "wmv" => "video/x-ms-wmv",
            "flv" => "video/x-flv",
            "mpg" | "mpeg" => "video/mpeg",
            "ogv" => "video/ogg",
            "ts" | "mts" | "m2ts" => "video/mp2t",
            "srt" | "txt" | "sub" => "text/plain",
            "vtt" => "text/vtt",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => return None,
        };

        Some(mime.to_string())
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Direct children of `dir`, in filesystem order.
    ///
    /// Entries that cannot be read (dangling symlinks, permission errors) are
    /// logged and left out. Only a missing or unreadable `dir` is an error.
    pub fn list_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            match entry {
                Ok(entry) => result.push(entry.into_path()),
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                }
            }
        }

        Ok(result)
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Size of a file in bytes
    pub fn file_size<P: AsRef<Path>>(path: P) -> Result<u64> {
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to stat file: {:?}", path.as_ref()))?;
        Ok(metadata.len())
    }

    /// Display name of a path: its final component, or the whole path for roots
    pub fn display_name<P: AsRef<Path>>(path: P) -> String {
        let path = path.as_ref();
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }

    /// File name up to its last dot. Names without a dot are returned whole.
    pub fn name_without_extension(name: &str) -> &str {
        match name.rfind('.') {
            Some(dot) => &name[..dot],
            None => name,
        }
    }

    /// Whether two file names match once their last extension is removed
    pub fn are_equal_without_extension(name1: &str, name2: &str) -> bool {
        Self::name_without_extension(name1) == Self::name_without_extension(name2)
    }

    /// First sibling of `path` with the same stem and one of `extensions`
    pub fn find_sibling_with_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> Option<PathBuf> {
        let path = path.as_ref();
        let stem = path.file_stem()?;

        extensions.iter().find_map(|ext| {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(ext);
            let candidate = path.with_file_name(name);
            Self::file_exists(&candidate).then_some(candidate)
        })
    }
}

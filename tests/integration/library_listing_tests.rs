/*!
 * Integration tests for folder listings and identifier round trips
 */

use anyhow::Result;
use std::path::Path;

use cinema_family::app_config::Config;
use cinema_family::errors::AppError;
use cinema_family::file_utils::{ElementKind, FileSystemElement};
use cinema_family::path_id;
use crate::common;

fn build_library(root: &Path) -> Result<()> {
    common::create_test_folder(root, "Season 10")?;
    common::create_test_folder(root, "Season 2")?;
    common::create_test_folder(root, "extras")?;
    common::create_test_file(root, "ep10.mkv", "")?;
    common::create_test_file(root, "ep2.mkv", "")?;
    common::create_test_file(root, "ep1.mp4", "")?;
    common::create_test_file(root, "ep1.jpg", "poster-bytes")?;
    common::create_test_file(root, "notes.txt", "not listed")?;
    common::create_test_subtitle(root, "ep1.srt")?;
    Ok(())
}

fn names(elements: &[FileSystemElement]) -> Vec<&str> {
    elements.iter().map(|e| e.name.as_str()).collect()
}

/// Folders come first, then videos, each in natural order
#[test]
fn test_root_listing_withMixedEntries_shouldListFoldersThenVideos() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    build_library(temp_dir.path())?;
    let controller = common::create_controller(temp_dir.path())?;

    let listing = controller.root_listing()?;

    assert_eq!(
        names(&listing),
        vec!["Season 2", "Season 10", "extras", "ep1.mp4", "ep2.mkv", "ep10.mkv"]
    );
    assert!(listing[..3].iter().all(FileSystemElement::is_folder));
    assert!(listing[3..].iter().all(|e| e.kind_label() == "video"));
    Ok(())
}

/// A stale symlink is left out and the rest of the folder is still listed
#[cfg(unix)]
#[test]
fn test_root_listing_withDanglingSymlink_shouldListOtherEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    build_library(temp_dir.path())?;
    std::os::unix::fs::symlink(
        temp_dir.path().join("deleted.mkv"),
        temp_dir.path().join("ep3.mkv"),
    )?;
    let controller = common::create_controller(temp_dir.path())?;

    let listing = controller.root_listing()?;

    assert_eq!(
        names(&listing),
        vec!["Season 2", "Season 10", "extras", "ep1.mp4", "ep2.mkv", "ep10.mkv"]
    );
    Ok(())
}

/// A sibling image with the same stem becomes the video's poster
#[test]
fn test_root_listing_withPosterNextToVideo_shouldAttachPoster() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    build_library(temp_dir.path())?;
    let controller = common::create_controller(temp_dir.path())?;

    let listing = controller.root_listing()?;

    let ep1 = listing.iter().find(|e| e.name == "ep1.mp4").unwrap();
    assert_eq!(ep1.kind, ElementKind::VideoFile { poster: Some(b"poster-bytes".to_vec()) });

    let ep2 = listing.iter().find(|e| e.name == "ep2.mkv").unwrap();
    assert_eq!(ep2.kind, ElementKind::VideoFile { poster: None });
    Ok(())
}

/// Poster loading can be switched off
#[test]
fn test_root_listing_withPostersDisabled_shouldNotAttachPoster() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    build_library(temp_dir.path())?;

    let mut config = Config::default();
    config.root_dir = temp_dir.path().to_path_buf();
    config.listing.load_posters = false;
    let controller = common::create_controller_with(config)?;

    let listing = controller.root_listing()?;
    let ep1 = listing.iter().find(|e| e.name == "ep1.mp4").unwrap();
    assert_eq!(ep1.kind, ElementKind::VideoFile { poster: None });
    Ok(())
}

/// Every listed id resolves back to the entry's path
#[test]
fn test_root_listing_ids_shouldDecodeToEntryPaths() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    build_library(temp_dir.path())?;
    let controller = common::create_controller(temp_dir.path())?;

    for element in controller.root_listing()? {
        let path = path_id::decode(&element.id)?;
        assert_eq!(path.file_name().unwrap().to_string_lossy(), element.name);
        assert_eq!(controller.display_name(&element.id)?, element.name);
    }
    Ok(())
}

/// Folder ids from a listing can be listed in turn
#[test]
fn test_folder_listing_withListedFolderId_shouldListItsContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let season = common::create_test_folder(temp_dir.path(), "Season 1")?;
    common::create_test_file(&season, "e11.mkv", "")?;
    common::create_test_file(&season, "e9.mkv", "")?;
    common::create_test_folder(&season, "Bonus")?;
    let controller = common::create_controller(temp_dir.path())?;

    let root = controller.root_listing()?;
    assert_eq!(names(&root), vec!["Season 1"]);

    let inner = controller.folder_listing(&root[0].id)?;
    assert_eq!(names(&inner), vec!["Bonus", "e9.mkv", "e11.mkv"]);
    Ok(())
}

/// An empty folder lists as empty
#[test]
fn test_folder_listing_withEmptyFolder_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let empty = common::create_test_folder(temp_dir.path(), "empty")?;
    let controller = common::create_controller(temp_dir.path())?;

    assert!(controller.folder_listing(&controller.codec().encode(&empty))?.is_empty());
    Ok(())
}

/// Listing a file or an unknown id fails with NotFound
#[test]
fn test_folder_listing_withInvalidTargets_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.mkv", "")?;
    let controller = common::create_controller(temp_dir.path())?;

    let file_id = controller.codec().encode(&file);
    assert!(matches!(controller.folder_listing(&file_id), Err(AppError::NotFound(_))));
    assert!(matches!(controller.folder_listing("@@@"), Err(AppError::NotFound(_))));
    assert!(matches!(controller.display_name("@@@"), Err(AppError::NotFound(_))));

    let missing_id = controller.codec().encode(&temp_dir.path().join("missing"));
    assert!(matches!(controller.folder_listing(&missing_id), Err(AppError::NotFound(_))));
    Ok(())
}

/// A root that does not exist cannot be listed
#[test]
fn test_root_listing_withMissingRoot_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_controller(&temp_dir.path().join("nowhere"))?;

    assert!(matches!(controller.root_listing(), Err(AppError::NotFound(_))));
    Ok(())
}

/// An invalid configuration is refused up front
#[test]
fn test_with_parts_withInvalidConfig_shouldReturnConfigError() {
    let mut config = Config::default();
    config.subtitles.encoding_candidates.clear();

    assert!(matches!(
        common::create_controller_with(config).map_err(|e| e.downcast::<AppError>()),
        Err(Ok(AppError::Config(_)))
    ));
}

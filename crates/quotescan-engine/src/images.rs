//! Input image discovery.

use std::io;
use std::path::{Path, PathBuf};

/// File extensions accepted as input images.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"];

/// Whether a file name looks like a supported image.
pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Collect the images to scan.
///
/// A directory yields the image files directly inside it in name order; a
/// single image file yields itself; anything else yields nothing.
pub fn collect_images(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(is_image_file)
            })
            .collect();
        files.sort();
        return Ok(files);
    }

    if path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_image_file)
    {
        return Ok(vec![path.to_path_buf()]);
    }

    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_image_file("quote.png"));
        assert!(is_image_file("QUOTE.JPG"));
        assert!(is_image_file("scan.webp"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("archive.png.zip"));
    }

    #[test]
    fn directory_yields_sorted_images_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "readme.md", "c.tiff"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let images = collect_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.jpg", "b.png", "c.tiff"]);
    }

    #[test]
    fn single_image_file_yields_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.jpeg");
        std::fs::write(&file, b"x").unwrap();

        let images = collect_images(&file).unwrap();
        assert_eq!(images, [file]);
    }

    #[test]
    fn non_image_or_missing_path_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(collect_images(&file).unwrap().is_empty());
        assert!(collect_images(&dir.path().join("absent")).unwrap().is_empty());
    }
}

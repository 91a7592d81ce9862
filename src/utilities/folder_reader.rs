use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::collage::ImageRef;

#[derive(Debug)]
pub enum FolderError {
    Unsupported(PathBuf),
    Enumeration(io::Error),
}

impl fmt::Display for FolderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(path) => {
                write!(f, "{} is not a folder that can be opened", path.display())
            }
            Self::Enumeration(err) => write!(f, "reading the folder failed: {err}"),
        }
    }
}

impl std::error::Error for FolderError {}

impl From<io::Error> for FolderError {
    fn from(value: io::Error) -> Self {
        Self::Enumeration(value)
    }
}

/// Collects every image below `root`, descending into subfolders as they come up.
///
/// The order is whatever the file system yields, and it decides where each image lands in the
/// collage. Pass `sort` to order the images by path instead.
pub async fn read_folder(root: &Path, sort: bool) -> Result<Vec<ImageRef>, FolderError> {
    if !tokio::fs::metadata(root).await.is_ok_and(|metadata| metadata.is_dir()) {
        return Err(FolderError::Unsupported(root.to_path_buf()));
    }

    let mut images = Vec::new();
    let mut directories = vec![tokio::fs::read_dir(root).await?];

    while let Some(entries) = directories.last_mut() {
        let Some(entry) = entries.next_entry().await? else {
            directories.pop();
            continue;
        };

        let file_type = entry.file_type().await?;
        let path = entry.path();
        if file_type.is_dir() {
            directories.push(tokio::fs::read_dir(&path).await?);
        } else if file_type.is_file() && is_image(&path) {
            images.push(ImageRef {
                display_name: entry.file_name().to_string_lossy().into_owned(),
                locator: path,
            });
        }
    }

    if sort {
        images.sort_by(|a, b| a.locator.cmp(&b.locator));
    }

    Ok(images)
}

/// judges by the extension, keeping only formats this build can decode
pub fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.png")));
        assert!(is_image(Path::new("dir/B.JPG")));
        assert!(is_image(Path::new("photo.jpeg")));
        assert!(is_image(Path::new("x.webp")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("no_extension")));
    }

    #[test]
    fn test_undecodable_formats_are_skipped() {
        assert!(is_image(Path::new("a.bmp")));
        assert!(is_image(Path::new("a.gif")));
        assert!(!is_image(Path::new("scan.tiff")));
        assert!(!is_image(Path::new("photo.avif")));
        assert!(!is_image(Path::new("favicon.ico")));
        assert!(!is_image(Path::new("sprite.tga")));
    }

    #[tokio::test]
    async fn test_read_folder_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub").join("deeper")).unwrap();
        fs::write(root.join("b.png"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::write(root.join("scan.tiff"), b"").unwrap();
        fs::write(root.join("sub").join("a.jpg"), b"").unwrap();
        fs::write(root.join("sub").join("deeper").join("c.webp"), b"").unwrap();
        fs::write(root.join("sub").join("deeper").join("readme.md"), b"").unwrap();

        let images = read_folder(root, true).await.unwrap();

        assert_eq!(
            images.iter().map(|image| image.display_name.as_str()).collect::<Vec<_>>(),
            ["b.png", "a.jpg", "c.webp"]
        );
        assert_eq!(images[2].locator, root.join("sub").join("deeper").join("c.webp"));

        let mut unsorted = read_folder(root, false).await.unwrap();
        unsorted.sort_by(|a, b| a.locator.cmp(&b.locator));
        assert_eq!(unsorted, images);
    }

    #[tokio::test]
    async fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_folder(dir.path(), false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_a_folder() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("image.png");
        fs::write(&file, b"").unwrap();

        assert!(matches!(read_folder(&file, false).await, Err(FolderError::Unsupported(_))));
        assert!(matches!(
            read_folder(&dir.path().join("missing"), false).await,
            Err(FolderError::Unsupported(_))
        ));
    }
}

use std::fmt;
use std::io::{Cursor, Write};
use std::sync::Arc;

use bytes::Bytes;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, RgbImage, RgbaImage};
use tokio::task::JoinError;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::utilities::persistence::Persistence;

pub const ARCHIVE_NAME: &str = "collages.zip";
const JPEG_QUALITY: u8 = 100;

#[derive(Debug)]
pub enum ExportError {
    NoPages,
    Encode { page: usize, error: ImageError },
    Archive(ZipError),
    Task(JoinError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPages => write!(f, "there are no pages to export"),
            Self::Encode { page, error } => write!(f, "encoding page {page} failed: {error}"),
            Self::Archive(err) => write!(f, "building the archive failed: {err}"),
            Self::Task(err) => write!(f, "export task failed: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<ZipError> for ExportError {
    fn from(value: ZipError) -> Self {
        Self::Archive(value)
    }
}

impl From<JoinError> for ExportError {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}

pub fn entry_name(page_number: usize) -> String {
    format!("collage_page_{page_number}.jpg")
}

/// Builds the archive and hands it to `persistence`. Returns the number of exported pages.
///
/// Nothing is saved unless every page was encoded and bundled.
pub async fn export_all(
    surfaces: Vec<Arc<RgbaImage>>,
    persistence: &dyn Persistence,
    archive_name: &str,
) -> Result<usize, ExportError> {
    let page_count = surfaces.len();
    let archive = build_archive(surfaces).await?;
    log::info!("built {archive_name} with {page_count} page(s), {} bytes", archive.len());

    persistence.save(archive, archive_name).await;

    Ok(page_count)
}

pub async fn build_archive(surfaces: Vec<Arc<RgbaImage>>) -> Result<Bytes, ExportError> {
    if surfaces.is_empty() {
        return Err(ExportError::NoPages);
    }

    let tasks = surfaces
        .into_iter()
        .map(|surface| tokio::task::spawn_blocking(move || encode_jpeg(&surface)))
        .collect::<Vec<_>>();

    let mut pages = Vec::with_capacity(tasks.len());
    for (task, page) in tasks.into_iter().zip(1..) {
        pages.push(task.await?.map_err(|error| ExportError::Encode { page, error })?);
    }

    Ok(tokio::task::spawn_blocking(move || bundle(&pages)).await??)
}

pub fn encode_jpeg(surface: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let surface: RgbImage = surface.convert();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&surface)?;

    Ok(bytes)
}

/// zips the pages with fixed metadata so equal pages always give equal bytes
fn bundle(pages: &[Vec<u8>]) -> Result<Bytes, ZipError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (page, page_number) in pages.iter().zip(1..) {
        writer.start_file(entry_name(page_number), options)?;
        writer.write_all(page)?;
    }

    Ok(writer.finish()?.into_inner().into())
}

#[cfg(test)]
mod test {
    use std::io::Read;

    use image::Rgba;
    use zip::ZipArchive;

    use super::*;
    use crate::utilities::test_fixtures::MemoryPersistence;

    fn surface(color: Rgba<u8>) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(24, 32, color))
    }

    fn entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(archive)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_archive_entries() {
        let surfaces = vec![
            surface(Rgba([255, 0, 0, 255])),
            surface(Rgba([0, 255, 0, 255])),
            surface(Rgba([0, 0, 255, 255])),
        ];

        let archive = build_archive(surfaces).await.unwrap();
        let entries = entries(&archive);

        assert_eq!(
            entries.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            ["collage_page_1.jpg", "collage_page_2.jpg", "collage_page_3.jpg"]
        );

        let decoded = image::load_from_memory(&entries[2].1).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (24, 32));
        let pixel = decoded.get_pixel(12, 16);
        assert!(pixel[0] < 16 && pixel[1] < 16 && pixel[2] > 240);
    }

    #[tokio::test]
    async fn test_archive_is_reproducible() {
        let surfaces = vec![surface(Rgba([10, 20, 30, 255])), surface(Rgba([200, 100, 0, 255]))];

        let first = build_archive(surfaces.clone()).await.unwrap();
        let second = build_archive(surfaces).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_export_without_pages() {
        let persistence = MemoryPersistence::default();

        let result = export_all(Vec::new(), &persistence, ARCHIVE_NAME).await;

        assert!(matches!(result, Err(ExportError::NoPages)));
        assert!(persistence.saved().is_empty());
    }

    #[tokio::test]
    async fn test_export_hands_archive_to_persistence() {
        let persistence = MemoryPersistence::default();
        let surfaces = vec![surface(Rgba([0, 0, 0, 255])), surface(Rgba([255, 255, 255, 255]))];

        let page_count = export_all(surfaces, &persistence, "pages.zip").await.unwrap();

        assert_eq!(page_count, 2);
        let saved = persistence.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "pages.zip");
        assert_eq!(entries(&saved[0].1).len(), 2);
    }
}

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{StreamExt, stream};
use image::{ImageError, RgbaImage};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use super::geometry::CellRect;
use super::paginator::{self, Page};
use super::{Geometry, ImageRef, Mode};
use crate::utilities::image_utils;

const PAGES_IN_FLIGHT: usize = 2;

pub struct RenderOptions {
    pub decode_timeout: Duration,
    decode_permits: Arc<Semaphore>,
}

impl RenderOptions {
    pub fn new(decode_timeout: Duration, max_decodes: usize) -> Self {
        Self { decode_timeout, decode_permits: Arc::new(Semaphore::new(max_decodes.max(1))) }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Io(io::Error),
    Image(ImageError),
    Timeout(Duration),
    Task(JoinError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reading failed: {err}"),
            Self::Image(err) => write!(f, "decoding failed: {err}"),
            Self::Timeout(timeout) => write!(f, "decoding took longer than {timeout:?}"),
            Self::Task(err) => write!(f, "decoding task failed: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<io::Error> for DecodeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImageError> for DecodeError {
    fn from(value: ImageError) -> Self {
        Self::Image(value)
    }
}

impl From<JoinError> for DecodeError {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}

/// Renders every page of `images` laid out in `mode`, returning the surfaces in page order.
pub async fn render_all(
    images: &[ImageRef],
    mode: Mode,
    options: &RenderOptions,
) -> Vec<RgbaImage> {
    let geometry = &mode.geometry();

    stream::iter(paginator::paginate(images, geometry.images_per_page))
        .map(|page| async move { render_page(&page, geometry, options).await })
        .buffered(PAGES_IN_FLIGHT)
        .collect()
        .await
}

/// Draws the background, the page border and then each cell in ascending order.
///
/// All of the page's images start decoding right away, but they are drawn one by one in cell
/// order. A cell whose image can't be loaded stays blank.
pub async fn render_page(page: &Page, geometry: &Geometry, options: &RenderOptions) -> RgbaImage {
    let (width, height) = geometry.page_size();
    let mut surface = image_utils::blank_page(width, height, image_utils::WHITE);
    image_utils::stroke_border(&mut surface, geometry.border_width, image_utils::BLACK);

    let tasks = page
        .cells
        .iter()
        .map(|cell| {
            let rect = geometry.cell_rect(cell.index);
            let task = tokio::spawn(load_cell(
                cell.image.locator.clone(),
                rect,
                options.decode_timeout,
                options.decode_permits.clone(),
            ));
            (cell, rect, task)
        })
        .collect::<Vec<_>>();

    for (cell, rect, task) in tasks {
        match task.await.map_err(DecodeError::from).and_then(|result| result) {
            Ok(image) => image_utils::draw_at(&mut surface, &image, rect.x, rect.y),
            Err(err) => log::warn!(
                "leaving cell {} on page {} blank, {:?} {err}",
                cell.index + 1,
                page.index + 1,
                cell.image.display_name
            ),
        }
    }

    surface
}

/// Waiting for a permit counts towards `timeout`. The permit stays with the blocking read and
/// decode until they return, even when the timeout already gave up on them.
async fn load_cell(
    path: PathBuf,
    rect: CellRect,
    timeout: Duration,
    permits: Arc<Semaphore>,
) -> Result<RgbaImage, DecodeError> {
    let decode = async move {
        // the semaphore is never closed
        let permit = permits.acquire_owned().await;

        tokio::task::spawn_blocking(move || -> Result<RgbaImage, DecodeError> {
            let _permit = permit;
            read_and_stretch(&path, rect)
        })
        .await?
    };

    tokio::time::timeout(timeout, decode).await.map_err(|_| DecodeError::Timeout(timeout))?
}

fn read_and_stretch(path: &Path, rect: CellRect) -> Result<RgbaImage, DecodeError> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?;

    Ok(image_utils::stretch(&image, rect.width, rect.height))
}

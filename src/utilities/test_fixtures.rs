use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use image::{Rgba, RgbaImage};

use super::persistence::Persistence;
use crate::collage::ImageRef;

/// references to images that don't exist, for layout-only tests
pub fn image_refs(count: usize) -> Vec<ImageRef> {
    (0..count)
        .map(|i| ImageRef {
            locator: format!("/nonexistent/image_{i}.png").into(),
            display_name: format!("image_{i}.png"),
        })
        .collect()
}

pub fn write_png(dir: &Path, name: &str, color: Rgba<u8>) -> ImageRef {
    let locator = dir.join(name);
    RgbaImage::from_pixel(8, 8, color).save(&locator).unwrap();
    ImageRef { locator, display_name: name.into() }
}

pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> ImageRef {
    let locator = dir.join(name);
    std::fs::write(&locator, content).unwrap();
    ImageRef { locator, display_name: name.into() }
}

#[derive(Default)]
pub struct MemoryPersistence {
    saved: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryPersistence {
    pub fn saved(&self) -> Vec<(String, Bytes)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn save(&self, blob: Bytes, file_name: &str) {
        self.saved.lock().unwrap().push((file_name.into(), blob));
    }
}

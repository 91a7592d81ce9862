use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub fn blank_page(width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, background)
}

/// paints a frame `width` pixels thick along the inside of the image edges
pub fn stroke_border(image: &mut RgbaImage, width: u32, color: Rgba<u8>) {
    let (image_width, image_height) = image.dimensions();
    let right = image_width.saturating_sub(width);
    let bottom = image_height.saturating_sub(width);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if x < width || y < width || x >= right || y >= bottom {
            *pixel = color;
        }
    }
}

/// resizes to exactly `width`×`height`, ignoring the aspect ratio
pub fn stretch(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    image.resize_exact(width, height, FilterType::Triangle).into_rgba8()
}

pub fn draw_at(base: &mut RgbaImage, image: &RgbaImage, x: u32, y: u32) {
    imageops::overlay(base, image, i64::from(x), i64::from(y));
}

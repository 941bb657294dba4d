//! Decoded thumbnail store for the file-browser variant
//!
//! Entries are keyed by the catalog item's raw file name and rebuilt
//! wholesale with every catalog refresh. A failed decode is absorbed per
//! item; the chip renders label-only.

use std::collections::HashMap;

use tracing::warn;

/// Decoded RGBA8 image ready for blitting
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<String, DecodedImage>,
}

impl ThumbnailCache {
    /// Backend image key for a listed file (`foo.txt` pairs with `foo.png`)
    pub fn image_key(file: &str) -> String {
        file.replace(".txt", ".png")
    }

    /// Drop every entry; called when the catalog is replaced
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Decode an encoded image payload and store it under the item's file
    /// name. Returns false (and keeps no entry) when decoding fails.
    pub fn insert_encoded(&mut self, file: &str, bytes: &[u8]) -> bool {
        match image::load_from_memory(bytes) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                self.entries.insert(
                    file.to_string(),
                    DecodedImage {
                        width,
                        height,
                        pixels: rgba.into_raw(),
                    },
                );
                true
            }
            Err(err) => {
                warn!(file, %err, "failed to decode thumbnail");
                false
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<&DecodedImage> {
        self.entries.get(file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_key_swaps_txt_for_png() {
        assert_eq!(ThumbnailCache::image_key("portrait.txt"), "portrait.png");
        assert_eq!(ThumbnailCache::image_key("landscape.png"), "landscape.png");
        assert_eq!(ThumbnailCache::image_key("noext"), "noext");
    }

    #[test]
    fn bad_payload_is_absorbed() {
        let mut cache = ThumbnailCache::default();
        assert!(!cache.insert_encoded("broken.txt", b"not an image"));
        assert!(cache.get("broken.txt").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn decodes_a_real_png() {
        // 1x1 opaque red pixel
        let mut png = Vec::new();
        {
            use image::{ImageBuffer, Rgba};
            let img = ImageBuffer::from_pixel(1, 1, Rgba([255u8, 0, 0, 255]));
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
                .unwrap();
        }
        let mut cache = ThumbnailCache::default();
        assert!(cache.insert_encoded("red.txt", &png));
        let entry = cache.get("red.txt").unwrap();
        assert_eq!((entry.width, entry.height), (1, 1));
        assert_eq!(&entry.pixels, &[255, 0, 0, 255]);
        assert_eq!(cache.len(), 1);
    }
}

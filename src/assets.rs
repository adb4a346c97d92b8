use std::sync::Arc;

use crate::foundation::core::PixelSize;

pub mod decode;
pub mod loader;

/// Decoded frame image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Frame {
    /// Natural dimensions of the decoded image.
    pub fn size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// The page's original image once it is decode-ready.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimaryImage {
    /// Resolved source identifier the image was actually loaded from.
    pub source: String,
    /// Decoded pixels; their size is the image's natural size.
    pub frame: Frame,
}

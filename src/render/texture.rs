use gl::types::*;
use image::ImageReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Failed to open image {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Image has no pixels")]
    Empty,
}

/// RGBA8 pixels with row 0 at the bottom of the image.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub const BYTES_PER_PIXEL: u32 = 4;
}

pub fn decode_rgba_flipped<P: AsRef<Path>>(path: P) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let io_err = |source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .flipv()
        .into_rgba8();

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty);
    }

    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// An image uploaded as a 2D texture. The GPU object is deleted on drop.
pub struct TextureAsset {
    id: GLuint,
    width: u32,
    height: u32,
    bytes_per_pixel: u32,
}

impl TextureAsset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let decoded = decode_rgba_flipped(path.as_ref())?;
        log::info!(
            "Decoded {:?} ({}x{})",
            path.as_ref(),
            decoded.width,
            decoded.height
        );
        Ok(Self::upload(&decoded))
    }

    pub fn upload(image: &DecodedImage) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);

            // Rows of RGBA8 are always 4-byte aligned.
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                image.width as i32,
                image.height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as *const _,
            );

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Self {
            id,
            width: image.width,
            height: image.height,
            bytes_per_pixel: DecodedImage::BYTES_PER_PIXEL,
        }
    }

    pub fn bind(&self, slot: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + slot);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        self.bytes_per_pixel
    }
}

impl Drop for TextureAsset {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

//! Movie image storage naming and upload validation.
//!
//! Uploaded images are stored under the media root at
//! `uploads/movies/{slug}-{uuid}.{ext}` and exposed publicly under the
//! configured media URL prefix.

use image::ImageFormat;
use uuid::Uuid;

use crate::error::CoreError;

/// Directory (relative to the media root) holding movie images.
pub const MOVIE_IMAGE_DIR: &str = "uploads/movies";

/// An uploaded payload that decoded successfully as an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageKind {
    /// File extension used when storing this kind of image.
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::WebP => "webp",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::WebP => ImageFormat::WebP,
        }
    }
}

/// Check that `data` is a complete, decodable JPEG, PNG or WebP image.
///
/// The format is sniffed from the magic bytes, not the client-supplied
/// filename or content type, and the whole image is decoded so truncated
/// or corrupt files are rejected.
pub fn detect_image(data: &[u8]) -> Result<ImageKind, CoreError> {
    if data.is_empty() {
        return Err(CoreError::Validation("The submitted file is empty".into()));
    }

    let kind = match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => ImageKind::Jpeg,
        Ok(ImageFormat::Png) => ImageKind::Png,
        Ok(ImageFormat::WebP) => ImageKind::WebP,
        _ => {
            return Err(CoreError::Validation(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image"
                    .into(),
            ))
        }
    };

    image::load_from_memory_with_format(data, kind.format()).map_err(|e| {
        CoreError::Validation(format!("Upload a valid image. Decoding failed: {e}"))
    })?;

    Ok(kind)
}

/// Lowercase ASCII slug of a title: runs of non-alphanumerics become one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("movie");
    }
    slug
}

/// Relative storage path for a new image of the given movie.
pub fn movie_image_path(title: &str, kind: ImageKind) -> String {
    format!(
        "{MOVIE_IMAGE_DIR}/{}-{}.{}",
        slugify(title),
        Uuid::new_v4(),
        kind.extension()
    )
}

/// Public URL for a stored media path.
pub fn public_url(media_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        media_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

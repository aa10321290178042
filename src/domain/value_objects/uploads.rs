use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use image::ImageFormat;
use uuid::Uuid;

pub const CANONICAL_CONTENT_TYPE: &str = "image/png";

/// A file as received from a form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Browsers submit an empty part when the file input was left untouched.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An upload converted to the canonical bitmap format, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn normalize_image(upload: ImageUpload) -> Result<NormalizedImage> {
    let declared = upload.content_type.trim().to_ascii_lowercase();

    let bytes = if declared == CANONICAL_CONTENT_TYPE {
        upload.bytes
    } else {
        reencode_as_png(&upload.bytes)
            .with_context(|| format!("failed to convert {} ({declared}) to png", upload.file_name))?
    };

    Ok(NormalizedImage {
        file_name: unique_file_name(CANONICAL_CONTENT_TYPE)?,
        content_type: CANONICAL_CONTENT_TYPE.to_string(),
        bytes,
    })
}

fn reencode_as_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)?;
    let mut encoded = Cursor::new(Vec::new());
    decoded.write_to(&mut encoded, ImageFormat::Png)?;
    Ok(encoded.into_inner())
}

pub fn unique_file_name(content_type: &str) -> Result<String> {
    let extension = canonical_extension(content_type)?;
    Ok(format!("{}.{}", Uuid::new_v4(), extension))
}

fn canonical_extension(content_type: &str) -> Result<&'static str> {
    mime_guess::get_mime_extensions_str(content_type)
        .and_then(|extensions| extensions.first().copied())
        .ok_or_else(|| anyhow!("no file extension known for {content_type}"))
}

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Largest image accepted for preview. Base64 inflates it by a third, which
/// still fits under the server's entry body limit.
pub const MAX_IMAGE_BYTES: usize = 6 * 1024 * 1024;

/// In-memory preview of a picked image. Never uploaded anywhere; the data
/// URL itself travels as the entry's `imageUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub mime: String,
    pub data_url: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Selected file is empty")]
    Empty,

    #[error("Unsupported file type: {0}")]
    NotAnImage(String),

    #[error("Image is {size} bytes, the limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

pub fn preview(bytes: &[u8], mime: &str) -> Result<ImagePreview, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    let mime = mime.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(ImageError::NotAnImage(mime));
    }

    let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
    Ok(ImagePreview { mime, data_url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_builds_data_url() {
        let p = preview(b"abc", "image/PNG").unwrap();
        assert_eq!(p.mime, "image/png");
        assert_eq!(p.data_url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_preview_rejects_non_images() {
        assert_eq!(preview(b"abc", "text/plain"), Err(ImageError::NotAnImage("text/plain".into())));
        assert_eq!(preview(b"", "image/png"), Err(ImageError::Empty));
    }

    #[test]
    fn test_preview_caps_size() {
        let at_limit = vec![0u8; MAX_IMAGE_BYTES];
        assert!(preview(&at_limit, "image/jpeg").is_ok());

        let over = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert_eq!(
            preview(&over, "image/jpeg"),
            Err(ImageError::TooLarge {
                size: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES,
            })
        );
    }

    #[test]
    fn test_largest_preview_fits_entry_body_limit() {
        // base64 output length plus room for the rest of the JSON body
        let encoded = MAX_IMAGE_BYTES.div_ceil(3) * 4;
        assert!(encoded + 64 * 1024 < crate::MAX_ENTRY_BODY_BYTES);
    }
}

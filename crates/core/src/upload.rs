//! Upload destinations, filename randomization, and content policy.
//!
//! Files are written by `stay-api`; this module only decides where they go
//! and whether they are acceptable.

use crate::error::CoreError;

/// Maximum accepted avatar size (5 MiB).
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Upper bound (exclusive) for the random filename suffix.
pub const RANDOM_SUFFIX_BOUND: u64 = 1_000_000_000;

/// Content types accepted for avatars.
const AVATAR_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Which entity an uploaded file belongs to. Each kind has its own
/// sub-directory under the upload root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Promotion,
    Nomer,
    Avatar,
}

impl UploadKind {
    /// Sub-directory name under the upload root.
    pub fn dir_name(self) -> &'static str {
        match self {
            UploadKind::Promotion => "promotions",
            UploadKind::Nomer => "nomers",
            UploadKind::Avatar => "avatars",
        }
    }

    /// Check content type and size against this kind's policy.
    ///
    /// Avatars must be JPEG or PNG and at most [`MAX_AVATAR_BYTES`]; other
    /// kinds accept any `image/*` type of any size.
    pub fn check(self, content_type: Option<&str>, size: usize) -> Result<(), CoreError> {
        let mime = content_type.unwrap_or("").to_ascii_lowercase();
        match self {
            UploadKind::Avatar => {
                if !AVATAR_MIME_TYPES.contains(&mime.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Unsupported avatar type '{mime}'. Allowed: {AVATAR_MIME_TYPES:?}"
                    )));
                }
                if size > MAX_AVATAR_BYTES {
                    return Err(CoreError::Validation(format!(
                        "Avatar exceeds the maximum size of {MAX_AVATAR_BYTES} bytes"
                    )));
                }
            }
            UploadKind::Promotion | UploadKind::Nomer => {
                if !mime.starts_with("image/") {
                    return Err(CoreError::Validation(format!(
                        "Unsupported image type '{mime}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Build a collision-resistant stored filename: `{millis}-{suffix}{.ext}`.
///
/// The original extension is kept (lower-cased); the rest of the client
/// filename is discarded.
pub fn randomized_filename(original: &str, now_millis: i64, suffix: u64) -> String {
    match extension_of(original) {
        Some(ext) => format!("{now_millis}-{suffix}.{ext}"),
        None => format!("{now_millis}-{suffix}"),
    }
}

/// Lower-cased extension of the final path component, if it has one.
fn extension_of(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

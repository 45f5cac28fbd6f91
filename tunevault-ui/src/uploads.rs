//! Uploaded file validation and storage
//!
//! Extension checks are case-insensitive and run before anything touches the
//! filesystem; a rejected upload leaves no file and no database row.

use std::path::Path;
use uuid::Uuid;

/// Accepted audio file extensions (lowercase)
pub const AUDIO_FILE_TYPES: [&str; 3] = ["wav", "mp3", "ogg"];

/// Accepted artwork file extensions (lowercase)
pub const IMAGE_FILE_TYPES: [&str; 3] = ["png", "jpg", "jpeg"];

/// Lowercased extension of a filename, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether the filename carries an accepted artwork extension
pub fn is_allowed_image(filename: &str) -> bool {
    matches!(file_extension(filename), Some(ext) if IMAGE_FILE_TYPES.contains(&ext.as_str()))
}

/// Whether the filename carries an accepted audio extension
pub fn is_allowed_audio(filename: &str) -> bool {
    matches!(file_extension(filename), Some(ext) if AUDIO_FILE_TYPES.contains(&ext.as_str()))
}

/// Persist an upload into the media directory under a collision-free name.
///
/// Returns the stored filename (uuid + original extension) to record in the
/// database.
pub async fn store_upload(
    media_root: &Path,
    original_name: &str,
    data: &[u8],
) -> std::io::Result<String> {
    let stored = match file_extension(original_name) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    tokio::fs::write(media_root.join(&stored), data).await?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Cover.PNG").as_deref(), Some("png"));
        assert_eq!(file_extension("track.Mp3").as_deref(), Some("mp3"));
    }

    #[test]
    fn last_dot_wins() {
        assert_eq!(file_extension("weird.name.jpeg").as_deref(), Some("jpeg"));
    }

    #[test]
    fn missing_extension_is_none() {
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn image_types_accept_only_the_allowed_set() {
        assert!(is_allowed_image("cover.png"));
        assert!(is_allowed_image("cover.JPG"));
        assert!(is_allowed_image("cover.jpeg"));
        assert!(!is_allowed_image("cover.mp3"));
        assert!(!is_allowed_image("cover.gif"));
        assert!(!is_allowed_image("cover"));
    }

    #[test]
    fn audio_types_accept_only_the_allowed_set() {
        assert!(is_allowed_audio("track.wav"));
        assert!(is_allowed_audio("track.OGG"));
        assert!(!is_allowed_audio("track.png"));
        assert!(!is_allowed_audio("track.flac"));
    }

    #[tokio::test]
    async fn store_upload_writes_with_original_extension() {
        let tmp = tempfile::tempdir().unwrap();

        let stored = store_upload(tmp.path(), "Cover.PNG", b"fake image")
            .await
            .unwrap();

        assert!(stored.ends_with(".png"));
        let on_disk = tokio::fs::read(tmp.path().join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"fake image");
    }

    #[tokio::test]
    async fn stored_names_do_not_collide() {
        let tmp = tempfile::tempdir().unwrap();

        let a = store_upload(tmp.path(), "same.png", b"a").await.unwrap();
        let b = store_upload(tmp.path(), "same.png", b"b").await.unwrap();

        assert_ne!(a, b);
    }
}

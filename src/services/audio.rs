//! Turning uploaded audio files into button payloads.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{BoardError, BoardResult};

/// Default upper bound for uploaded files (about 15 seconds of audio).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 15_000 * 1024;

/// An audio file ready to become a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    /// `data:<mime>;base64,<payload>` URI
    pub data_uri: String,
    /// File stem, used as the button name
    pub name: String,
}

/// Encodes raw audio bytes as a data URI.
#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Reads an audio file for upload.
///
/// # Errors
///
/// Returns [`BoardError::InvalidAudio`] when the file cannot be read, its type
/// is not `audio/*`, or it exceeds `max_bytes`.
pub fn load_audio_file(path: &Path, max_bytes: u64) -> BoardResult<AudioUpload> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::AUDIO {
        return Err(BoardError::InvalidAudio(format!(
            "{} is not an audio file ({mime})",
            path.display()
        )));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        BoardError::InvalidAudio(format!("Failed to read {}: {e}", path.display()))
    })?;
    if metadata.len() > max_bytes {
        return Err(BoardError::InvalidAudio(format!(
            "{} is {} bytes, the limit is {max_bytes}",
            path.display(),
            metadata.len()
        )));
    }

    let bytes = fs::read(path).map_err(|e| {
        BoardError::InvalidAudio(format!("Failed to read {}: {e}", path.display()))
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(AudioUpload {
        data_uri: encode_data_uri(mime.essence_str(), &bytes),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(
            encode_data_uri("audio/wav", b"RIFF"),
            "data:audio/wav;base64,UklGRg=="
        );
    }

    #[test]
    fn test_load_audio_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("air horn.wav");
        fs::write(&path, b"RIFF").unwrap();

        let upload = load_audio_file(&path, DEFAULT_MAX_UPLOAD_BYTES).unwrap();

        assert_eq!(upload.name, "air horn");
        assert!(upload.data_uri.starts_with("data:audio/"));
        assert!(upload.data_uri.ends_with(";base64,UklGRg=="));
    }

    #[test]
    fn test_rejects_non_audio() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            load_audio_file(&path, DEFAULT_MAX_UPLOAD_BYTES),
            Err(BoardError::InvalidAudio(_))
        ));
    }

    #[test]
    fn test_rejects_oversized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("long.mp3");
        fs::write(&path, vec![0u8; 32]).unwrap();

        assert!(matches!(
            load_audio_file(&path, 16),
            Err(BoardError::InvalidAudio(_))
        ));
    }
}

use base64::{Engine as _, engine::general_purpose};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a text file (project JSON) and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// MIME type guessed from the file extension
fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Read an image and encode it as a `data:` URL for an image block
pub fn read_image_data_url(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        image_mime_type(path),
        general_purpose::STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_file_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "project.json", "{\"reportData\":[]}");

        let content = read_file(&path).unwrap();
        assert_eq!(content, "{\"reportData\":[]}");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = create_test_dir();
        let result = read_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("exports/2024/reporte_academico.txt");

        write_file(&path, "hola").unwrap();

        assert_eq!(read_file(&path).unwrap(), "hola");
        assert!(dir.path().join("exports/2024").is_dir());
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "out.txt", "old");

        write_file(&path, "new").unwrap();

        assert_eq!(read_file(&path).unwrap(), "new");
    }

    #[test]
    fn test_image_becomes_data_url() {
        let dir = create_test_dir();
        let path = dir.path().join("figura.PNG");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = read_image_data_url(&path).unwrap();

        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(image_mime_type(Path::new("a.xyz")), "application/octet-stream");
        assert_eq!(image_mime_type(Path::new("noext")), "application/octet-stream");
        assert_eq!(image_mime_type(Path::new("b.JPEG")), "image/jpeg");
    }
}

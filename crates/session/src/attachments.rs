use crate::SessionError;
use domain::protocol::encode_data_uri;
use std::path::Path;
use tracing::debug;

const ACCEPTED: &[&str] = &[
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
    "application/vnd.rar",
    "application/x-rar-compressed",
    "text/x-python",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

// mime_guess 给 .py 的是 text/plain，按扩展名先行覆盖
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("py", "text/x-python"),
    ("rar", "application/x-rar-compressed"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

pub fn is_accepted(mime: &str) -> bool {
    mime.starts_with("image/") || ACCEPTED.contains(&mime)
}

/// MIME type for an attachment path. Extensions the picker accepts by name
/// win over the guessed type.
pub fn mime_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if let Some((_, mime)) = ext
        .as_deref()
        .and_then(|ext| EXTENSION_TYPES.iter().find(|(e, _)| *e == ext))
    {
        return mime.to_string();
    }
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// A file read into an embedded data URI, waiting for a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub mime: String,
    pub bytes: usize,
    pub data_uri: String,
}

/// Local input state that has not been committed to the store.
#[derive(Debug, Default)]
pub struct PendingInput {
    attachment: Option<PendingAttachment>,
}

impl PendingInput {
    pub fn set(&mut self, attachment: PendingAttachment) {
        self.attachment = Some(attachment);
    }

    pub fn peek(&self) -> Option<&PendingAttachment> {
        self.attachment.as_ref()
    }

    pub fn take_data_uri(&mut self) -> Option<String> {
        self.attachment.take().map(|a| a.data_uri)
    }

    pub fn clear(&mut self) {
        self.attachment = None;
    }
}

pub async fn read_attachment(path: &Path, max_bytes: usize) -> Result<PendingAttachment, SessionError> {
    let mime = mime_for(path);
    if !is_accepted(&mime) {
        return Err(SessionError::Attachment(format!(
            "{} has unsupported type {}",
            path.display(),
            mime
        )));
    }

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes as u64 {
        return Err(SessionError::Attachment(format!(
            "{} is {} bytes (limit {})",
            path.display(),
            size,
            max_bytes
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), mime = %mime, size = bytes.len(), "attachment read");

    Ok(PendingAttachment {
        data_uri: encode_data_uri(&mime, &bytes),
        bytes: bytes.len(),
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("latent-attach-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_accepted_types() {
        assert!(is_accepted("image/tiff"));
        assert!(is_accepted("text/x-python"));
        assert!(!is_accepted("application/x-msdownload"));
    }

    #[tokio::test]
    async fn test_read_pdf_into_data_uri() {
        let path = temp_file("paper.pdf", b"%PDF-1.7");
        let a = read_attachment(&path, 1024).await.unwrap();
        assert_eq!(a.mime, "application/pdf");
        assert_eq!(a.bytes, 8);
        assert_eq!(a.data_uri, "data:application/pdf;base64,JVBERi0xLjc=");

        let mut pending = PendingInput::default();
        pending.set(a);
        assert!(pending.peek().is_some());
        assert!(pending.take_data_uri().is_some());
        assert!(pending.peek().is_none());
    }

    #[test]
    fn test_picker_extensions_resolve_to_accepted_types() {
        for name in ["gen.py", "GEN.PY", "pack.rar", "scan.tif", "scan.tiff", "deck.pptx", "notes.docx", "bundle.zip"] {
            let mime = mime_for(Path::new(name));
            assert!(is_accepted(&mime), "{} -> {}", name, mime);
        }
        assert_eq!(mime_for(Path::new("gen.py")), "text/x-python");
        assert!(!is_accepted(&mime_for(Path::new("tool.exe"))));
    }

    #[tokio::test]
    async fn test_read_python_script() {
        let path = temp_file("gen.py", b"print('hi')");
        let a = read_attachment(&path, 1024).await.unwrap();
        assert_eq!(a.mime, "text/x-python");
        assert!(a.data_uri.starts_with("data:text/x-python;base64,"));
    }

    #[tokio::test]
    async fn test_rejects_unknown_type_and_oversize() {
        let exe = temp_file("tool.exe", b"MZ");
        assert!(matches!(read_attachment(&exe, 1024).await, Err(SessionError::Attachment(_))));

        let big = temp_file("big.png", &[0u8; 64]);
        assert!(matches!(read_attachment(&big, 16).await, Err(SessionError::Attachment(_))));
    }
}

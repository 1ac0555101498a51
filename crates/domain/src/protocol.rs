//! Attachment encoding: a plain URL, or a `data:<mime>;base64,<payload>` blob
//! whose MIME prefix alone decides how it is rendered.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("data URI is missing the ',' separator")]
    MissingPayload,
    #[error("data URI has an empty MIME type")]
    MissingMime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Archive,
    Script,
    Presentation,
    Document,
    Other,
}

impl AttachmentKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") {
            AttachmentKind::Image
        } else if mime.contains("pdf") {
            AttachmentKind::Pdf
        } else if mime.contains("zip") || mime.contains("rar") || mime.contains("compressed") {
            AttachmentKind::Archive
        } else if mime.contains("python") || mime.contains("x-script") || mime.contains("text/plain")
        {
            AttachmentKind::Script
        } else if mime.contains("presentation") || mime.contains("powerpoint") {
            AttachmentKind::Presentation
        } else if mime.contains("word") || mime.contains("document") {
            AttachmentKind::Document
        } else {
            AttachmentKind::Other
        }
    }

    /// Images render inline; everything else becomes a download card.
    pub fn is_inline(self) -> bool {
        self == AttachmentKind::Image
    }

    pub fn label(self) -> &'static str {
        match self {
            AttachmentKind::Image => "Image",
            AttachmentKind::Pdf => "PDF Document",
            AttachmentKind::Archive => "Archive",
            AttachmentKind::Script => "Code/Script",
            AttachmentKind::Presentation => "Presentation",
            AttachmentKind::Document => "Document",
            AttachmentKind::Other => "File",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment<'a> {
    Url(&'a str),
    Embedded {
        mime: &'a str,
        base64: bool,
        payload: &'a str,
    },
}

impl<'a> Attachment<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, ProtocolError> {
        let Some(rest) = raw.strip_prefix("data:") else {
            return Ok(Attachment::Url(raw));
        };
        let (header, payload) = rest.split_once(',').ok_or(ProtocolError::MissingPayload)?;
        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default();
        if mime.is_empty() {
            return Err(ProtocolError::MissingMime);
        }
        let base64 = params.any(|p| p == "base64");
        Ok(Attachment::Embedded {
            mime,
            base64,
            payload,
        })
    }

    /// URLs are assumed to point at images.
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Url(_) => AttachmentKind::Image,
            Attachment::Embedded { mime, .. } => AttachmentKind::from_mime(mime),
        }
    }

    /// Subtype shown on download cards, e.g. `PDF` for `application/pdf`.
    pub fn subtype_label(&self) -> String {
        match self {
            Attachment::Url(_) => "FILE".to_string(),
            Attachment::Embedded { mime, .. } => mime
                .split_once('/')
                .map(|(_, sub)| sub)
                .filter(|s| !s.is_empty())
                .unwrap_or("FILE")
                .to_uppercase(),
        }
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_url_is_image() {
        let a = Attachment::parse("https://picsum.photos/seed/latent1/800/600").unwrap();
        assert!(matches!(a, Attachment::Url(_)));
        assert!(a.kind().is_inline());
    }

    #[test]
    fn test_dispatch_by_mime_prefix() {
        let cases = [
            ("data:image/png;base64,AAAA", AttachmentKind::Image),
            ("data:application/pdf;base64,JVBE", AttachmentKind::Pdf),
            ("data:application/x-rar-compressed;base64,UmFy", AttachmentKind::Archive),
            ("data:text/x-python;base64,cHJp", AttachmentKind::Script),
            ("data:application/vnd.ms-powerpoint;base64,AA", AttachmentKind::Presentation),
            ("data:application/msword;base64,AA", AttachmentKind::Document),
            ("data:application/octet-stream;base64,AA", AttachmentKind::Other),
        ];
        for (raw, want) in cases {
            assert_eq!(Attachment::parse(raw).unwrap().kind(), want, "{}", raw);
        }
    }

    #[test]
    fn test_malformed_data_uri() {
        assert_eq!(Attachment::parse("data:image/png;base64"), Err(ProtocolError::MissingPayload));
        assert_eq!(Attachment::parse("data:;base64,AA"), Err(ProtocolError::MissingMime));
    }

    #[test]
    fn test_encode_then_classify() {
        let uri = encode_data_uri("application/pdf", b"%PDF-1.7");
        assert_eq!(uri, "data:application/pdf;base64,JVBERi0xLjc=");
        let a = Attachment::parse(&uri).unwrap();
        assert_eq!(a.subtype_label(), "PDF");
        assert!(matches!(a, Attachment::Embedded { base64: true, .. }));
    }
}

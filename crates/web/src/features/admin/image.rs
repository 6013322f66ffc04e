use base64::{Engine as _, engine::general_purpose::STANDARD};

/// A file picked in the product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Browsers send an empty, unnamed part when no file was chosen.
    pub fn is_selected(&self) -> bool {
        self.file_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    fn mime_type(&self) -> &str {
        if let Some(content_type) = self.content_type.as_deref().filter(|t| !t.is_empty()) {
            return content_type;
        }

        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            Some("avif") => "image/avif",
            _ => "application/octet-stream",
        }
    }
}

/// Embeds the file as a `data:` URL. No size limit and no format check.
pub fn to_data_url(upload: &ImageUpload) -> Option<String> {
    if !upload.is_selected() {
        return None;
    }

    Some(format!(
        "data:{};base64,{}",
        upload.mime_type(),
        STANDARD.encode(&upload.bytes)
    ))
}

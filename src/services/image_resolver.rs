//! Display URL resolution for property images
//!
//! An uploaded file wins over an external URL; empty strings count as
//! absent. Resolution is pure string work: no validation, no I/O.

use crate::config::ApiConfig;
use crate::storage::PropertyImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    media_url: String,
    base_url: Option<String>,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new("/media/")
    }
}

impl ImageResolver {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            base_url: None,
        }
    }

    /// 按 API 配置构建（`media_url` + 可选的固定 `media_base_url`）
    pub fn from_config(api: &ApiConfig) -> Self {
        Self {
            media_url: api.media_url.clone(),
            base_url: present(api.media_base_url.as_deref()).map(str::to_string),
        }
    }

    /// 复制一份并替换 base URL（按请求推断 scheme://host 时使用）
    pub fn with_base_url(&self, base_url: Option<String>) -> Self {
        Self {
            media_url: self.media_url.clone(),
            base_url: base_url.filter(|b| !b.trim().is_empty()),
        }
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// 上传文件的 URL
    pub fn file_url(&self, image_file: &str) -> String {
        if is_absolute(image_file) {
            return image_file.to_string();
        }

        let path = format!(
            "{}/{}",
            self.media_url.trim_end_matches('/'),
            image_file.trim_start_matches('/')
        );

        match self.base_url.as_deref() {
            Some(base) if path.starts_with('/') => {
                format!("{}{}", base.trim_end_matches('/'), path)
            }
            Some(base) => format!("{}{}", base, path),
            None => path,
        }
    }

    /// 上传文件 > 外部 URL > ""
    pub fn resolve(&self, image_file: Option<&str>, image_url: Option<&str>) -> String {
        if let Some(file) = present(image_file) {
            return self.file_url(file);
        }
        if let Some(url) = present(image_url) {
            return url.to_string();
        }
        String::new()
    }

    pub fn display_url(&self, image: &PropertyImage) -> String {
        self.resolve(image.image_file.as_deref(), image.image_url.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_wins() {
        let resolver = ImageResolver::default();
        assert_eq!(
            resolver.resolve(Some("properties/a.jpg"), Some("https://cdn.example.com/x.jpg")),
            "/media/properties/a.jpg"
        );
    }

    #[test]
    fn test_external_url_when_no_file() {
        let resolver = ImageResolver::default();
        assert_eq!(
            resolver.resolve(None, Some("https://cdn.example.com/x.jpg")),
            "https://cdn.example.com/x.jpg"
        );
        assert_eq!(
            resolver.resolve(Some(""), Some("https://cdn.example.com/x.jpg")),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[test]
    fn test_nothing_resolves_to_empty() {
        let resolver = ImageResolver::default();
        assert_eq!(resolver.resolve(None, None), "");
        assert_eq!(resolver.resolve(Some(""), Some("")), "");
    }

    #[test]
    fn test_single_slash_between_media_and_file() {
        let resolver = ImageResolver::new("/media");
        assert_eq!(resolver.file_url("a.jpg"), "/media/a.jpg");
        let resolver = ImageResolver::new("/media/");
        assert_eq!(resolver.file_url("/a.jpg"), "/media/a.jpg");
    }

    #[test]
    fn test_base_url_prefix() {
        let resolver = ImageResolver::default().with_base_url(Some("http://testserver/".into()));
        assert_eq!(
            resolver.resolve(Some("properties/a.jpg"), None),
            "http://testserver/media/properties/a.jpg"
        );
        assert_eq!(
            resolver.resolve(None, Some("https://cdn.example.com/x.jpg")),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[test]
    fn test_absolute_file_reference_unchanged() {
        let resolver = ImageResolver::default().with_base_url(Some("http://testserver".into()));
        assert_eq!(
            resolver.file_url("https://bucket.example.com/a.jpg"),
            "https://bucket.example.com/a.jpg"
        );
    }

    #[test]
    fn test_from_config_ignores_blank_base() {
        let mut api = ApiConfig::default();
        api.media_base_url = Some("  ".into());
        assert!(ImageResolver::from_config(&api).base_url().is_none());

        api.media_base_url = Some("https://static.example.com".into());
        api.media_url = "/uploads/".into();
        let resolver = ImageResolver::from_config(&api);
        assert_eq!(
            resolver.file_url("p.jpg"),
            "https://static.example.com/uploads/p.jpg"
        );
    }
}

use std::{collections::HashMap, fs};

/// Where the document service lives and which paths it exposes. Endpoint
/// paths and the multipart field name vary across service revisions, so they
/// are configuration rather than constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub list_path: String,
    pub search_path: String,
    pub upload_path: String,
    pub download_path: String,
    pub upload_field: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            list_path: "/api/documents".into(),
            search_path: "/api/documents/search".into(),
            upload_path: "/api/documents/uploadFiles".into(),
            download_path: "/api/documents/download".into(),
            upload_field: "files".into(),
        }
    }
}

impl ServiceConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Loads settings from defaults, then `doc_client.toml` in the working
/// directory, then environment variables. Later sources win.
pub fn load_settings() -> ServiceConfig {
    let mut config = ServiceConfig::default();

    if let Ok(raw) = fs::read_to_string("doc_client.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_overrides(&mut config, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("DOC_SERVICE_URL") {
        config.base_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVICE_URL") {
        config.base_url = v;
    }
    if let Ok(v) = std::env::var("APP__UPLOAD_PATH") {
        config.upload_path = v;
    }
    if let Ok(v) = std::env::var("APP__UPLOAD_FIELD") {
        config.upload_field = v;
    }

    config
}

fn apply_overrides(config: &mut ServiceConfig, overrides: &HashMap<String, String>) {
    if let Some(v) = overrides.get("base_url") {
        config.base_url = v.clone();
    }
    if let Some(v) = overrides.get("list_path") {
        config.list_path = v.clone();
    }
    if let Some(v) = overrides.get("search_path") {
        config.search_path = v.clone();
    }
    if let Some(v) = overrides.get("upload_path") {
        config.upload_path = v.clone();
    }
    if let Some(v) = overrides.get("download_path") {
        config.download_path = v.clone();
    }
    if let Some(v) = overrides.get("upload_field") {
        config.upload_field = v.clone();
    }
}

use std::sync::OnceLock;

use note_core::PageConfig;

/// `<script id="note-config" type="application/json">` overrides the defaults.
const CONFIG_ELEMENT_ID: &str = "note-config";

static PAGE_CONFIG: OnceLock<PageConfig> = OnceLock::new();

/// Page configuration, read from the document on first use.
pub fn page_config() -> &'static PageConfig {
    PAGE_CONFIG.get_or_init(load_page_config)
}

fn load_page_config() -> PageConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    parse_page_config(raw.as_deref())
}

pub fn parse_page_config(raw: Option<&str>) -> PageConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return PageConfig::default();
    };

    match PageConfig::from_json(raw) {
        Ok(config) => config,
        Err(e) => {
            dioxus_logger::tracing::warn!("Ignoring page config, using defaults: {}", e);
            PageConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_block_uses_defaults() {
        assert_eq!(parse_page_config(None), PageConfig::default());
        assert_eq!(parse_page_config(Some("  \n ")), PageConfig::default());
    }

    #[test]
    fn block_overrides_fields() {
        let config = parse_page_config(Some(r#" { "banner_ms": 1200, "file_prefix": "memo" } "#));
        assert_eq!(config.banner_ms, 1200);
        assert_eq!(config.file_prefix, "memo");
        assert_eq!(config.feedback_ms, 2000);
    }

    #[test]
    fn broken_block_falls_back() {
        assert_eq!(parse_page_config(Some("{ banner_ms: ")), PageConfig::default());
    }
}

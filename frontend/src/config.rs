use shared::ClientConfig;

/// Build the client configuration from values baked in at compile time
/// (`MEUFUTURO_API_URL`, `MEUFUTURO_PAGE_SIZE`, `MEUFUTURO_LOG_LEVEL`).
pub fn load() -> ClientConfig {
    from_overrides(
        option_env!("MEUFUTURO_API_URL"),
        option_env!("MEUFUTURO_PAGE_SIZE"),
        option_env!("MEUFUTURO_LOG_LEVEL"),
    )
}

/// Apply overrides on top of the defaults; unparsable values are ignored
pub fn from_overrides(
    api_url: Option<&str>,
    page_size: Option<&str>,
    log_level: Option<&str>,
) -> ClientConfig {
    let mut config = ClientConfig::default();

    if let Some(url) = api_url {
        config.api_base_url = url.to_string();
    }
    if let Some(size) = page_size.and_then(|s| s.trim().parse::<u32>().ok()) {
        config.page_size = size;
    }
    if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
        config.log_level = level.trim().to_lowercase();
    }

    config.validated()
}

/// Configuration for tracing initialization.
///
/// JSON log output defaults on in production and off elsewhere; `LOG_FORMAT`
/// overrides either way.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let json_format = std::env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "json")
            .unwrap_or_else(|_| environment == "production");
        Self {
            environment,
            json_format,
        }
    }
}

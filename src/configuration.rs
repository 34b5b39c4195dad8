#[derive(serde::Deserialize)]
pub struct StaticConfiguration {
    pub database: DatabaseConfiguration,
    pub application_host: String,
    pub application_port: u16,
}

impl StaticConfiguration {
    pub fn address(&self) -> String {
        format!("{}:{}", self.application_host, self.application_port)
    }
}

#[derive(serde::Deserialize)]
pub struct DatabaseConfiguration {
    /// SQLite file path, or `:memory:` for a throwaway in-memory store.
    pub path: String,
}

impl DatabaseConfiguration {
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

/// Reads `configuration.yaml`, then lets `APP_`-prefixed environment
/// variables override it (`APP_DATABASE__PATH`, `APP_APPLICATION_PORT`, ...).
pub fn get_static_configuration() -> Result<StaticConfiguration, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(
            config::File::new("configuration.yaml", config::FileFormat::Yaml)
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
        )
        .build()?;

    settings.try_deserialize::<StaticConfiguration>()
}

use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, confique::Config)]
pub struct Config {
    /// Run the statement through `sqlparser` before introspecting it.
    #[config(env = "QCOLREF_VALIDATE", default = false)]
    pub validate: bool,
    /// Dialect name understood by `sqlparser::dialect::dialect_from_str`.
    #[config(env = "QCOLREF_DIALECT", default = "generic")]
    pub dialect: String,
    /// Reject unterminated quotes, brackets and sub-expressions.
    #[config(env = "QCOLREF_STRICT", default = false)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate: false,
            dialect: "generic".to_string(),
            strict: false,
        }
    }
}

/// Configuration loaded once from the current environment.
pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::builder()
        .env()
        .load()
        .map_err(|e| Error::Config(e.to_string()))?;
    debug!("Loaded configuration {loaded:?}");
    Ok(CONFIG.get_or_init(|| loaded))
}

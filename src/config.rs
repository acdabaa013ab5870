use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Credentials and model settings for the completion API, threaded explicitly
/// into whichever component issues the upstream request.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Reads `OPENAI_API_KEY` plus the optional `LENSAI_MODEL` and
    /// `LENSAI_MAX_TOKENS` overrides. A missing key is a configuration error
    /// surfaced to the caller, never a panic.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "OPENAI_API_KEY is not set; export it or add it to a .env file".to_owned(),
                )
            })?;

        let model = std::env::var("LENSAI_MODEL")
            .ok()
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let max_tokens = match std::env::var("LENSAI_MAX_TOKENS") {
            Ok(raw) => raw.parse().map_err(|_| {
                Error::Configuration(format!("LENSAI_MAX_TOKENS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key,
            model,
            max_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // One test so the env var mutations stay sequential.
    #[test]
    fn env_loading() {
        std::env::remove_var("OPENAI_API_KEY");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(Error::Configuration(_))
        ));

        std::env::set_var("OPENAI_API_KEY", "sk-test");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        std::env::remove_var("OPENAI_API_KEY");
    }
}

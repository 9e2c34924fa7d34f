use serde::Deserialize;
use secrecy::SecretString;

/// Settings for the external narrative generator used by the rich match mode.
/// Without a `service_url` the built-in template narrator is used.
#[derive(Deserialize, Debug, Clone)]
pub struct CommentarySettings {
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_model_name() -> String {
    "llama3.1:8b-instruct-q4_K_M".to_string()
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_max_retries() -> usize {
    2
}

impl Default for CommentarySettings {
    fn default() -> Self {
        Self {
            service_url: None,
            model_name: default_model_name(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

use serde::Deserialize;

/// Main configuration structure for Learn-Digest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run Chrome without a visible window
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Budget for a page to reach DOM readiness (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// Settle delay after loading a course index page (milliseconds)
    #[serde(rename = "index-settle-ms", default = "default_index_settle")]
    pub index_settle_ms: u64,

    /// Settle delay after loading a learning path page (milliseconds)
    #[serde(rename = "nested-index-settle-ms", default = "default_nested_index_settle")]
    pub nested_index_settle_ms: u64,

    /// How long a module page may take to render its heading (milliseconds)
    #[serde(rename = "heading-timeout-ms", default = "default_heading_timeout")]
    pub heading_timeout_ms: u64,

    /// Explicit Chrome/Chromium binary; auto-detected when unset
    #[serde(rename = "chrome-executable", default)]
    pub chrome_executable: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_ms: default_navigation_timeout(),
            index_settle_ms: default_index_settle(),
            nested_index_settle_ms: default_nested_index_settle(),
            heading_timeout_ms: default_heading_timeout(),
            chrome_executable: None,
        }
    }
}

/// Hosted model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name used for `generateContent`
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Local files read and written by the crawler
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Reference summary handed to the model as the target shape
    #[serde(rename = "format-example", default = "default_format_example")]
    pub format_example: String,

    /// Append-only summary log
    #[serde(rename = "summary-log", default = "default_summary_log")]
    pub summary_log: String,

    /// Raw scraped text dump written by batch runs
    #[serde(rename = "raw-output", default = "default_raw_output")]
    pub raw_output: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            format_example: default_format_example(),
            summary_log: default_summary_log(),
            raw_output: default_raw_output(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_navigation_timeout() -> u64 {
    60_000
}

fn default_index_settle() -> u64 {
    3_000
}

fn default_nested_index_settle() -> u64 {
    2_000
}

fn default_heading_timeout() -> u64 {
    8_000
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_request_timeout() -> u64 {
    120_000
}

fn default_format_example() -> String {
    "CourseStructure.txt".to_string()
}

fn default_summary_log() -> String {
    "summaries.txt".to_string()
}

fn default_raw_output() -> String {
    "output.txt".to_string()
}

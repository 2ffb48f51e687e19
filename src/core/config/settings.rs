use std::env;

/// File extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "md", "csv", "pdf", "docx"];

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenvy in `main`).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the OpenAI-compatible API.
    pub api_base_url: String,
    /// Bearer token for the API. Empty means unauthenticated.
    pub api_key: String,
    /// Model used for answer synthesis.
    pub chat_model: String,
    /// Model used for embeddings.
    pub embedding_model: String,
    /// Sampling temperature for answer synthesis.
    pub temperature: f64,

    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per query.
    pub top_k: usize,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,

    pub high_confidence_threshold: f64,
    pub medium_confidence_threshold: f64,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            api_base_url: env_string("OPENAI_BASE_URL", "https://api.openai.com"),
            api_key: env_string("OPENAI_API_KEY", ""),
            chat_model: env_string("LLM_MODEL", "gpt-3.5-turbo"),
            embedding_model: env_string("EMBEDDING_MODEL", "text-embedding-3-small"),
            temperature: env_parse("LLM_TEMPERATURE", 0.1),
            chunk_size: env_parse("CHUNK_SIZE", 1000),
            chunk_overlap: env_parse("CHUNK_OVERLAP", 200),
            top_k: env_parse("TOP_K_RESULTS", 5),
            max_file_size: env_parse("MAX_FILE_SIZE", 10 * 1024 * 1024),
            high_confidence_threshold: env_parse("HIGH_CONFIDENCE_THRESHOLD", 0.8),
            medium_confidence_threshold: env_parse("MEDIUM_CONFIDENCE_THRESHOLD", 0.6),
        }
    }

    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

impl Default for Settings {
    /// Defaults without touching the environment, used by tests.
    fn default() -> Self {
        Settings {
            api_base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            temperature: 0.1,
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            max_file_size: 10 * 1024 * 1024,
            high_confidence_threshold: 0.8,
            medium_confidence_threshold: 0.6,
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

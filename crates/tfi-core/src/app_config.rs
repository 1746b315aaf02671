#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which embedding backend the analyzer should construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    /// Remote Text Embeddings Inference server.
    Tei,
    /// Offline feature-hashing embedder.
    Hashing,
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedderKind::Tei => write!(f, "tei"),
            EmbedderKind::Hashing => write!(f, "hashing"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub embedder: EmbedderKind,
    pub tei_url: String,
    pub tei_timeout_secs: u64,
    pub tei_batch_size: usize,
    pub hashing_dimensions: usize,
}

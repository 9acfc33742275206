use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Filesystem locations owned by the service.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// SQLite file backing the vector index. Survives restarts; delete it to
    /// force a full re-embedding on the next boot.
    pub index_db_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let data_dir = discover_data_dir();
        let log_dir = data_dir.join("logs");
        let index_db_path = data_dir.join("causas.db");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            index_db_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("CHATBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("chatbot_data")
}

/// Which catalog feeds the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Compiled-in five-cause dataset.
    Fixed,
    /// Campaigns fetched from the platform backend.
    Remote,
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub gemini_base_url: String,
    pub gemini_api_key: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub catalog: CatalogKind,
    pub campaigns_url: String,
    pub request_timeout: Duration,
    pub retrieval_top_n: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let catalog = match env::var("CATALOG_SOURCE").as_deref() {
            Ok("remote") => CatalogKind::Remote,
            _ => CatalogKind::Fixed,
        };

        let timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(30);

        AppConfig {
            port: env::var("PORT")
                .ok()
                .and_then(|val| val.parse::<u16>().ok())
                .unwrap_or(5218),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-004".to_string()),
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            catalog,
            campaigns_url: env::var("CAMPAIGNS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/all-campaigns".to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            retrieval_top_n: env::var("RETRIEVAL_TOP_N")
                .ok()
                .and_then(|val| val.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(2),
        }
    }
}

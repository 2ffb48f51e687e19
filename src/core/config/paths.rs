use std::env;
use std::fs;
use std::path::PathBuf;

/// Filesystem layout for the running service.
///
/// Everything lives under a single data directory so the whole
/// knowledge base can be backed up or wiped in one move.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let data_dir = discover_data_dir();
        let log_dir = data_dir.join("logs");
        let db_path = data_dir.join("knowledge_base.db");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            db_path,
        }
    }

    /// Paths rooted at an explicit directory, used by tests.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let log_dir = data_dir.join("logs");
        let db_path = data_dir.join("knowledge_base.db");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            db_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("KB_DATA_DIR") {
        return PathBuf::from(dir);
    }

    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("data")
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

static DATA_DIR_NAME: &str = "quill";
static QUILL_DB_NAME: &str = "quill_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

/// Every listing route shares this one page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// For now this directory structure should be like
// data_dir_path
// |- quill
//    |- quill_db.sqlite
//    |- config.json

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error")]
    Io(#[from] std::io::Error),
    #[error("config parse error")]
    Parse(#[from] serde_json::Error),
    #[error("no data directory available on this platform")]
    NoDataDir,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuillConfig {
    pub(crate) database_path: PathBuf,

    /// Posts per listing page.
    ///
    /// `serde(default)` keeps backward compatibility with old config.json files.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl QuillConfig {
    /// Creates a new QuillConfig pointing at the specified data directory
    fn new(data_dir: PathBuf) -> Self {
        QuillConfig {
            database_path: data_dir.join(QUILL_DB_NAME),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Gets the existing config or initializes a new one if it doesn't exist
pub async fn get_or_init() -> Result<QuillConfig, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;

    let quill_dir = data_dir.join(DATA_DIR_NAME);
    let config_path = quill_dir.join(CONFIG_FILE_NAME);

    // Create the quill directory if it doesn't exist
    fs::create_dir_all(&quill_dir).await?;

    // Check if config file exists
    if config_path.exists() {
        // Read and deserialize existing config
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: QuillConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        // Create new config
        let config = QuillConfig::new(quill_dir.clone());

        // Serialize and write to file
        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        Ok(config)
    }
}

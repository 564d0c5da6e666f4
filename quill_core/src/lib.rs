pub mod entity;
pub mod ids;
pub mod migration;

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::CoreError;
use crate::handlers::Handlers;

pub mod service;

pub mod handlers;

pub mod pagination;

pub mod forms;

pub mod error;

pub mod config;

pub mod test_utils;

static QUILL_CORE: OnceCell<Arc<QuillCore>> = OnceCell::const_new();

pub async fn core() -> Arc<QuillCore> {
    QUILL_CORE
        .get_or_init(|| async move { Arc::new(QuillCore::start().await.expect("failed to init")) })
        .await
        .clone()
}

/// Main runtime handle for Quill.
pub struct QuillCore {
    pub config: config::QuillConfig,

    pub db: DatabaseConnection,

    /// Route handlers over the shared connection, for the HTTP collaborator
    /// to dispatch into.
    pub handlers: Handlers,
}

impl QuillCore {
    pub async fn start() -> Result<Self, CoreError> {
        let config = config::get_or_init().await?;

        // DB + migrations
        let db = open_or_create_db(&config).await?;
        migration::Migrator::up(&db, None).await?;

        info!(page_size = config.page_size, "quill core online");

        let handlers = Handlers::new(db.clone(), config.page_size);

        Ok(Self {
            config,
            db,
            handlers,
        })
    }

    pub async fn shutdown(self) -> Result<(), CoreError> {
        self.db.close().await?;
        Ok(())
    }
}

async fn open_or_create_db(config: &config::QuillConfig) -> Result<DatabaseConnection, DbErr> {
    // Use display() to convert PathBuf to string representation
    let connection_string = format!("sqlite://{}?mode=rwc", config.database_path.display());

    Database::connect(&connection_string).await
}

pub mod prelude {
    pub use super::entity;
    pub use super::ids;
    pub use super::migration;

    pub use super::handlers;
    pub use super::service;

    pub use super::forms;
    pub use super::pagination;

    pub use super::error;

    pub use super::config;
}

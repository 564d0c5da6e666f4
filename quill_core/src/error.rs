use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("fatal database error")]
    Db(#[from] sea_orm::DbErr),
}

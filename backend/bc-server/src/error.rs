use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] bc_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] bc_db::DbError),

    #[error("Transport setup failed: {0}")]
    Transport(#[from] bc_dispatch::TransportError),

    #[error("Sheet source setup failed: {0}")]
    Source(#[from] bc_dispatch::SourceError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

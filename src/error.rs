use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

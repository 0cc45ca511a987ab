use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Malformed or incomplete catalog, or a request naming something the
/// catalog does not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Catalog is empty: no records given")]
    Empty,

    #[error("Feature vectors must have at least one dimension")]
    ZeroDimension,

    #[error("Invalid vector dimension for {category}/{identifier}: expected {expected}, got {actual}")]
    DimensionMismatch {
        category: String,
        identifier: String,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite feature value for {category}/{identifier} at axis {axis}")]
    NonFiniteValue {
        category: String,
        identifier: String,
        axis: usize,
    },

    #[error("Duplicate identifier '{identifier}' in category '{category}'")]
    DuplicateIdentifier { category: String, identifier: String },

    #[error("Category not found or empty: {0}")]
    MissingCategory(String),

    #[error("Item not found: {category}/{identifier}")]
    UnknownItem { category: String, identifier: String },

    #[error("Axis names do not match vector dimension: expected {expected}, got {actual}")]
    AxisCountMismatch { expected: usize, actual: usize },
}

/// Problems with the per-request input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid profile dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Non-finite profile value at axis {axis}")]
    NonFiniteValue { axis: usize },

    #[error("Request names no categories")]
    NoCategories,

    #[error("Category requested more than once: {0}")]
    DuplicateCategory(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Search space too large: {combinations} combinations exceeds limit of {limit}")]
    SearchSpaceTooLarge { combinations: u64, limit: u64 },
}

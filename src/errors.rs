pub type Result<T> = std::result::Result<T, EobandsError>;

#[derive(thiserror::Error, Debug)]
pub enum EobandsError {
    #[error(transparent)]
    Band(#[from] crate::bands::BandError),
    #[error(transparent)]
    Resolve(#[from] crate::resolver::ResolveError),
    #[error(transparent)]
    Index(#[from] crate::indexes::IndexError),
    #[error(transparent)]
    Formula(#[from] crate::indexes::formula::FormulaError),
    #[error(transparent)]
    Registry(#[from] crate::indexes::RegistryError),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("raster shape {found:?} does not match {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("{object_desc} has no metadata entry {key:?}")]
    MetadataKeyNotFound { object_desc: String, key: String },
}

/// Error types shared across weinly crates.
///
/// These errors represent failures at the collaborator boundary (the
/// supplier catalog source; Redis failures are swallowed by `RedisCache`
/// and never surface as errors). The normalizer and the matcher themselves
/// are total functions and have no error taxonomy. Application-specific
/// errors are defined in the server crate and wrap `CommonError` via
/// `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("catalog error: {0}")]
    Catalog(String),
}

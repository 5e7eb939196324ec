use thiserror::Error;

#[derive(Error, Debug)]
pub enum HitFinderError {
    #[error("Problem fetching data from MTurk: {0}")]
    Fetch(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),
}

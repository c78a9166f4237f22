use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No countries stored")]
    NoCountries,

    #[error("No country has both a region and a GDP estimate")]
    NoGdpData,

    #[error("Failed to write chart: {0}")]
    Io(String),

    #[error("Failed to encode chart: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Io(err.to_string())
    }
}

impl From<png::EncodingError> for ChartError {
    fn from(err: png::EncodingError) -> Self {
        ChartError::Encoding(err.to_string())
    }
}

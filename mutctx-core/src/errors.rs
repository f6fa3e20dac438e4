use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Column `{0}` is mapped to an empty name")]
    EmptyColumnName(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

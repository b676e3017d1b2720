use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Startup cannot proceed without it; set the variable in the process
    /// environment or the `.env` file.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

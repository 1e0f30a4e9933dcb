/// Errors from building, parsing, or loading lookup tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("unknown axis '{0}'")]
    UnknownAxis(String),

    #[error("invalid value '{value}' for axis '{axis}'")]
    InvalidValue { axis: &'static str, value: String },

    #[error("no value given for axis '{0}'")]
    MissingAxis(&'static str),

    #[error("malformed table: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Util(#[from] eol_utils::UtilError),
}

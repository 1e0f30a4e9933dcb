pub mod error;
pub mod fs;
pub mod subprocess;

pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;

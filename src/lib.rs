#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::missing_safety_doc)]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod loader;
pub mod parser;
pub mod table;

pub use crate::error::{EnvError, EnvResult};
pub use crate::loader::{DEFAULT_ENV_FILE, EnvLoader, read_env_file, write_env_file};
pub use crate::table::{EnvTable, MemoryEnv, ProcessEnv};

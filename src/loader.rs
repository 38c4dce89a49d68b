//! Environment file loading, typed lookups, and persistence.
//!
//! [`read_env_file`] and [`write_env_file`] are the file-level primitives;
//! [`EnvLoader`] ties them to an [`EnvTable`] so loaded variables land in the
//! process environment (or an in-memory stand-in) and can be read back as
//! typed values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::{EnvError, EnvResult};
use crate::parser;
use crate::table::{EnvTable, ProcessEnv};

/// File name used by [`EnvLoader::load`] when no explicit paths are given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Reads a `.env` file into a fresh key/value snapshot.
///
/// Parsing is permissive: malformed lines are skipped, never reported. The
/// returned map is therefore either complete or the call fails outright with
/// an I/O error; it is never silently partial.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_env_file(path: impl AsRef<Path>) -> EnvResult<HashMap<String, String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| EnvError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parser::parse_str(&content))
}

/// Writes `vars` to `path` as `KEY=VALUE` lines, keys sorted.
///
/// Values that would not re-parse verbatim (whitespace, `#`, a leading
/// quote) are quoted so the written file round-trips through the parser.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_env_file(path: impl AsRef<Path>, vars: &HashMap<String, String>) -> EnvResult<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| EnvError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = std::io::BufWriter::new(file);
    dump_to_writer(&mut writer, vars, false).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Writes `vars` as sorted `KEY=VALUE` lines, optionally prefixed with
/// `export ` for shell sourcing.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn dump_to_writer<W: Write>(
    writer: &mut W,
    vars: &HashMap<String, String>,
    export: bool,
) -> std::io::Result<()> {
    let mut keys: Vec<_> = vars.keys().collect();
    keys.sort();

    let prefix = if export { "export " } else { "" };
    for key in keys {
        writeln!(writer, "{prefix}{key}={}", render_value(&vars[key]))?;
    }
    Ok(())
}

fn needs_quoting(value: &str) -> bool {
    value.contains(char::is_whitespace)
        || value.contains('#')
        || value.starts_with('\'')
        || value.starts_with('"')
}

fn render_value(value: &str) -> Cow<'_, str> {
    if !needs_quoting(value) {
        return Cow::Borrowed(value);
    }
    // Values holding a double quote switch to single quotes; a value with
    // both kinds does not round-trip.
    if value.contains('"') && !value.contains('\'') {
        Cow::Owned(format!("'{value}'"))
    } else {
        Cow::Owned(format!("\"{value}\""))
    }
}

/// Loads `.env` files into an environment table and reads typed values back.
///
/// The table defaults to the real process environment; supply a
/// [`MemoryEnv`](crate::MemoryEnv) via [`with_table`](Self::with_table) to
/// keep loads process-isolated.
///
/// # Examples
///
/// ```rust,no_run
/// use envful::EnvLoader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut loader = EnvLoader::new();
/// loader.load()?;
/// let port: u16 = loader.get_parsed("PORT")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnvLoader<T: EnvTable = ProcessEnv> {
    table: T,
}

impl EnvLoader<ProcessEnv> {
    /// Creates a loader over the process environment.
    pub fn new() -> Self {
        Self { table: ProcessEnv }
    }
}

impl<T: EnvTable> EnvLoader<T> {
    /// Creates a loader over a specific environment table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envful::{EnvLoader, MemoryEnv};
    ///
    /// let loader = EnvLoader::with_table(MemoryEnv::new());
    /// assert!(loader.table().is_empty());
    /// ```
    pub fn with_table(table: T) -> Self {
        Self { table }
    }

    /// Returns the underlying environment table.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Returns the underlying environment table mutably.
    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    /// Consumes the loader, returning its environment table.
    pub fn into_table(self) -> T {
        self.table
    }

    /// Loads the default `.env` file from the current directory into the
    /// table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the table refuses an
    /// entry.
    pub fn load(&mut self) -> EnvResult<()> {
        self.load_files([DEFAULT_ENV_FILE])
    }

    /// Loads the given files in order, later files overriding earlier ones
    /// on conflicting keys.
    ///
    /// Every file is read and merged before the table is touched, so a
    /// read failure never leaves the table partially updated. The apply
    /// loop itself is not transactional: if the table refuses an entry,
    /// earlier entries from that call stay set.
    ///
    /// # Errors
    ///
    /// Returns the first file's read error, or the table's first `set`
    /// error.
    pub fn load_files<I, P>(&mut self, paths: I) -> EnvResult<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut merged = HashMap::new();
        for path in paths {
            merged.extend(read_env_file(path)?);
        }
        self.set_vars(&merged)
    }

    /// Applies every `(key, value)` pair in `vars` to the table.
    ///
    /// # Errors
    ///
    /// Returns the table's first `set` error, aborting the remaining
    /// entries.
    pub fn set_vars(&mut self, vars: &HashMap<String, String>) -> EnvResult<()> {
        for (key, value) in vars {
            self.table.set(key, value)?;
        }
        Ok(())
    }

    /// Removes each named variable from the table.
    ///
    /// # Errors
    ///
    /// Returns the table's first `unset` error, aborting the remaining
    /// keys.
    pub fn clear<I, S>(&mut self, keys: I) -> EnvResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.table.unset(key.as_ref())?;
        }
        Ok(())
    }

    /// Gets a variable from the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set.
    pub fn get_var(&self, key: &str) -> EnvResult<String> {
        self.table.get(key).ok_or_else(|| EnvError::VarNotFound {
            key: key.to_string(),
        })
    }

    /// Gets a variable, or returns a default if it is not set.
    pub fn get_var_or(&self, key: &str, default: &str) -> String {
        self.get_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Gets a variable and parses it into `F`.
    ///
    /// This covers the usual typed reads: integers of any width, floats,
    /// bools, addresses, anything implementing [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or fails to parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envful::{EnvLoader, EnvTable, MemoryEnv};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut loader = EnvLoader::with_table(MemoryEnv::new());
    /// loader.table_mut().set("RETRIES", "3")?;
    /// let retries: u8 = loader.get_parsed("RETRIES")?;
    /// assert_eq!(retries, 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_parsed<F>(&self, key: &str) -> EnvResult<F>
    where
        F: FromStr,
        F::Err: std::fmt::Display,
    {
        let value = self.get_var(key)?;
        match value.parse() {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(EnvError::ParseFailed {
                key: key.to_string(),
                reason: err.to_string(),
                value,
            }),
        }
    }

    /// Gets and parses a variable, or returns a default if it is not set or
    /// fails to parse.
    pub fn get_parsed_or<F>(&self, key: &str, default: F) -> F
    where
        F: FromStr,
        F::Err: std::fmt::Display,
    {
        self.get_parsed(key).unwrap_or(default)
    }

    /// Returns every variable whose name starts with `prefix`.
    ///
    /// An empty prefix returns the whole table.
    pub fn vars_with_prefix(&self, prefix: &str) -> HashMap<String, String> {
        self.table
            .vars()
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect()
    }

    /// Writes the table's `prefix`-filtered variables to an env file.
    ///
    /// When nothing matches the prefix, no file is written and the call
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_to_file(&self, prefix: &str, path: impl AsRef<Path>) -> EnvResult<()> {
        let vars = self.vars_with_prefix(prefix);
        if vars.is_empty() {
            return Ok(());
        }
        write_env_file(path, &vars)
    }
}

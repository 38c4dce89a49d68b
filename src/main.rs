use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use envful::{EnvLoader, loader, read_env_file, write_env_file};

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Get a value from an environment file, or the process environment
    Get {
        /// Environment variable name
        key: String,
        /// Specific file to read from (defaults to the process environment)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Set a KEY=VALUE pair in an environment file
    Set {
        /// KEY=VALUE pair to set
        pair: String,
        /// Environment file to update
        #[arg(short, long, default_value = ".env")]
        file: PathBuf,
    },
    /// Remove a key from an environment file
    Unset {
        /// Environment variable name
        key: String,
        /// Environment file to update
        #[arg(short, long, default_value = ".env")]
        file: PathBuf,
    },
    /// List variables in an environment file
    List {
        /// Environment file to list from
        #[arg(short, long, default_value = ".env")]
        file: PathBuf,
        /// Show values as well as keys
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print an environment file as resolved KEY=VALUE lines
    Dump {
        /// Environment file to dump
        #[arg(short, long, default_value = ".env")]
        file: PathBuf,
        /// Prefix each line with 'export ' for shell sourcing
        #[arg(short, long)]
        export: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "envful", version, about = "Load, query, and persist .env files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = <Cli as clap::Parser>::parse();
    match cli.command {
        Commands::Get { key, file } => get(key, file),
        Commands::Set { pair, file } => set(pair, file),
        Commands::Unset { key, file } => unset(key, file),
        Commands::List { file, verbose } => list(file, verbose),
        Commands::Dump { file, export } => dump(file, export),
    }
}

fn get(key: String, file: Option<PathBuf>) -> Result<()> {
    let value = if let Some(path) = file {
        let vars = read_env_file(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        vars.get(&key)
            .with_context(|| format!("Key '{}' not found in {}", key, path.display()))?
            .clone()
    } else {
        EnvLoader::new()
            .get_var(&key)
            .with_context(|| format!("Key '{}' not found in the process environment", key))?
    };
    println!("{}", value);
    Ok(())
}

fn set(pair: String, file: PathBuf) -> Result<()> {
    let (key, value) = pair.split_once('=').context("Invalid KEY=VALUE format")?;
    let mut vars = if file.exists() {
        read_env_file(&file).with_context(|| format!("Failed to read {}", file.display()))?
    } else {
        Default::default()
    };
    vars.insert(key.to_string(), value.to_string());
    write_env_file(&file, &vars)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("✓ Set {} in {}", key, file.display());
    Ok(())
}

fn unset(key: String, file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let mut vars =
        read_env_file(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    if vars.remove(&key).is_none() {
        anyhow::bail!("Key '{}' not found in {}", key, file.display());
    }
    write_env_file(&file, &vars)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("✓ Removed {} from {}", key, file.display());
    Ok(())
}

fn list(file: PathBuf, verbose: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let vars =
        read_env_file(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let mut keys: Vec<_> = vars.keys().collect();
    keys.sort();
    for key in keys {
        if verbose {
            println!("{} = {}", key, vars[key]);
        } else {
            println!("{}", key);
        }
    }
    Ok(())
}

fn dump(file: PathBuf, export: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let vars =
        read_env_file(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let stdout = std::io::stdout();
    loader::dump_to_writer(&mut stdout.lock(), &vars, export).context("Failed to write output")?;
    Ok(())
}

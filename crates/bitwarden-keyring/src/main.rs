//! bw-keyring - Bitwarden vault as a keyring, from the command line
//!
//! Commands:
//! - get <SERVICE> <USERNAME>: Print the stored password
//! - set <SERVICE> <USERNAME> [PASSWORD]: Store a password (prompts if omitted)
//! - delete <SERVICE> <USERNAME>: Delete the matching item after confirmation
//! - priority: Print the backend priority, failing if bw is missing

use anyhow::{bail, Context, Result};
use bitwarden_keyring::{BitwardenBackend, Config};
use clap::{Parser, Subcommand};
use keyring_core::KeyringBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bw-keyring")]
#[command(about = "Keyring backend that keeps passwords in a Bitwarden vault")]
#[command(version)]
#[command(after_help = r#"SESSION:
    Set BW_SESSION (from `bw unlock --raw`) to skip the unlock prompt.
    Without it, bw-keyring runs `bw login` or `bw unlock` as needed.

CONFIG:
    ~/.config/bitwarden-keyring/config.toml (see --config)"#)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the password stored for a user at a service
    Get {
        /// Don't print trailing newline (useful for piping)
        #[arg(short = 'n')]
        no_newline: bool,
        /// Service name or URL
        service: String,
        /// Login username
        username: String,
    },

    /// Store a password (prompts securely if not provided)
    Set {
        /// Service name or URL
        service: String,
        /// Login username
        username: String,
        /// Password (omit for secure hidden prompt)
        password: Option<String>,
    },

    /// Delete the vault item for a service
    Delete {
        /// Service name, URL or item id
        service: String,
        /// Login username
        username: String,
    },

    /// Print this backend's priority
    Priority,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let backend = BitwardenBackend::new(&config);

    match cli.command {
        Commands::Get {
            no_newline,
            service,
            username,
        } => cmd_get(&backend, &service, &username, no_newline),
        Commands::Set {
            service,
            username,
            password,
        } => cmd_set(&backend, &service, &username, password),
        Commands::Delete { service, username } => backend.delete_password(&service, &username),
        Commands::Priority => cmd_priority(&backend),
    }
}

fn cmd_get(backend: &dyn KeyringBackend, service: &str, username: &str, no_newline: bool) -> Result<()> {
    let Some(password) = backend.get_password(service, username)? else {
        bail!("No password found for {} at {}", username, service);
    };

    if no_newline {
        print!("{}", password);
    } else {
        println!("{}", password);
    }

    Ok(())
}

fn cmd_set(
    backend: &dyn KeyringBackend,
    service: &str,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            let password = rpassword::prompt_password(format!("Password for {}: ", username))
                .context("Failed to read password")?;

            if password.is_empty() {
                bail!("Empty password not allowed");
            }

            password
        }
    };

    backend.set_password(service, username, &password)
}

fn cmd_priority(backend: &dyn KeyringBackend) -> Result<()> {
    println!("{}", backend.priority()?);
    Ok(())
}

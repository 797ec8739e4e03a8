mod error;
mod github;
mod report;
mod token;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use gallery::{AdminOps, GalleryConfig};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::github::GitHubStore;

#[derive(Parser, Debug)]
#[command(name = "panoview-admin", about = "Manage the panorama gallery's image folder on GitHub")]
struct Cli {
    #[command(flatten)]
    repo: RepoArgs,

    #[arg(long, env = "PANOVIEW_GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Override where the saved token is kept.
    #[arg(long, env = "PANOVIEW_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct RepoArgs {
    #[arg(long, env = "PANOVIEW_REPO_OWNER")]
    owner: Option<String>,

    #[arg(long, env = "PANOVIEW_REPO_NAME")]
    repo: Option<String>,

    #[arg(long, env = "PANOVIEW_IMAGE_FOLDER")]
    folder: Option<String>,

    #[arg(long, env = "PANOVIEW_API_BASE")]
    api_base: Option<String>,
}

impl RepoArgs {
    fn into_config(self) -> Result<GalleryConfig, CliError> {
        let mut config = GalleryConfig::default();
        if let Some(owner) = self.owner {
            config.repo_owner = owner;
        }
        if let Some(repo) = self.repo {
            config.repo_name = repo;
        }
        if let Some(folder) = self.folder {
            config.image_folder = folder.trim_matches('/').to_owned();
        }
        if let Some(api_base) = self.api_base {
            config.api_base = api_base;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List images in the folder, hidden ones included.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Upload a local image into the folder.
    Upload {
        file: PathBuf,
        /// Store under this name instead of the local file name.
        #[arg(long)]
        name: Option<String>,
        /// Replace an existing file with the same name.
        #[arg(long)]
        overwrite: bool,
    },
    /// Rename an image, keeping its extension and hidden marker.
    Rename { path: String, new_base: String },
    /// Hide an image from the public gallery.
    Hide { path: String },
    /// Make a hidden image public again.
    Show { path: String },
    /// Flip an image's hidden state.
    Toggle { path: String },
    /// Delete an image.
    Delete {
        path: String,
        /// Content hash from a prior listing; fetched when omitted.
        #[arg(long)]
        sha: Option<String>,
    },
    Token(TokenCommand),
}

#[derive(Args, Debug)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
enum TokenSubcommand {
    Save { token: String },
    Clear,
    Path,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Cli { repo, token, token_file, command } = Cli::parse();
    let token_path = match token_file {
        Some(path) => path,
        None => token::default_token_path()?,
    };

    match command {
        Command::Token(cmd) => run_token(cmd.command, &token_path),
        command => {
            let config = repo.into_config()?;
            let token = token::resolve(token, &token_path)?;
            run_admin(command, config, token).await
        }
    }
}

fn run_token(cmd: TokenSubcommand, path: &Path) -> Result<(), CliError> {
    match cmd {
        TokenSubcommand::Save { token } => token::save(path, &token),
        TokenSubcommand::Clear => {
            if !token::clear(path)? {
                eprintln!("no saved token");
            }
            Ok(())
        }
        TokenSubcommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_admin(command: Command, config: GalleryConfig, token: Option<String>) -> Result<(), CliError> {
    let store = GitHubStore::new(&config, token)?;
    // Listing is public; every other command writes.
    if !matches!(command, Command::List { .. }) && !store.has_token() {
        return Err(CliError::MissingToken);
    }
    let admin = AdminOps::new(store, config);
    let prefix = admin.config().hidden_prefix.clone();

    match command {
        Command::List { json } => {
            let entries = admin.list().await?;
            if json {
                print_json(&report::listing_json(&entries, &prefix))?;
            } else {
                for line in report::listing_lines(&entries, &prefix) {
                    println!("{line}");
                }
                eprintln!("{}", report::summary(&entries, &prefix));
            }
        }
        Command::Upload { file, name, overwrite } => {
            let file_name = upload_name(&file, name)?;
            let bytes = std::fs::read(&file)?;
            let sha = admin.upload(&file_name, &bytes, overwrite).await?;
            println!("{}", report::uploaded(&admin.config().folder_path(&file_name), &sha));
        }
        Command::Rename { path, new_base } => {
            println!("{}", admin.rename(&path, &new_base).await?);
        }
        Command::Hide { path } => {
            println!("{}", admin.set_hidden(&path, true).await?);
        }
        Command::Show { path } => {
            println!("{}", admin.set_hidden(&path, false).await?);
        }
        Command::Toggle { path } => {
            println!("{}", admin.toggle_hidden(&path).await?);
        }
        Command::Delete { path, sha } => {
            admin.delete(&path, sha.as_deref()).await?;
            println!("deleted {path}");
        }
        Command::Token(_) => {}
    }
    Ok(())
}

fn upload_name(file: &Path, name: Option<String>) -> Result<String, CliError> {
    if let Some(name) = name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()) {
        return Ok(name);
    }
    file.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::InvalidArgument(format!("cannot derive a file name from {}", file.display())))
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

use crate::config::toml_config::ClientConfig;
use crate::utils::error::{ReactionError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "reactions")]
#[command(about = "Like, dislike and filter a forum's post list")]
pub struct CliConfig {
    /// Forum server receiving like/dislike notifications
    #[arg(long)]
    pub server_url: Option<String>,

    /// TOML client configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON array of posts to start from
    #[arg(long, conflicts_with = "page")]
    pub posts: Option<PathBuf>,

    /// Server-rendered page to read the post list from
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Request timeout for notifications; none by default
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Do not wait for the server to acknowledge reactions
    #[arg(long)]
    pub no_wait: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Like a post and print the updated list
    Like { post_id: String },
    /// Dislike a post and print the updated list
    Dislike { post_id: String },
    /// Hide posts whose like or dislike count is not above a threshold
    Filter {
        /// all, liked or disliked
        #[arg(long)]
        mode: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<String>,
    },
    /// Print the list as loaded
    Render,
}

impl CliConfig {
    /// Loads the TOML file if one was given and applies command-line overrides.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(server_url) = &self.server_url {
            config.server.base_url = server_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.server.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.posts.is_none() && self.page.is_none() {
            return Err(ReactionError::MissingConfigError {
                field: "--posts or --page".to_string(),
            });
        }

        match &self.action {
            Action::Like { post_id } | Action::Dislike { post_id } => {
                validate_non_empty_string("post_id", post_id)
            }
            Action::Filter { .. } | Action::Render => Ok(()),
        }
    }
}

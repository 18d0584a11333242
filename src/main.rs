use anyhow::Context;
use clap::Parser;
use post_reactions::adapters::snapshot::{load_page, load_posts};
use post_reactions::core::view::{render_filter_controls, render_list};
use post_reactions::utils::logger::{self, LogFormat};
use post_reactions::utils::validation::Validate;
use post_reactions::{
    Action, CliConfig, HttpNotifier, PendingNotification, PostBoard, PostId,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);

    tracing::info!("Starting post-reactions CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let config = cli.client_config().context("failed to load client configuration")?;
    let notifier = HttpNotifier::new(&config).context("failed to create notifier")?;

    let mut board = match (&cli.posts, &cli.page) {
        (Some(path), _) => {
            let posts = load_posts(path)
                .await
                .with_context(|| format!("failed to load posts from {}", path.display()))?;
            PostBoard::new(posts, notifier)
        }
        (None, Some(path)) => {
            let items = load_page(path)
                .await
                .with_context(|| format!("failed to read page {}", path.display()))?;
            PostBoard::from_rendered(items, notifier)?
        }
        (None, None) => anyhow::bail!("no post source given"),
    };
    tracing::info!("Loaded {} posts", board.posts().len());

    match &cli.action {
        Action::Like { post_id } => {
            let pending = board.like_post(&PostId::new(post_id.as_str()))?;
            settle(pending, cli.no_wait).await;
        }
        Action::Dislike { post_id } => {
            let pending = board.dislike_post(&PostId::new(post_id.as_str()))?;
            settle(pending, cli.no_wait).await;
        }
        Action::Filter { mode, threshold } => {
            let criteria = config.filter_criteria(mode.as_deref(), threshold.as_deref());
            let visible = board.filter_posts(&criteria);
            tracing::info!("{} of {} posts visible", visible, board.posts().len());
            print!("{}", render_filter_controls(&criteria));
        }
        Action::Render => {}
    }

    print!("{}", render_list(board.posts()));
    Ok(())
}

/// The local counter is already updated; the server outcome is only reported.
async fn settle(pending: PendingNotification, no_wait: bool) {
    if no_wait {
        pending.detach();
        return;
    }

    let post_id = pending.post_id().clone();
    let reaction = pending.reaction();
    match pending.outcome().await {
        Ok(()) => tracing::info!("✅ Server recorded {} on post {}", reaction, post_id),
        Err(e) => eprintln!("⚠️ Server did not record {} on post {}: {}", reaction, post_id, e),
    }
}

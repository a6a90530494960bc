use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use veracity::app::AppContext;
use veracity::cli::{commands, Cli, CommentAction, Commands};
use veracity::config::Config;
use veracity::pagination::ListQuery;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List {
            page,
            per_page,
            filter,
        } => {
            let query =
                ListQuery::from_raw(page.as_deref(), per_page.as_deref(), filter.as_deref());
            commands::list_news(&ctx, query).await?;
        }
        Commands::Show { id } => {
            commands::show_news(&ctx, id).await?;
        }
        Commands::Comments { news_id, limit, all } => {
            commands::list_comments(&ctx, news_id, limit, all).await?;
        }
        Commands::Comment { action } => match action {
            CommentAction::Add {
                news_id,
                user,
                vote,
                text,
                attachment,
            } => {
                commands::add_comment(&ctx, news_id, &user, &vote, &text, attachment)?;
            }
            CommentAction::Remove { news_id, id } => {
                commands::remove_comment(&ctx, news_id, id)?;
            }
            CommentAction::Clear { news_id } => {
                commands::clear_comments(&ctx, news_id)?;
            }
        },
    }

    Ok(())
}

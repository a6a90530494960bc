use crate::app::{AppContext, Result, VeracityError};
use crate::domain::{fake_percent, majority_label, CommentDraft, CommentItem, NewsFilter, NewsItem, Vote};
use crate::pagination::{page_count, ListQuery};

pub async fn list_news(ctx: &AppContext, query: ListQuery) -> Result<()> {
    let (items, total) = match query.filter {
        NewsFilter::All => {
            ctx.news.fetch_news(query.page, query.per_page).await;
            if let Some(err) = ctx.news.error() {
                println!("{}", err);
                return Ok(());
            }
            (ctx.news.news().unwrap_or_default(), ctx.news.total())
        }
        // filtering happens client-side over the full cached list
        _ => {
            ctx.news.ensure_all_news().await;
            if let Some(err) = ctx.news.error() {
                println!("{}", err);
                return Ok(());
            }
            let filtered = ctx.news.filtered(query.filter);
            let total = filtered.len() as u64;
            let start = ((query.page - 1) * query.per_page) as usize;
            let page: Vec<NewsItem> = filtered
                .into_iter()
                .skip(start)
                .take(query.per_page as usize)
                .collect();
            (page, total)
        }
    };

    if items.is_empty() {
        println!("No news on this page.");
        return Ok(());
    }

    for item in &items {
        println!(
            "{:>5}  [{}]  {}  ({}, {})",
            item.id,
            item.status,
            item.topic,
            item.reporter,
            item.date_time.format("%Y-%m-%d")
        );
        println!("       {}", item.short_detail);
    }
    println!(
        "Page {} of {} ({} items)",
        query.page,
        page_count(total, query.per_page),
        total
    );

    Ok(())
}

pub async fn show_news(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.news.ensure_all_news().await;
    if let Some(err) = ctx.news.error() {
        println!("{}", err);
        return Ok(());
    }

    let item = ctx.news.find(id).ok_or(VeracityError::NewsNotFound(id))?;

    println!("{}", item.topic);
    println!("Status:   {}", item.status);
    println!("Reporter: {}", item.reporter);
    println!("Date:     {}", item.date_time.format("%Y-%m-%d %H:%M"));
    println!("Image:    {}", item.image_url);
    println!();
    println!("{}", item.full_detail);
    println!();

    // local comments count toward the displayed tallies but never touch
    // the server-sourced counters
    let delta = ctx.comments.local_vote_delta(id);
    let fake = item.fake_votes + delta.fake;
    let real = item.real_votes + delta.real;
    println!(
        "Votes: {} fake / {} real — {} ({}% fake)",
        fake,
        real,
        majority_label(fake, real),
        fake_percent(fake, real)
    );

    Ok(())
}

pub async fn list_comments(ctx: &AppContext, news_id: i64, limit: u32, all: bool) -> Result<()> {
    ctx.comments.fetch_first_page(news_id, limit).await;

    if all {
        while ctx.comments.has_more(news_id) {
            ctx.comments.fetch_next_page(news_id, limit).await;
            if ctx.comments.meta(news_id).error.is_some() {
                break;
            }
        }
    }

    let meta = ctx.comments.meta(news_id);
    if let Some(err) = meta.error {
        println!("{}", err);
        return Ok(());
    }

    let comments = ctx.comments.combined_list(news_id);
    if comments.is_empty() {
        println!("No comments for news {}.", news_id);
        return Ok(());
    }

    for comment in &comments {
        print_comment(comment);
    }
    println!(
        "Page {} of {} ({} remote comments, {} local)",
        meta.page,
        meta.pages,
        meta.total,
        ctx.comments.local_count(news_id)
    );

    Ok(())
}

fn print_comment(comment: &CommentItem) {
    let origin = if comment.is_local() { "local" } else { "" };
    let when = comment
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!(
        "{:>6} {:5} [{}] {}: {}",
        comment.id, origin, comment.vote, comment.user, comment.comment
    );
    if !when.is_empty() {
        println!("              {}", when);
    }
    for attachment in comment.attachments.iter().flatten() {
        println!("              attachment: {}", attachment);
    }
}

pub fn add_comment(
    ctx: &AppContext,
    news_id: i64,
    user: &str,
    vote: &str,
    text: &str,
    attachments: Vec<String>,
) -> Result<()> {
    let vote: Vote = vote.parse().map_err(VeracityError::Config)?;

    let mut draft = CommentDraft::new(news_id, user, vote, text);
    if !attachments.is_empty() {
        draft.attachments = Some(attachments);
    }

    let id = ctx.comments.add_local(draft);
    println!("Added local comment {} to news {}", id, news_id);
    Ok(())
}

pub fn remove_comment(ctx: &AppContext, news_id: i64, id: i64) -> Result<()> {
    ctx.comments.remove_local(news_id, id);
    println!("Removed local comment {} from news {}", id, news_id);
    Ok(())
}

pub fn clear_comments(ctx: &AppContext, news_id: Option<i64>) -> Result<()> {
    ctx.comments.clear_local(news_id);
    match news_id {
        Some(news_id) => println!("Cleared local comments for news {}", news_id),
        None => println!("Cleared all local comments"),
    }
    Ok(())
}

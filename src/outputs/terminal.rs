//! Plain-text rendering of a search session.

use crate::models::NormalizedArticle;
use crate::session::SearchSession;

/// Render the whole session: heading, optional error banner, article list.
pub fn render_session(title: &str, session: &SearchSession) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# {title}\n\nSearch: \"{}\" from {} ({})\n\n",
        session.query, session.from_date, session.selector
    ));

    if session.is_loading() {
        out.push_str("Loading...\n\n");
    }

    if let Some(error) = session.error() {
        out.push_str(&format!("Error: {error}\n\n"));
    }

    out.push_str(&render_articles(session.articles()));
    out
}

/// Render the article list, one entry per article.
pub fn render_articles(articles: &[NormalizedArticle]) -> String {
    if articles.is_empty() {
        return "No articles found.\n".to_string();
    }

    let mut out = String::new();
    for article in articles {
        out.push_str(&render_article(article));
        out.push('\n');
    }
    out
}

fn render_article(article: &NormalizedArticle) -> String {
    let mut entry = format!("* {}\n", article.title);

    let mut detail = article.description.clone().unwrap_or_default();
    if let Some(source) = &article.source {
        detail.push_str(&format!(" (Source: {source})"));
    }
    let detail = detail.trim();
    if !detail.is_empty() {
        entry.push_str(&format!("  {detail}\n"));
    }

    if let Some(url) = &article.url {
        entry.push_str(&format!("  Read more: {url}\n"));
    }
    entry
}

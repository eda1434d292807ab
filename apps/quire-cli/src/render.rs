//! Text rendering of the current screen.

use std::fmt::{self, Write};

use quire_core::Screen;
use quire_core::compose::ComposeState;
use quire_core::domain::Post;
use quire_shared::{Notice, PostSummary};

const RULE: &str = "────────────────────────────────────────";

pub fn summarize(posts: &[Post]) -> Vec<PostSummary> {
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| PostSummary {
            position: i + 1,
            id: post.id.to_string(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            date: post.date.clone(),
            reading_time: post.reading_time.clone(),
            has_cover: post.cover_image.is_some(),
        })
        .collect()
}

pub fn render_screen(screen: &Screen) -> String {
    ScreenView(screen).to_string()
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = if notice.is_error() { "!" } else { "·" };
    format!("[{marker}] {}", notice.title)
}

/// Display adapter so the screen writers can propagate `fmt::Result`.
struct ScreenView<'a>(&'a Screen);

impl fmt::Display for ScreenView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Screen::List {
                query,
                posts,
                total,
            } => write_list(f, query, posts, *total),
            Screen::Detail { post } => write_detail(f, post.as_ref()),
            Screen::Compose { form } => write_compose(f, form),
        }
    }
}

fn write_list(out: &mut impl Write, query: &str, posts: &[Post], total: usize) -> fmt::Result {
    writeln!(out, "{RULE}\nמאמרים")?;
    if !query.is_empty() {
        writeln!(out, "חיפוש: \"{query}\" ({} / {total})", posts.len())?;
    }
    writeln!(out, "{RULE}")?;

    if posts.is_empty() {
        writeln!(out, "{}", render_notice(&Notice::no_results()))?;
        return writeln!(out, "(clear) נקה חיפוש");
    }

    for summary in summarize(posts) {
        writeln!(out, "{:>2}. {}", summary.position, summary.title)?;
        writeln!(out, "    {}", summary.meta_line())?;
        if !summary.excerpt.is_empty() {
            writeln!(out, "    {}", summary.excerpt)?;
        }
    }
    Ok(())
}

fn write_detail(out: &mut impl Write, post: Option<&Post>) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    if let Some(post) = post {
        writeln!(out, "{} · {}", post.category, post.date)?;
        writeln!(out, "{}", post.title)?;
        if let Some(cover) = &post.cover_image {
            writeln!(out, "[{cover}]")?;
        }
        writeln!(out, "{}\n", post.excerpt)?;
        writeln!(out, "{}", post.content)?;
    }
    writeln!(out, "{RULE}\n(back) חזרה למאמרים")
}

fn write_compose(out: &mut impl Write, form: &ComposeState) -> fmt::Result {
    writeln!(out, "{RULE}\nכתיבת מאמר חדש\n{RULE}")?;

    if form.is_generating {
        writeln!(out, "עוזר בינה מלאכותית  מנסח טיוטה...")?;
    } else {
        writeln!(out, "עוזר בינה מלאכותית  prompt: {}", form.ai_prompt)?;
    }
    writeln!(out, "כותרת:   {}", form.title)?;
    writeln!(out, "קטגוריה: {}", form.category)?;
    writeln!(out, "תקציר:   {}", form.excerpt)?;
    writeln!(out, "תוכן:\n{}", form.content)?;
    writeln!(out, "{RULE}\n(publish) פרסם מאמר")
}

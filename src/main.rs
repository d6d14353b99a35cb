use anyhow::{Context, Result};
use std::fs;
use toplangs::github::GithubClient;
use toplangs::handler::{DEFAULT_LANGS_COUNT, DEFAULT_THEME};
use toplangs::theme::Theme;
use toplangs::{rank, svg};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let username = args
        .next()
        .context("Usage: toplangs <username> [langs_count] [theme]")?;
    let langs_count = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_LANGS_COUNT);
    let theme_name = args.next().unwrap_or_else(|| DEFAULT_THEME.to_string());

    let client = GithubClient::from_env()?;
    let totals = client.language_totals(&username).await?;

    let ranked = rank::rank(&totals, langs_count);
    let chart = svg::render(&ranked, Theme::named(&theme_name));

    fs::write("top-langs.svg", &chart.svg)?;
    println!(
        "Wrote top-langs.svg ({} languages, height {})",
        ranked.len(),
        chart.height
    );

    Ok(())
}

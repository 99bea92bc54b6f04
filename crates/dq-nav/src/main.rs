//! dq-nav - Highlight the current page in a navigation menu
//!
//! Usage: `dq-nav <file.html> <url>`. Prints the updated document.

use anyhow::{Context, bail};
use dq::Document;
use dq_nav::{NavConfig, highlight_current_page};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(url)) = (args.next(), args.next()) else {
        bail!("usage: dq-nav <file.html> <url>");
    };

    let html = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let document = Document::parse_with_url(&html, &url);
    let key = highlight_current_page(&document, &NavConfig::default())?;
    tracing::info!("Highlighted '{}' in {}", key, path);

    println!("{}", document.html());
    Ok(())
}

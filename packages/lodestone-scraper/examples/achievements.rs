//! Achievements and Free Company Search
//!
//! Streams a character's achievements, then the first results of a free
//! company search, against the live Lodestone.
//!
//! # Usage
//!
//! ```bash
//! LODESTONE_LOCALE=eu cargo run --example achievements -- 9575452 "seventh heaven"
//! ```
//!
//! Set `RUST_LOG=lodestone_scraper=debug` to watch the traversal state
//! transitions.

use anyhow::{Context, Result};
use futures::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lodestone_scraper::{FreeCompanyOptions, Lodestone, ScraperConfig};

/// How many search results to print before dropping the stream.
const SEARCH_PREVIEW: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lodestone_scraper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let character_id: u32 = args
        .next()
        .context("usage: achievements <character-id> [free-company-name]")?
        .parse()
        .context("character id must be a number")?;
    let fc_name = args.next().unwrap_or_else(|| "heaven".to_string());

    let config = ScraperConfig::from_env()?;
    let lodestone = Lodestone::with_http(config)?;

    let mut achievements = lodestone.fetch_character_achievements(character_id)?;
    let mut count = 0usize;
    while let Some(achievement) = achievements.next().await {
        let achievement = achievement?;
        count += 1;
        if count == 1 {
            println!(
                "{} achievements, {} points",
                achievement.totals.total_achievements, achievement.totals.total_achievement_points
            );
        }
        match achievement.date {
            Some(date) => println!("  #{:<6} {}", achievement.id, date.format("%Y-%m-%d")),
            None => println!("  #{:<6} (unknown date)", achievement.id),
        }
    }
    let summary = achievements.summary().await?;
    println!("{count} achievements over {} pages", summary.pages_fetched);

    let (results, pages) = lodestone.search_free_companies(&FreeCompanyOptions::new(fc_name))?;
    let preview: Vec<_> = results.take(SEARCH_PREVIEW).collect().await;
    for fc in preview {
        let fc = fc?;
        println!(
            "{:<32} {:<12} {:<8} {} members ({})",
            fc.name, fc.world, fc.dc, fc.active_members, fc.grand_company.name
        );
    }
    let page = *pages.borrow();
    println!("page {} of {}", page.current_page, page.total_pages);

    Ok(())
}

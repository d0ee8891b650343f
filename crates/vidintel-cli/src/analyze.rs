//! The `analyze` command: fetch (or load) a topic batch, run the engine,
//! and render the report.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use vidintel_core::VideoRecord;
use vidintel_engine::{analyze_topic, reorder, Analysis, AnalysisConfig, SortOrder};
use vidintel_youtube::YoutubeClient;

const TITLE_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Topic to analyze.
    #[arg(long)]
    pub topic: String,

    /// Read the raw batch from a JSON file (an array of video records)
    /// instead of fetching it live. No network access in this mode.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Presentation ordering: velocity, engagement, or trending.
    #[arg(long, default_value = "velocity")]
    pub sort: String,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Table,
    Markdown,
    Json,
}

/// Run the analyze command end to end.
///
/// # Errors
///
/// Returns an error for a blank topic, an unknown sort, a missing API key
/// in live mode, an unreadable input file, or an upstream failure.
pub async fn run(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let topic = args.topic.trim();
    if topic.is_empty() {
        anyhow::bail!("topic must be a non-empty string");
    }
    let sort = SortOrder::parse(&args.sort)
        .ok_or_else(|| anyhow::anyhow!("unknown sort '{}'; use velocity, engagement, or trending", args.sort))?;

    let batch = match &args.input {
        Some(path) => load_batch(path)?,
        None => fetch_batch(topic).await?,
    };
    tracing::info!(topic, count = batch.len(), "analyzing batch");

    let mut analysis = analyze_topic(topic, &batch, &AnalysisConfig::default())?;
    reorder(&mut analysis.report.market_data, sort);

    match args.format {
        Format::Table => render_table(&analysis),
        Format::Markdown => render_markdown(topic, &analysis),
        Format::Json => println!("{}", serde_json::to_string_pretty(&analysis.report)?),
    }

    Ok(())
}

fn load_batch(path: &PathBuf) -> anyhow::Result<Vec<VideoRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let batch: Vec<VideoRecord> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid batch file: {e}", path.display()))?;
    Ok(batch)
}

async fn fetch_batch(topic: &str) -> anyhow::Result<Vec<VideoRecord>> {
    let config = vidintel_core::load_app_config()?;
    let api_key = config
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is required for a live fetch; use --input for offline analysis"))?;

    let client = YoutubeClient::new(api_key, config.youtube_timeout_secs)?
        .with_retry_policy(config.youtube_max_retries, config.youtube_backoff_base_ms);
    let batch = client
        .fetch_topic_batch(topic, config.search_window_days, config.max_results)
        .await?;
    Ok(batch)
}

fn render_table(analysis: &Analysis) {
    let market = &analysis.report.market_data;
    if market.is_empty() {
        println!("no videos survived the relevance filter; try a broader topic");
        return;
    }

    println!(
        "{:<4}{:<w$}{:>10}{:>8}{:>7}  TAGS",
        "#",
        "TITLE",
        "VELOCITY",
        "ENG%",
        "AGE",
        w = TITLE_COLUMN_WIDTH + 2
    );
    for (i, item) in market.iter().enumerate() {
        let tags: Vec<String> = item.tags.iter().map(ToString::to_string).collect();
        println!(
            "{:<4}{:<w$}{:>10}{:>8.2}{:>6.1}d  {}",
            i + 1,
            truncate_title(&item.title, TITLE_COLUMN_WIDTH),
            item.velocity,
            item.engagement_rate,
            item.days_old,
            tags.join(", "),
            w = TITLE_COLUMN_WIDTH + 2
        );
    }

    let intel = &analysis.report.intelligence;
    println!();
    println!("top keywords: {}", intel.top_keywords.join(", "));
    match &intel.dominant_pattern {
        Some(p) => println!("dominant pattern: {} ({} matches) — e.g. {}", p.kind, p.count, p.example),
        None => println!("dominant pattern: none detected"),
    }
    println!("avg title length: {} chars", intel.avg_title_length);
}

fn render_markdown(topic: &str, analysis: &Analysis) {
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    let report = &analysis.report;

    println!("# Title Intelligence Report");
    println!();
    println!("**Generated**: {now}");
    println!("**Topic**: {topic}");
    println!("**Ranked videos**: {}", report.market_data.len());
    println!("**Batch average velocity**: {:.0} views/day", analysis.avg_velocity);
    println!();
    println!("---");
    println!();
    println!("| # | Title | Channel | Velocity | Engagement | Tags |");
    println!("|---|-------|---------|----------|------------|------|");
    for (i, item) in report.market_data.iter().enumerate() {
        let tags: Vec<String> = item.tags.iter().map(ToString::to_string).collect();
        println!(
            "| {} | {} | {} | {} | {:.2}% | {} |",
            i + 1,
            item.title,
            item.channel,
            item.velocity,
            item.engagement_rate,
            tags.join(", ")
        );
    }

    println!();
    println!("## Keywords");
    println!();
    if report.intelligence.top_keywords.is_empty() {
        println!("_none extracted_");
    } else {
        for keyword in &report.intelligence.top_keywords {
            println!("- {keyword}");
        }
    }

    println!();
    println!("## Title structures");
    println!();
    println!("| Archetype | Matches | Best example |");
    println!("|-----------|---------|--------------|");
    for tally in &analysis.archetypes {
        println!(
            "| {} | {} | {} |",
            tally.kind,
            tally.match_count,
            tally.best_example_title.as_deref().unwrap_or("—")
        );
    }
    println!();
    match &report.intelligence.dominant_pattern {
        Some(p) => println!("**Winning pattern**: {} ({} matches)", p.kind, p.count),
        None => println!("**Winning pattern**: none detected"),
    }
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    let count = title.chars().count();
    if count <= max_chars {
        return title.to_string();
    }
    let cut: String = title.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}

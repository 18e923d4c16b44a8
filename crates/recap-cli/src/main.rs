use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing_subscriber::EnvFilter;

use recap_core::{
    AdapterRegistry, HttpTransport, ProcessOptions, ProcessedTranscript, ProviderKey, Settings,
    SummaryResult, SummaryService, SummaryStyle, format_timestamp, parse_transcript,
    process_transcript,
};

mod cache;
mod render;

/// CLI wrapper for ProviderKey (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliProvider {
    Openai,
    Anthropic,
    Gemini,
}

impl From<CliProvider> for ProviderKey {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Openai => ProviderKey::OpenAi,
            CliProvider::Anthropic => ProviderKey::Anthropic,
            CliProvider::Gemini => ProviderKey::Gemini,
        }
    }
}

/// CLI wrapper for SummaryStyle (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliStyle {
    #[default]
    Bullets,
    Narrative,
    Technical,
}

impl From<CliStyle> for SummaryStyle {
    fn from(cli: CliStyle) -> Self {
        match cli {
            CliStyle::Bullets => SummaryStyle::Bullets,
            CliStyle::Narrative => SummaryStyle::Narrative,
            CliStyle::Technical => SummaryStyle::Technical,
        }
    }
}

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Clean up video caption files and summarize them with AI providers")]
struct Cli {
    /// Path to the caption file (SRT block format)
    captions: PathBuf,

    /// Summary style
    #[arg(short, long, default_value = "bullets")]
    style: CliStyle,

    /// Provider to use; omit to fan out to every registered provider
    #[arg(short, long)]
    provider: Option<CliProvider>,

    /// Canonical video URL, cited in bullet summaries
    #[arg(short, long)]
    url: Option<String>,

    /// Custom prompt template file (overrides the built-in style template)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Keep repeated phrases (skip deduplication)
    #[arg(long)]
    no_dedup: bool,

    /// Skip speaker attribution
    #[arg(long)]
    no_speakers: bool,

    /// Force re-processing even if cached results exist
    #[arg(short, long)]
    force: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let summary_style: SummaryStyle = cli.style.into();

    let document = fs::read_to_string(&cli.captions)
        .await
        .with_context(|| format!("reading caption file {}", cli.captions.display()))?;

    let cache_dir = cache::get_cache_dir(&document);
    fs::create_dir_all(&cache_dir).await?;

    println!(
        "\n{}  {}\n",
        style("recap").cyan().bold(),
        style("Caption Summarizer").dim()
    );

    // Step 1: Parse and process the transcript (check cache)
    let transcript_path = cache::get_transcript_path(&cache_dir);
    let transcript: ProcessedTranscript = if !cli.force && transcript_path.exists() {
        let json = fs::read_to_string(&transcript_path).await?;
        let transcript = serde_json::from_str(&json)?;
        println!(
            "{} Transcript processed {}",
            style("✓").green().bold(),
            style("(cached)").dim()
        );
        transcript
    } else {
        let spinner = create_spinner("Processing captions...");
        let segments = parse_transcript(&document);
        let options = ProcessOptions {
            deduplication: !cli.no_dedup,
            speaker_detection: !cli.no_speakers,
            normalize_text: true,
        };
        let transcript = process_transcript(segments, &options);
        fs::write(&transcript_path, serde_json::to_string_pretty(&transcript)?).await?;
        spinner.finish_with_message(format!(
            "{} Transcript processed: {} segments, {} words, {}",
            style("✓").green().bold(),
            transcript.segments.len(),
            transcript.word_count,
            style(format_timestamp(transcript.total_duration)).yellow()
        ));
        transcript
    };

    if transcript.segments.is_empty() {
        anyhow::bail!("no usable captions found in {}", cli.captions.display());
    }

    // Step 2: Generate summaries (check cache per provider and style)
    let template = match &cli.template {
        Some(path) => Some(
            fs::read_to_string(path)
                .await
                .with_context(|| format!("reading template {}", path.display()))?,
        ),
        None => None,
    };

    let registry = Arc::new(AdapterRegistry::with_defaults());
    let requested: Vec<ProviderKey> = match cli.provider {
        Some(provider) => vec![provider.into()],
        None => registry.providers(),
    };

    // A custom template bypasses the summary cache entirely.
    let use_cache = !cli.force && template.is_none();
    let mut cached = Vec::new();
    let mut to_run = Vec::new();
    for &provider in &requested {
        let path = cache::get_summary_path(&cache_dir, provider, summary_style);
        if use_cache && path.exists() {
            let json = fs::read_to_string(&path).await?;
            cached.push(serde_json::from_str::<SummaryResult>(&json)?);
        } else {
            to_run.push(provider);
        }
    }
    if !cached.is_empty() {
        println!(
            "{} Loaded {} summaries {}",
            style("✓").green().bold(),
            cached.len(),
            style("(cached)").dim()
        );
    }

    let mut fresh = Vec::new();
    if !to_run.is_empty() {
        let settings = Arc::new(Settings::from_env());
        let transport = Arc::new(HttpTransport::new()?);
        let service = SummaryService::new(transport, Arc::clone(&registry), settings);

        let names = to_run.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ");
        let spinner = create_spinner(&format!(
            "Generating {summary_style} summaries with {names}..."
        ));
        fresh = service
            .generate_summaries(
                &to_run,
                template.as_deref(),
                &transcript,
                summary_style,
                cli.url.as_deref(),
            )
            .await;
        spinner.finish_with_message(format!(
            "{} Summaries generated",
            style("✓").green().bold()
        ));

        if template.is_none() {
            for result in fresh.iter().filter(|r| r.success) {
                let path = cache::get_summary_path(&cache_dir, result.provider, summary_style);
                fs::write(&path, serde_json::to_string_pretty(result)?).await?;
            }
        }
    }

    // Render in the order providers were requested
    let mut results = Vec::new();
    for &provider in &requested {
        if let Some(result) = cached
            .iter()
            .chain(fresh.iter())
            .find(|r| r.provider == provider)
        {
            results.push(result.clone());
        }
    }
    println!();
    render::print_results(&results);

    Ok(())
}

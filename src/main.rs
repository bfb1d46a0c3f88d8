use anyhow::Context;
use clap::Parser;
use lookalike_core::{RankingConfig, RankingEngine, DEFAULT_TOP_K};
use lookalike_ingest::{collect_entities, EmbeddingConfig, PrecomputedEmbeddings, DEFAULT_INPUT_ROOT};
use lookalike_storage::{QueryService, ResultStore, DEFAULT_ARTIFACT};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Rank profile faces by how much they look alike
#[derive(Parser, Debug)]
#[command(name = "lookalike")]
#[command(about = "Rank profile faces by lookalike similarity", long_about = None)]
struct Args {
    /// Names to look up in the saved results; without names, rank everything
    names: Vec<String>,

    /// Root of the per-group profile folders
    #[arg(long, default_value = DEFAULT_INPUT_ROOT)]
    input_root: PathBuf,

    /// Where ranking results are saved and read from
    #[arg(short, long, default_value = DEFAULT_ARTIFACT)]
    output: PathBuf,

    /// Embedding source location
    #[arg(long, default_value = "models/embeddings.json")]
    embeddings: PathBuf,

    /// Image size (height, width) in pixels
    #[arg(long, default_value_t = 160)]
    image_size: u32,

    /// Margin for the crop around the bounding box (height, width) in pixels
    #[arg(long, default_value_t = 44)]
    margin: u32,

    /// Upper bound on the amount of GPU memory used by the process
    #[arg(long, default_value_t = 1.0)]
    gpu_memory_fraction: f32,

    /// Matches kept per entity
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    lookalike::logging::init(&args.log_level)?;

    let store = ResultStore::new(&args.output);
    if !args.names.is_empty() {
        return show(&store, &args.names);
    }
    rank(&args, &store)
}

fn show(store: &ResultStore, names: &[String]) -> anyhow::Result<()> {
    let service = QueryService::open(store)
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    service.render(names, &mut out)?;
    out.flush()?;
    Ok(())
}

fn rank(args: &Args, store: &ResultStore) -> anyhow::Result<()> {
    let embedding_config = EmbeddingConfig {
        source: args.embeddings.clone(),
        image_size: args.image_size,
        margin: args.margin,
        gpu_memory_fraction: args.gpu_memory_fraction,
    };
    let engine = RankingEngine::new(RankingConfig { top_k: args.top_k })?;

    let provider = PrecomputedEmbeddings::open(&embedding_config, &args.input_root)
        .with_context(|| format!("failed to open embeddings {}", args.embeddings.display()))?;
    let entities = collect_entities(&args.input_root, &provider)
        .with_context(|| format!("failed to read profiles under {}", args.input_root.display()))?;
    info!("{} entities with embeddings", entities.len());

    let ranking = engine.rank(&entities)?;
    store
        .persist(&ranking.records)
        .with_context(|| format!("failed to save {}", store.path().display()))?;

    println!("min_dist {}", ranking.global_min_distance);
    Ok(())
}

//! centromask CLI — refine centroid pre-masks into region masks.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use centromask::{
    refine_mask, run_sweep, FeatureConfig, ForegroundPolicy, RefineConfig, SweepConfig,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "centromask")]
#[command(about = "Expand centroid-only mask annotations into clustered region masks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refine a single image / pre-mask pair.
    Refine(CliRefineArgs),

    /// Sweep (eps, min_samples) combinations over a whole dataset tree.
    Sweep(CliSweepArgs),
}

#[derive(Debug, Clone, Args)]
struct CliFeatureArgs {
    /// Threshold position within each window's intensity range, in [0, 1].
    #[arg(long, default_value = "0.5")]
    foreground_frac: f32,

    /// Select foreground from the pre-mask's nonzero pixels instead of the
    /// window intensity range.
    #[arg(long)]
    premask_foreground: bool,

    /// Scale of the intensity axis in the clustering distance (0 = spatial
    /// clustering only).
    #[arg(long, default_value = "0.0")]
    weight_scale: f32,
}

impl CliFeatureArgs {
    fn to_config(&self) -> FeatureConfig {
        let policy = if self.premask_foreground {
            ForegroundPolicy::PreMask
        } else {
            ForegroundPolicy::IntensityRange {
                frac: self.foreground_frac,
            }
        };
        FeatureConfig {
            policy,
            weight_scale: self.weight_scale,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct CliRefineArgs {
    /// Path to the intensity image.
    #[arg(long)]
    image: PathBuf,

    /// Path to the centroid pre-mask.
    #[arg(long)]
    mask: PathBuf,

    /// Path to write the refined mask.
    #[arg(long)]
    out: PathBuf,

    /// DBSCAN neighborhood radius.
    #[arg(long, default_value = "1.5")]
    eps: f32,

    /// DBSCAN minimum neighborhood size for core points.
    #[arg(long, default_value = "3")]
    min_samples: usize,

    /// Analysis window half-width around each centroid (pixels).
    #[arg(long, default_value = "10")]
    window_radius: u32,

    /// Paint radius around each centroid (pixels).
    #[arg(long, default_value = "4")]
    core_radius: u32,

    #[command(flatten)]
    features: CliFeatureArgs,
}

#[derive(Debug, Clone, Args)]
struct CliSweepArgs {
    /// Dataset root containing img/ and mask-pre/ trees.
    #[arg(long)]
    base_dir: PathBuf,

    /// DBSCAN eps value; repeat the flag to sweep several.
    #[arg(long = "eps", default_values_t = [1.5])]
    eps_values: Vec<f32>,

    /// DBSCAN min_samples value; repeat the flag to sweep several.
    #[arg(long = "min-samples", default_values_t = [3])]
    min_samples_values: Vec<usize>,

    /// Analysis window half-width around each centroid (pixels).
    #[arg(long, default_value = "10")]
    window_radius: u32,

    /// Paint radius around each centroid (pixels).
    #[arg(long, default_value = "4")]
    core_radius: u32,

    /// Path to write the end-of-run report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    features: CliFeatureArgs,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Refine(args) => run_refine(&args),
        Commands::Sweep(args) => run_sweep_cmd(&args),
    }
}

// ── refine ─────────────────────────────────────────────────────────────

fn run_refine(args: &CliRefineArgs) -> CliResult<()> {
    let config = RefineConfig {
        eps: args.eps,
        min_samples: args.min_samples,
        window_radius: args.window_radius,
        core_radius: args.core_radius,
        features: args.features.to_config(),
    };
    config.validate()?;

    tracing::info!("Loading image: {}", args.image.display());
    let image = image::open(&args.image)
        .map_err(|e| -> CliError {
            format!("Failed to open image {}: {}", args.image.display(), e).into()
        })?
        .to_luma8();
    let premask = image::open(&args.mask)
        .map_err(|e| -> CliError {
            format!("Failed to open mask {}: {}", args.mask.display(), e).into()
        })?
        .to_luma8();
    let (w, h) = image.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let outcome = refine_mask(&image, &premask, &config)?;
    tracing::info!(
        "Refined {} centroids ({} painted regions{})",
        outcome.n_centroids,
        outcome.n_painted_regions,
        if outcome.used_fallback {
            ", pre-mask fallback"
        } else {
            ""
        },
    );

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    outcome.mask.save(&args.out)?;
    tracing::info!("Refined mask written to {}", args.out.display());

    Ok(())
}

// ── sweep ──────────────────────────────────────────────────────────────

fn run_sweep_cmd(args: &CliSweepArgs) -> CliResult<()> {
    let config = SweepConfig {
        base_dir: args.base_dir.clone(),
        eps_values: args.eps_values.clone(),
        min_samples_values: args.min_samples_values.clone(),
        window_radius: args.window_radius,
        core_radius: args.core_radius,
        features: args.features.to_config(),
    };

    let report = run_sweep(&config)?;

    println!("sweep finished: {} samples", report.n_samples);
    for cfg in &report.configs {
        println!(
            "  eps={} min_samples={}: processed {}, skipped {}, fallback {}",
            cfg.eps, cfg.min_samples, cfg.processed, cfg.skipped, cfg.fallback
        );
        for failure in &cfg.failures {
            println!("    failed {}: {}", failure.image.display(), failure.reason);
        }
    }

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, &json)?;
        tracing::info!("Report written to {}", report_path.display());
    }

    Ok(())
}

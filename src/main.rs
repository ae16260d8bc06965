use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rti_compress::logger;
use rti_compress::rti_pipeline::experiment::{
    write_table, ExternalToolMeter, NodeRenderer, DEFAULT_GRID,
};
use rti_compress::rti_pipeline::{
    ChromaRounding, CodecConfig, ExperimentConfig, ExperimentRunner, JpegPlaneCodec, LightDirection,
    RtiContainerPipeline, RtiShape, SweepPoint, TransformMode,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "rti-compress")]
#[command(author, version, about = "Lossy compression of RTI coefficient files")]
#[command(long_about = "
Compresses RTI (HSH) coefficient files into JPEG-based containers and back,
and sweeps codec settings to measure reconstruction quality.

Examples:
  rti-compress compress vase.rti vase.crti --alpha 60 --beta 30
  rti-compress decompress vase.crti vase-comp.rti --alpha 60 --beta 30
  rti-compress roundtrip vase.rti vase-comp.rti --mode direct --quality 75
  rti-compress sweep vase.rti --method ycc --work-dir out > results.csv
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an RTI file into a container
    #[command(visible_alias = "c")]
    Compress(FileArgs),

    /// Reconstruct an RTI file from a container
    #[command(visible_alias = "d")]
    Decompress(FileArgs),

    /// Compress and decompress in one go, keeping the container
    Roundtrip(RoundtripArgs),

    /// Run a quality sweep and print the result table
    Sweep(SweepArgs),
}

#[derive(Args)]
struct CodecArgs {
    /// Image width
    #[arg(long, default_value = "320")]
    width: usize,

    /// Image height
    #[arg(long, default_value = "470")]
    height: usize,

    /// Channels per pixel
    #[arg(long, default_value = "3")]
    channels: usize,

    /// Number of coefficient planes
    #[arg(long, default_value = "9")]
    planes: usize,

    /// Plane preparation: direct or chroma-shared
    #[arg(short, long, default_value = "chroma-shared")]
    mode: TransformMode,

    /// Quality for every segment (overrides --alpha and --beta)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Quality of RGB or luma segments
    #[arg(long, default_value = "30")]
    alpha: u8,

    /// Quality of the shared chroma segments
    #[arg(long, default_value = "30")]
    beta: u8,

    /// Chroma averaging rounding: truncate or round
    #[arg(long, default_value = "truncate")]
    rounding: ChromaRounding,

    /// Encode and decode segments one at a time
    #[arg(long)]
    sequential: bool,
}

impl CodecArgs {
    fn to_config(&self) -> CodecConfig {
        let (alpha, beta) = match self.quality {
            Some(q) => (q, q),
            None => (self.alpha, self.beta),
        };
        CodecConfig::builder()
            .shape(RtiShape::new(self.width, self.height, self.channels, self.planes))
            .mode(self.mode)
            .primary_quality(alpha)
            .chroma_quality(beta)
            .chroma_rounding(self.rounding)
            .parallel(!self.sequential)
            .build()
    }
}

#[derive(Args)]
struct FileArgs {
    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    #[command(flatten)]
    codec: CodecArgs,
}

#[derive(Args)]
struct RoundtripArgs {
    /// Input RTI file
    input: PathBuf,

    /// Reconstructed RTI file
    output: PathBuf,

    /// Container path (defaults to the output with a .crti extension)
    #[arg(long)]
    container: Option<PathBuf>,

    #[command(flatten)]
    codec: CodecArgs,
}

#[derive(Args)]
struct SweepArgs {
    /// RTI dataset to sweep over
    dataset: PathBuf,

    /// Sweep kind: jpeg (quality list) or ycc (alpha x beta grid)
    #[arg(long, default_value = "jpeg")]
    method: TransformMode,

    /// Qualities of a jpeg sweep
    #[arg(long, value_delimiter = ',', default_value = "1,2,3,4")]
    qualities: Vec<u8>,

    /// Luma qualities of a ycc sweep
    #[arg(long, value_delimiter = ',')]
    alphas: Vec<u8>,

    /// Chroma qualities of a ycc sweep
    #[arg(long, value_delimiter = ',')]
    betas: Vec<u8>,

    /// Directory for containers, reconstructions and renderings
    #[arg(long, default_value = "out")]
    work_dir: PathBuf,

    /// Light x coordinate
    #[arg(long, default_value = "50.0")]
    lx: f64,

    /// Light y coordinate
    #[arg(long, default_value = "50.0")]
    ly: f64,

    /// Chroma averaging rounding: truncate or round
    #[arg(long, default_value = "truncate")]
    rounding: ChromaRounding,

    /// node executable
    #[arg(long, default_value = "node")]
    node: PathBuf,

    /// Relighting script run under node
    #[arg(long, default_value = "render.js")]
    render_script: PathBuf,

    /// dssim executable
    #[arg(long, default_value = "dssim")]
    dssim: PathBuf,

    /// ImageMagick compare executable
    #[arg(long, default_value = "compare")]
    compare: PathBuf,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn run_compress(args: FileArgs) -> Result<()> {
    let pipeline = RtiContainerPipeline::new(args.codec.to_config());
    pipeline
        .compress_file(&args.input, &args.output)
        .with_context(|| format!("Failed to compress {}", args.input.display()))
}

fn run_decompress(args: FileArgs) -> Result<()> {
    let pipeline = RtiContainerPipeline::new(args.codec.to_config());
    pipeline
        .decompress_file(&args.input, &args.output)
        .with_context(|| format!("Failed to decompress {}", args.input.display()))
}

fn run_roundtrip(args: RoundtripArgs) -> Result<()> {
    let container = args.container.unwrap_or_else(|| args.output.with_extension("crti"));
    let pipeline = RtiContainerPipeline::new(args.codec.to_config());

    pipeline
        .compress_file(&args.input, &container)
        .with_context(|| format!("Failed to compress {}", args.input.display()))?;
    pipeline
        .decompress_file(&container, &args.output)
        .with_context(|| format!("Failed to decompress {}", container.display()))?;

    let original = std::fs::metadata(&args.input)?.len();
    let compressed = std::fs::metadata(&container)?.len();
    info!(
        original,
        compressed,
        ratio = original as f64 / compressed.max(1) as f64,
        "Round trip complete"
    );
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let points = match args.method {
        TransformMode::Direct => SweepPoint::jpeg_quality_sweep(args.qualities.iter().copied()),
        TransformMode::ChromaShared => {
            let alphas = if args.alphas.is_empty() { DEFAULT_GRID.to_vec() } else { args.alphas.clone() };
            let betas = if args.betas.is_empty() { DEFAULT_GRID.to_vec() } else { args.betas.clone() };
            SweepPoint::alpha_beta_grid(&alphas, &betas)
        }
    };
    if points.is_empty() {
        bail!("Sweep has no points");
    }

    let codec = CodecConfig::builder().chroma_rounding(args.rounding).build();
    let config = ExperimentConfig::builder(&args.dataset)
        .work_dir(&args.work_dir)
        .light(LightDirection { x: args.lx, y: args.ly })
        .codec(codec)
        .build();
    let mut runner = ExperimentRunner::with_custom(
        config,
        NodeRenderer::new(&args.node, &args.render_script),
        ExternalToolMeter::new(&args.dssim, &args.compare),
        JpegPlaneCodec,
    );

    let results = runner
        .run_sweep(&points)
        .with_context(|| format!("Sweep over {} failed", args.dataset.display()))?;

    match &args.report {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(&results, &mut file)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_table(&results, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Compress(args) => run_compress(args),
        Commands::Decompress(args) => run_decompress(args),
        Commands::Roundtrip(args) => run_roundtrip(args),
        Commands::Sweep(args) => run_sweep(args),
    }
}

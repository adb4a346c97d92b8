use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scrollseq::{
    FrameIndex, FrameLoader, FsFrameSource, Geometry, HeadlessHost, LoadReport, LoaderOpts, Player,
    PlayerConfig, PlayerState, intersects, resolve_sequence, scroll_progress, select_frame,
};

#[derive(Parser, Debug)]
#[command(name = "scrollseq", version)]
struct Cli {
    /// Show debug-level engine logs.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame identifiers derived from one source identifier.
    Resolve(ResolveArgs),
    /// Run a player headlessly and write the frame shown at a scroll position as a PNG.
    Frame(FrameArgs),
    /// Print the progress and frame index while an element scrolls through the viewport.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Source identifier of any frame in the sequence.
    #[arg(long)]
    source: String,

    /// Number of frames in the sequence.
    #[arg(long)]
    frames: usize,

    /// Print a JSON array instead of one identifier per line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Path of the image the player replaces.
    #[arg(long)]
    source: String,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's frame count.
    #[arg(long)]
    frames: Option<usize>,

    /// Viewport height.
    #[arg(long)]
    viewport: f64,

    /// Element top, relative to the viewport.
    #[arg(long, allow_hyphen_values = true)]
    top: f64,

    /// Element bottom, relative to the viewport.
    #[arg(long, allow_hyphen_values = true)]
    bottom: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override loader worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Enable the player's event log.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Print the player state and load report as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's frame count.
    #[arg(long)]
    frames: Option<usize>,

    /// Viewport height.
    #[arg(long)]
    viewport: f64,

    /// Element height.
    #[arg(long)]
    height: f64,

    /// Scroll distance between rows.
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Print JSON rows instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(serde::Serialize)]
struct FrameSummary<'a> {
    state: PlayerState,
    frame: Option<FrameIndex>,
    report: &'a LoadReport,
}

const MAX_SWEEP_ROWS: usize = 100_000;

#[derive(serde::Serialize)]
struct SweepRow {
    top: f64,
    progress: f64,
    frame: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn load_config(path: Option<&PathBuf>, frames: Option<usize>) -> anyhow::Result<PlayerConfig> {
    let mut config = match path {
        Some(p) => PlayerConfig::from_path(p)?,
        None => PlayerConfig::default(),
    };
    if let Some(n) = frames {
        config.frame_count = n;
    }
    Ok(config)
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let ids = resolve_sequence(&args.source, args.frames)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&ids)?);
    } else {
        for id in ids {
            println!("{id}");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref(), args.frames)?;
    config.debug |= args.debug;

    let source = FsFrameSource::new(".");
    let loader = FrameLoader::new(LoaderOpts {
        threads: args.threads,
    })?;
    let mut host = HeadlessHost::new();
    let mut player = Player::new(config)?;

    let primary = match source.decode_primary(&args.source) {
        Ok(p) => p,
        Err(e) => return Err(player.primary_failed(&format!("{e:#}")).into()),
    };

    let geometry = Geometry::vertical(args.top, args.bottom, args.viewport);
    let report = player.setup(primary, &loader, &source, Some(geometry), &mut host)?;
    player.on_intersection(intersects(&geometry), &mut host);
    player.on_scroll(Some(geometry), &mut host);
    while host.take_refresh() {
        player.on_refresh(&mut host);
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    host.surface().save_png(&args.out)?;

    let current = player.animation().current_frame();
    if args.json {
        let summary = FrameSummary {
            state: player.state(),
            frame: current,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let shown = current.map_or_else(|| "primary".to_string(), |f| f.to_string());
    eprintln!(
        "frame {shown} ({} of {} acquired, {} failed) -> {}",
        report.loaded,
        report.requested,
        report.failed.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be a positive number");
    }
    if !(args.viewport.is_finite() && args.height.is_finite()) {
        anyhow::bail!("--viewport and --height must be finite");
    }
    let config = load_config(args.config.as_ref(), args.frames)?;

    let steps = ((args.viewport + args.height) / args.step).floor();
    if !steps.is_finite() || steps > MAX_SWEEP_ROWS as f64 {
        anyhow::bail!(
            "sweep would produce more than {MAX_SWEEP_ROWS} rows; use a larger --step"
        );
    }
    let steps = steps.max(-1.0) as i64;

    let rows = (0..=steps)
        .map(|i| {
            let top = args.viewport - i as f64 * args.step;
            let geometry = Geometry::vertical(top, top + args.height, args.viewport);
            let progress = scroll_progress(&geometry, &config);
            SweepRow {
                top,
                progress,
                frame: select_frame(progress, config.frame_count).map(|f| f.0),
            }
        })
        .collect::<Vec<_>>();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{:>10} {:>9} {:>6}", "top", "progress", "frame");
        for row in rows {
            let frame = row.frame.map_or_else(|| "-".to_string(), |f| f.to_string());
            println!("{:>10.1} {:>9.3} {:>6}", row.top, row.progress, frame);
        }
    }
    Ok(())
}

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, Subcommand};
use faux_pass_core::{
    render::svg, AppConfig, DisplayList, FauxPassError, PlaybackDriver, PlaybackPhase, Recorder,
    RecordingSettings, Scene, SceneDescriptor,
};
use tracing_subscriber::EnvFilter;

fn main() -> faux_pass_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Play { scene, loops } => run_play(&config, scene.as_deref(), loops),
        Commands::Record { scene, fps, output } => {
            run_record(&config, scene.as_deref(), fps, &output)
        }
        Commands::Snapshot { scene, at, output } => {
            run_snapshot(&config, scene.as_deref(), at, &output)
        }
        Commands::ExportScene { scene, output } => {
            run_export(&config, scene.as_deref(), &output)
        }
    }
}

fn run_play(
    config: &AppConfig,
    scene: Option<&str>,
    loops: Option<u64>,
) -> faux_pass_core::Result<()> {
    let scene = load_scene(config, scene)?;
    let interval = config
        .playback
        .frame_interval()
        .ok_or_else(|| FauxPassError::msg("playback requires a frame rate above zero"))?;
    tracing::info!(
        scene = scene.name(),
        duration_ms = scene.duration_ms(),
        ?loops,
        "starting playback"
    );

    let mut driver = PlaybackDriver::for_scene(&scene)
        .with_lead_in(config.playback.lead_in())
        .with_easing(config.playback.easing);
    let mut surface = DisplayList::new(config.surface.size());
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        driver.advance(now - last_tick);
        last_tick = now;

        // The host owns clearing; the engine only appends.
        surface.clear();
        scene.render_at(driver.scene_time_ms(), &mut surface);
        tracing::trace!(
            time_ms = driver.scene_time_ms(),
            draws = surface.calls().len(),
            "frame"
        );

        if driver.phase() == PlaybackPhase::Complete {
            let finished = driver.loops_completed() + 1;
            tracing::info!(finished, "loop complete");
            if loops.is_some_and(|limit| finished >= limit) {
                break;
            }
        }

        std::thread::sleep(interval.saturating_sub(now.elapsed()));
    }

    Ok(())
}

fn run_record(
    config: &AppConfig,
    scene: Option<&str>,
    fps: Option<u32>,
    output: &Path,
) -> faux_pass_core::Result<()> {
    let scene = load_scene(config, scene)?;
    let settings = RecordingSettings {
        fps: fps.unwrap_or(config.playback.fps),
        size: config.surface.size(),
        easing: config.playback.easing,
    };
    let recorder = Recorder::new(settings);
    tracing::info!(
        scene = scene.name(),
        fps = recorder.settings().fps,
        ?output,
        "recording loop"
    );

    let recording = recorder.record(&scene)?;
    recording.write(output)?;
    tracing::info!(frames = recording.frames.len(), "recording written");
    Ok(())
}

fn run_snapshot(
    config: &AppConfig,
    scene: Option<&str>,
    at: u64,
    output: &Path,
) -> faux_pass_core::Result<()> {
    let scene = load_scene(config, scene)?;
    let size = config.surface.size();
    let mut surface = DisplayList::new(size);
    scene.render_at(at, &mut surface);

    let document = svg::to_svg(size, surface.calls(), config.surface.background);
    std::fs::write(output, document)?;
    tracing::info!(
        scene = scene.name(),
        at,
        draws = surface.calls().len(),
        ?output,
        "snapshot written"
    );
    Ok(())
}

fn run_export(
    config: &AppConfig,
    scene: Option<&str>,
    output: &Path,
) -> faux_pass_core::Result<()> {
    let scene = load_scene(config, scene)?;
    let descriptor = SceneDescriptor::from(scene);
    std::fs::write(output, descriptor.to_json()?)?;
    tracing::info!(scene = %descriptor.name, ?output, "scene exported");
    Ok(())
}

fn load_scene(config: &AppConfig, scene: Option<&str>) -> faux_pass_core::Result<Scene> {
    let name = scene.unwrap_or(&config.playback.scene);
    Scene::try_from(SceneDescriptor::find(name)?)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays and exports Faux Pass ticket animations", long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scene in real time, looping until interrupted.
    Play {
        /// Built-in scene name (`rta-logo`, `showcase`) or JSON scene path.
        #[arg(short, long)]
        scene: Option<String>,
        /// Stop after this many loops.
        #[arg(short, long)]
        loops: Option<u64>,
    },
    /// Sample one loop at a fixed frame rate and write the draw calls as JSON.
    Record {
        #[arg(short, long)]
        scene: Option<String>,
        /// Frame rate; defaults to the configured playback rate.
        #[arg(short, long)]
        fps: Option<u32>,
        /// Path of the JSON recording to write.
        output: PathBuf,
    },
    /// Render a single frame to SVG.
    Snapshot {
        #[arg(short, long)]
        scene: Option<String>,
        /// Scene time in milliseconds.
        #[arg(short, long, default_value_t = 0)]
        at: u64,
        /// Path of the SVG file to write.
        output: PathBuf,
    },
    /// Write a scene as a JSON document that can be edited and loaded back.
    ExportScene {
        #[arg(short, long)]
        scene: Option<String>,
        output: PathBuf,
    },
}

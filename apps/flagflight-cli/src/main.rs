use anyhow::Context;
use clap::{Parser, Subcommand};
use flagflight_assets::{FlagModel, ModelManifest, PlaneModel, PlanetModel, scene_models};
use flagflight_input::FlightScript;
use flagflight_kernel::{ClothSim, Scene, SceneModels, SimConfig, wave};
use flagflight_render::{DebugTextRenderer, FrameView, RenderMode, Renderer};
use glam::Vec2;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flagflight-cli", about = "Headless driver for the flagflight scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration (YAML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the effective configuration
    Info,
    /// Fly a scripted route and print frame views
    Simulate {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: usize,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Flight script (YAML). The built-in tour is used when omitted.
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Print every n-th frame
        #[arg(short, long, default_value = "60")]
        every: usize,
        /// Fly at night
        #[arg(long)]
        night: bool,
        /// Render surface normals instead of colors
        #[arg(long)]
        normals: bool,
        /// List every plane part in the output
        #[arg(long)]
        parts: bool,
        /// Plane model manifest (JSON)
        #[arg(long)]
        plane: Option<PathBuf>,
        /// Flag model manifest (JSON)
        #[arg(long)]
        flag: Option<PathBuf>,
        /// Planet model manifest (JSON)
        #[arg(long)]
        planet: Option<PathBuf>,
    },
    /// Fly the built-in tour over the built-in models, switching to night
    /// halfway, then replay it from the event log and compare
    Replay {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "1000")]
        frames: usize,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
    /// Print flag displacement over the cloth surface
    Flag {
        /// Wall-clock seconds of flight
        #[arg(short, long, default_value = "1.0")]
        time: f32,
        /// Normalized plane speed in [0, 1]
        #[arg(short, long, default_value = "0.5")]
        speed_factor: f32,
        /// Samples across the flag
        #[arg(long, default_value = "7")]
        columns: usize,
        /// Samples from mount to free edge
        #[arg(long, default_value = "9")]
        rows: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => SimConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("flagflight-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("assets: {}", flagflight_assets::crate_info());
            println!("input: {}", flagflight_input::crate_info());
            println!("render: {}", flagflight_render::crate_info());
            println!("--- configuration ---");
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Simulate {
            frames,
            dt,
            script,
            every,
            night,
            normals,
            parts,
            plane,
            flag,
            planet,
        } => {
            let script = match script {
                Some(path) => FlightScript::load(&path)
                    .with_context(|| format!("loading flight script {}", path.display()))?,
                None => FlightScript::demo(),
            };
            let plane = PlaneModel::resolve(manifest_or(plane, ModelManifest::builtin_plane)?)?;
            FlagModel::resolve(manifest_or(flag, ModelManifest::builtin_flag)?)?;
            let planet = PlanetModel::resolve(manifest_or(planet, ModelManifest::builtin_planet)?)?;

            let mut scene = Scene::new(config)?.with_models(scene_models(&plane, &planet));
            if night {
                scene.set_daylight(false);
            }
            let mode = if normals {
                RenderMode::Normal
            } else {
                RenderMode::Color
            };
            let renderer = if parts {
                DebugTextRenderer::new().with_parts()
            } else {
                DebugTextRenderer::new()
            };
            let every = every.max(1);

            info!(frames, dt, "simulating");
            for controls in script.cycle(frames) {
                scene.step(dt, controls);
                if scene.frame() % every as u64 == 0 {
                    print!("{}", renderer.render(&FrameView::capture(&scene, mode)));
                }
            }
            println!("{}", scene.summary());
        }
        Commands::Replay { frames, dt } => {
            println!("Deterministic replay: frames={frames}, dt={dt}");

            let models = builtin_models()?;
            let mut run = Scene::new(config)?
                .with_models(models.clone())
                .with_recording();
            for (i, controls) in FlightScript::demo().cycle(frames).enumerate() {
                if i == frames / 2 {
                    run.toggle_daylight();
                }
                run.step(dt, controls);
            }
            let replayed = Scene::replay(config, models, run.events())?;

            println!("Run:    {} hash={:#x}", run.summary(), run.state_hash());
            println!(
                "Replay: {} hash={:#x}",
                replayed.summary(),
                replayed.state_hash()
            );
            let matched = run.state_hash() == replayed.state_hash();
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            if !matched {
                anyhow::bail!("replay diverged");
            }
        }
        Commands::Flag {
            time,
            speed_factor,
            columns,
            rows,
        } => {
            let reference = config.cloth.min_reference_height;
            let mut cloth = ClothSim::new(&config.cloth);
            cloth.advance(speed_factor.clamp(0.0, 1.0), time.max(0.0));
            println!(
                "Flag displacement at cloth_t={:.3} (rows: mount -> free edge)",
                cloth.accumulated_time()
            );
            let columns = columns.max(2);
            let rows = rows.max(2);
            for r in 0..rows {
                let y = reference * r as f32 / (rows - 1) as f32;
                let line: Vec<String> = (0..columns)
                    .map(|c| {
                        let x = -3.0 + 6.0 * c as f32 / (columns - 1) as f32;
                        format!("{:+.3}", wave::displacement(Vec2::new(x, y), &cloth, reference))
                    })
                    .collect();
                println!("y={y:+6.2} | {}", line.join(" "));
            }
        }
    }

    Ok(())
}

fn builtin_models() -> anyhow::Result<SceneModels> {
    let plane = PlaneModel::resolve(ModelManifest::builtin_plane())?;
    let planet = PlanetModel::resolve(ModelManifest::builtin_planet())?;
    Ok(scene_models(&plane, &planet))
}

fn manifest_or(
    path: Option<PathBuf>,
    builtin: fn() -> ModelManifest,
) -> anyhow::Result<ModelManifest> {
    match path {
        Some(path) => ModelManifest::load(&path)
            .with_context(|| format!("loading model manifest {}", path.display())),
        None => Ok(builtin()),
    }
}

use anyhow::{Context, Result};
use car_sim::{InputState, Simulation, WorldConfig};
use clap::Parser;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;

/// Replays scripted input against a simulated course without a window.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON world description; the bundled course if omitted
    #[arg(long)]
    world: Option<PathBuf>,
    /// JSON input script; a short demo drive if omitted
    #[arg(long)]
    script: Option<PathBuf>,
    /// Fixed frame rate used to derive the time step
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

/// A run of frames with the same input held.
#[derive(Deserialize)]
struct Segment {
    #[serde(default)]
    input: InputState,
    frames: usize,
}

fn demo_script() -> Vec<Segment> {
    let forward = InputState {
        forward: true,
        ..Default::default()
    };
    let forward_left = InputState {
        steer_left: true,
        ..forward
    };
    let forward_right = InputState {
        steer_right: true,
        ..forward
    };
    let brake = InputState {
        brake: true,
        ..Default::default()
    };
    let reverse = InputState {
        reverse: true,
        ..Default::default()
    };
    vec![
        Segment {
            input: forward,
            frames: 90,
        },
        Segment {
            input: forward_right,
            frames: 30,
        },
        Segment {
            input: forward,
            frames: 60,
        },
        Segment {
            input: brake,
            frames: 60,
        },
        Segment {
            input: reverse,
            frames: 60,
        },
        Segment {
            input: forward_left,
            frames: 45,
        },
        Segment {
            input: InputState::default(),
            frames: 120,
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.world {
        Some(path) => {
            info!("Loading world from {:?}", path);
            WorldConfig::load_json(path).with_context(|| format!("loading {:?}", path))?
        }
        None => {
            info!("Using bundled course");
            WorldConfig::included_course()?
        }
    };
    let script = match &args.script {
        Some(path) => {
            info!("Loading script from {:?}", path);
            let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
            serde_json::from_reader(file)?
        }
        None => demo_script(),
    };

    let mut sim = Simulation::new(config)?;
    let frame_time = 1.0 / f64::from(args.fps.max(1));
    // The first frame has no elapsed time, like a freshly started clock.
    let mut dt = 0.0;
    let mut collisions = 0;

    for segment in &script {
        for _ in 0..segment.frames {
            let report = sim.step(&segment.input, dt)?;
            if let Some(end) = report.verdict.end() {
                collisions += 1;
                info!("{} collision", end);
            }
            dt = frame_time;
        }
    }

    let pose = sim.vehicle().pose();
    info!(
        "Finished after {} frames at ({:.2}, {:.2}) heading {:.1}, {} frames in collision",
        sim.frame(),
        pose.position.x,
        pose.position.y,
        pose.heading,
        collisions
    );
    Ok(())
}

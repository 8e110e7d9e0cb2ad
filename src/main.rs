use std::path::PathBuf;
use std::time::{Duration, Instant};

use paintkit::config::{Config, DemoMode, DEFAULT_CONFIG_PATH};
use paintkit::demo::{PostFilter, Scene};
use paintkit::display::{Display, InputEvent, MouseButtonKind, RenderTarget};
use sdl2::keyboard::Keycode;

struct Args {
    config_path: PathBuf,
    mode: Option<DemoMode>,
    seed: Option<u64>,
}

/// Parse command line arguments
fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        mode: None,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            },
            "--mode" | "-m" => {
                if i + 1 < args.len() {
                    parsed.mode = Some(args[i + 1].parse()?);
                    i += 1;
                }
            },
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    let seed = args[i + 1]
                        .parse::<u64>()
                        .map_err(|e| format!("bad seed '{}': {}", args[i + 1], e))?;
                    parsed.seed = Some(seed);
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: paintkit [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH  Config file (default: {})",
                    DEFAULT_CONFIG_PATH
                );
                println!("  --mode board|galaxy, -m  Scene to animate");
                println!("  --seed N, -s N          RNG seed (0 = from clock)");
                println!("  --help                  Show this help message");
                std::process::exit(0);
            },
            other => log::warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    Ok(parsed)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let mut config = Config::load_or_default(&args.config_path);
    if let Some(mode) = args.mode {
        config.demo.mode = mode;
    }
    if let Some(seed) = args.seed {
        config.demo.seed = seed;
    }

    let mut scene = Scene::from_config(&config);
    let width = scene.canvas().width();
    let height = scene.canvas().height();

    let (mut display, texture_creator) = Display::with_options("paintkit", width, height, true)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

    let tick = Duration::from_millis(config.demo.tick_ms.max(1));
    let snapshot = config.demo.snapshot_path.clone();
    let mut filter = PostFilter::None;

    log::info!("{:?} scene on a {}x{} canvas", config.demo.mode, width, height);
    println!("Controls:");
    println!("  S          - Save snapshot to {}", snapshot.display());
    println!("  L          - Load snapshot onto the canvas");
    println!("  F          - Cycle display filter");
    println!("  Left click - Split particles (board)");
    println!("  Escape     - Quit");

    'main: loop {
        let frame_start = Instant::now();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape => break 'main,
                    Keycode::S => {
                        if let Err(e) = scene.canvas().save_bmp(&snapshot) {
                            log::error!("failed to save {}: {}", snapshot.display(), e);
                        }
                    },
                    Keycode::L => {
                        if let Err(e) = scene.canvas_mut().load_bmp(&snapshot) {
                            log::error!("failed to load {}: {}", snapshot.display(), e);
                        }
                    },
                    Keycode::F => {
                        filter = filter.next();
                        log::info!("display filter: {}", filter.name());
                    },
                    _ => {},
                },
                InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButtonKind::Left,
                } => {
                    // window y grows downward, canvas rows grow upward
                    scene.click(x, height as i32 - 1 - y);
                },
                _ => {},
            }
        }

        scene.heartbeat();

        match filter {
            PostFilter::None => display.present(&mut target, scene.canvas().buffer())?,
            f => display.present(&mut target, &f.apply(scene.canvas().buffer()))?,
        }

        if let Some(rest) = tick.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    Ok(())
}

//! Wallcaster demo.
//!
//! Loads a small hand-built level, opens a window with a Vulkan device and
//! runs the input loop until the window is closed or Escape is pressed.
//!
//! ## Controls
//!
//! - `W`/`S`: forward/back
//! - `A`/`D`: turn
//! - Mouse: look (relative mode if the platform supports it)
//! - `Escape`: quit
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod stats;

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wallcaster_core::LevelStore;
use wallcaster_input::{ActionId, KeyCode};
use wallcaster_platform::{NativeWindowSystem, WindowConfig};

use crate::stats::FrameStats;

const TITLE: &str = "RayCast";
const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

const FORWARD: ActionId = ActionId(0);
const BACK: ActionId = ActionId(1);
const TURN_LEFT: ActionId = ActionId(2);
const TURN_RIGHT: ActionId = ActionId(3);

/// Two rooms joined by a short corridor, as (x1, y1, x2, y2).
const WALLS: [(f32, f32, f32, f32); 12] = [
    (-4.0, 4.0, 4.0, 4.0),
    (-4.0, -4.0, 4.0, -4.0),
    (-4.0, 4.0, -4.0, -4.0),
    (4.0, 4.0, 4.0, 0.0),
    (4.0, -1.0, 4.0, -4.0),
    (4.0, 0.0, 5.0, 0.0),
    (4.0, -1.0, 5.0, -1.0),
    (5.0, 4.0, 5.0, 0.0),
    (5.0, -1.0, 5.0, -4.0),
    (5.0, 4.0, 9.0, 4.0),
    (5.0, -4.0, 6.0, -4.0),
    (9.0, 4.0, 6.0, -4.0),
];

fn load_level(level: &mut LevelStore) -> wallcaster_core::Result<()> {
    level.reset()?;
    for (x1, y1, x2, y2) in WALLS {
        level.add_wall(x1, y1, x2, y2)?;
    }
    info!(
        "Loaded {} walls ({} bytes)",
        level.count(),
        level.as_bytes().len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut level = LevelStore::new();
    load_level(&mut level)?;

    let mut window = NativeWindowSystem::native(WindowConfig::new());
    window.open(TITLE, WIDTH, HEIGHT)?;

    window.bind_key(FORWARD, KeyCode::KeyW)?;
    window.bind_key(BACK, KeyCode::KeyS)?;
    window.bind_key(TURN_LEFT, KeyCode::KeyA)?;
    window.bind_key(TURN_RIGHT, KeyCode::KeyD)?;

    let quit = Rc::new(Cell::new(false));
    {
        let quit = Rc::clone(&quit);
        window.on_key_down(move |key| {
            if key == KeyCode::Escape {
                quit.set(true);
            }
        });
    }

    let look = Rc::new(Cell::new(Vec2::ZERO));
    {
        let look = Rc::clone(&look);
        window.on_mouse_move(move |delta| look.set(look.get() + delta));
    }

    // Keep running without relative mouse input
    let _ = window.grab_mouse();

    let mut stats = FrameStats::default();
    while window.is_open() {
        window.update();
        if quit.get() {
            window.force_close();
        }

        let dt = window.delta_time_ms();
        stats.record(dt);

        let movement = f32::from(u8::from(window.is_bind_pressed(FORWARD)))
            - f32::from(u8::from(window.is_bind_pressed(BACK)));
        let turn = f32::from(u8::from(window.is_bind_pressed(TURN_RIGHT)))
            - f32::from(u8::from(window.is_bind_pressed(TURN_LEFT)));
        if movement != 0.0 || turn != 0.0 {
            debug!("move {movement} turn {turn} look {:?} dt {dt:.2}ms", look.get());
        }
        look.set(Vec2::ZERO);
    }

    stats.log();

    window.close();
    level.dispose();
    info!("Shutdown complete");
    Ok(())
}

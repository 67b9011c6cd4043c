//! Pong3D - native entry point
//!
//! Runs a headless session: host frames at a jittery ~144 Hz drive the
//! scheduler, a scripted player taps Up and Down, and draws are recorded
//! into a `DrawList` instead of a GPU.
//!
//! Usage: `RUST_LOG=info pong3d [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pong3d::input::Key;
    use pong3d::present::DrawList;
    use pong3d::sim::{Contacts, GameRng};
    use pong3d::{Clock, FrameScheduler, Game, GameConfig, Input};

    /// Simulated session length (seconds)
    const SESSION_SECONDS: f64 = 10.0;
    /// Nominal host refresh rate
    const HOST_HZ: f64 = 144.0;
    /// Host frame durations vary by up to this fraction
    const FRAME_JITTER: f32 = 0.25;
    /// The scripted player changes direction this often (seconds)
    const INPUT_PERIOD: f64 = 1.5;

    /// Scripted player: up, rest, down, rest, ...
    fn scripted_key(total_time: f64) -> Option<Key> {
        match (total_time / INPUT_PERIOD) as u64 % 4 {
            0 => Some(Key::Up),
            2 => Some(Key::Down),
            _ => None,
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(&path)?,
            None => {
                log::info!("No config path given, using defaults");
                GameConfig::default()
            }
        };
        log::debug!("Config: {}", config.to_json()?);

        let mut game = Game::from_config(&config);
        log::info!(
            "Session seed {} starting in {:?}",
            game.rng().seed(),
            game.state_kind()
        );
        let mut scheduler = FrameScheduler::from_config(&config);
        let mut input = Input::new();
        let mut draws = DrawList::new();
        // Frame jitter gets its own stream so it never perturbs the game's RNG
        let mut jitter = GameRng::new(config.seed ^ 0x9E37_79B9_7F4A_7C15);

        let mut total_time = 0.0;
        let mut frames = 0u64;
        let mut held: Option<Key> = None;
        let mut second_ticks = 0u32;
        let mut second_contacts = Contacts::empty();
        let mut next_report = 1.0;

        while total_time < SESSION_SECONDS {
            let scale = 1.0 + jitter.range_f32(-FRAME_JITTER, FRAME_JITTER);
            let frame_duration = f64::from(scale) / HOST_HZ;
            total_time += frame_duration;

            let wanted = scripted_key(total_time);
            if wanted != held {
                if let Some(key) = held {
                    input.handle_key(key, false);
                }
                if let Some(key) = wanted {
                    input.handle_key(key, true);
                }
                log::debug!("t={:.3}s input {:?} -> {:?}", total_time, held, wanted);
                held = wanted;
            }

            draws.clear();
            let clock = Clock {
                frame_duration,
                total_time,
            };
            let report =
                scheduler.frame(&mut game, &mut input, clock, config.framebuffer, &mut draws)?;
            frames += 1;
            second_ticks += report.ticks;
            second_contacts |= report.contacts;

            if total_time >= next_report {
                let ball = game.ball();
                log::info!(
                    "t={:.0}s ticks={} lit={} instances={} ball=({:.2}, {:.2}) vel=({:.2}, {:.2}) contacts={:?}",
                    next_report,
                    second_ticks,
                    draws.lit_draws().len(),
                    draws.instances().len(),
                    ball.position.x,
                    ball.position.y,
                    ball.velocity.x,
                    ball.velocity.y,
                    second_contacts,
                );
                second_ticks = 0;
                second_contacts = Contacts::empty();
                next_report += 1.0;
            }
        }

        log::info!(
            "Session finished: {} frames, {} ticks, {:.3}s simulated",
            frames,
            scheduler.total_ticks(),
            scheduler.total_ticks() as f64 * scheduler.step()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong3D (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("Session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless driver is native-only
}

#[cfg(not(target_arch = "wasm32"))]
mod monitor {
    use chrono::Local;
    use color_eyre::{eyre::eyre, Result};
    use padbridge::config::MonitorConfig;
    use padbridge::consumer::{Button, Gamepads, NativeGamepads};
    use padbridge::Transport;
    use std::future::Future;
    use std::time::Duration;
    use tracing::{debug, info, warn, Level};
    use tracing_subscriber::FmtSubscriber;

    #[tokio::main]
    pub async fn main() -> Result<()> {
        setup()?;

        let config = load_config()?;
        info!("Starting gamepad monitor with {:?}", config);

        let mut gamepads = NativeGamepads::native(config.bridge.clone())
            .map_err(|e| eyre!("Failed to start gamepad bridge: {}", e))?;

        run(&mut gamepads, &config, tokio::signal::ctrl_c()).await
    }

    /// Poll until `shutdown` resolves
    async fn run<T, F>(gamepads: &mut Gamepads<T>, config: &MonitorConfig, shutdown: F) -> Result<()>
    where
        T: Transport,
        F: Future,
    {
        // One listener for the whole run, so a signal during a poll is not lost
        tokio::pin!(shutdown);

        let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));
        let stats_interval = chrono::Duration::seconds(config.stats_interval_s);
        let mut polls: u64 = 0;
        let mut last_stats = Local::now();

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping monitor");
                    break;
                }
            }

            gamepads.poll()?;
            polls += 1;

            let mut rumble = Vec::new();
            for gamepad in gamepads.all() {
                for button in gamepad.all_just_pressed() {
                    info!("Gamepad {} pressed {:?}", gamepad.id().value(), button);
                }
                debug!(
                    "Gamepad {}: left {:?} right {:?} triggers ({:.3}, {:.3}) bits {:#019b}",
                    gamepad.id().value(),
                    gamepad.left_stick(),
                    gamepad.right_stick(),
                    gamepad.left_trigger(),
                    gamepad.right_trigger(),
                    gamepad.pressed_bits()
                );
                if config.rumble_on_mode && gamepad.is_just_pressed(Button::Mode) {
                    rumble.push(gamepad.id());
                }
            }
            for id in rumble {
                info!("Rumbling gamepad {}", id.value());
                gamepads.rumble(id, 300, 0, 0.8, 0.4);
            }

            let now = Local::now();
            if now - last_stats > stats_interval {
                info!(
                    "Monitor stats at {}: {} polls in last {} seconds, {} gamepads connected",
                    now.format("%H:%M:%S.%3f"),
                    polls,
                    stats_interval.num_seconds(),
                    gamepads.all().count()
                );
                polls = 0;
                last_stats = now;
            }
        }

        Ok(())
    }

    fn setup() -> Result<()> {
        if std::env::var("RUST_LIB_BACKTRACE").is_err() {
            std::env::set_var("RUST_LIB_BACKTRACE", "0")
        }
        color_eyre::install()?;
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info")
        }
        setup_logging_env();
        Ok(())
    }

    fn setup_logging_env() {
        let level = match std::env::var("RUST_LOG").as_deref() {
            Ok("trace") => Level::TRACE,
            Ok("debug") => Level::DEBUG,
            Ok("warn") => Level::WARN,
            Ok("error") => Level::ERROR,
            _ => Level::INFO,
        };
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .init();
    }

    fn load_config() -> Result<MonitorConfig> {
        let Some(path) = MonitorConfig::default_path() else {
            warn!("No configuration directory on this platform, using defaults");
            return Ok(MonitorConfig::default());
        };
        if let Err(e) = MonitorConfig::ensure_default(&path) {
            warn!("Could not write default configuration: {}", e);
        }
        MonitorConfig::load(&path).map_err(|e| eyre!("Failed to load configuration: {}", e))
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> color_eyre::Result<()> {
    monitor::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

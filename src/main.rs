mod actuator;
mod classifier;
mod config;
mod cursor;
mod engine;
mod session;
mod settings;
mod watcher;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("haptic-cursor v{} starting...", env!("CARGO_PKG_VERSION"));

    let cfg = config::Config::load();
    log::info!("Sprite file: {}", cfg.sprite_path);
    log::info!("Settings file: {}", cfg.settings_path);
    log::info!("Actuator endpoint: {}", cfg.actuator_endpoint);

    let mut engine = engine::FeedbackEngine::new(cfg);
    engine.enable();

    tokio::select! {
        _ = engine.run() => {}
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupt received, shutting down");
        }
    }

    engine.disable();
}

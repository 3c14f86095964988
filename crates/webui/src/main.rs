use webui::{
    app::{App, AppProps},
    config::ApiConfig,
};

fn main() {
    init_logging();
    match ApiConfig::from_env() {
        Ok(config) => {
            log::debug!("Using API at {}", config.base_url);
            yew::Renderer::<App>::with_props(AppProps { config }).render();
        }
        Err(err) => log::error!("Cannot start the UI - {err}"),
    }
}

fn init_logging() {
    use log::Level;
    use wasm_logger::Config;

    // use debug level for debug builds, warn level for production builds.
    #[cfg(debug_assertions)]
    let level = Level::Trace;
    #[cfg(not(debug_assertions))]
    let level = Level::Warn;

    wasm_logger::init(Config::new(level));
}

use log::LevelFilter;

/// Route the `log` facade to the browser console through `wasm-logger`.
/// The console logger accepts everything; `level` is applied as the
/// facade's max level, so a second call only changes the level.
pub fn init(level: LevelFilter) {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(level);
}

/// Per-component logging helpers; the component becomes the log target.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_follows_configured_level() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(log::log_enabled!(target: "logging-test", log::Level::Debug));

        init(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(!log::log_enabled!(target: "logging-test", log::Level::Debug));
        Logger::info_with_component("logging-test", "console logger installed");
    }

    #[wasm_bindgen_test]
    fn test_off_level_silences_everything() {
        init(LevelFilter::Off);
        assert_eq!(log::max_level(), LevelFilter::Off);
        assert!(!log::log_enabled!(log::Level::Error));
        init(LevelFilter::Info);
    }
}

//! Logger setup for the CLI (`env_logger`) and the browser (`console_log`).
//!
//! Scan progress goes out at `info`; per-line decoding and each found word at `debug`.

use log::LevelFilter;

/// Set to anything but `""`, `0` or `false` to get debug output from the CLI.
pub const DEBUG_ENV_VAR: &str = "WORDGRID_DEBUG";

/// Whether [`DEBUG_ENV_VAR`] asks for debug output.
#[must_use]
pub fn debug_requested() -> bool {
    debug_flag(std::env::var(DEBUG_ENV_VAR).ok().as_deref())
}

fn debug_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("" | "0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

fn level(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the logger for this target. A second call keeps the first logger.
///
/// On native builds `RUST_LOG`, when set, replaces the level chosen here.
pub fn init_logger(debug_enabled: bool) {
    let level = level(debug_enabled);

    #[cfg(target_arch = "wasm32")]
    {
        let console_level = level.to_level().unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(console_level) {
            web_sys::console::error_1(&format!("wordgrid: console logging unavailable ({e})").into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("logging at {level}");
        }
    }
}

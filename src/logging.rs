use std::env;

use log::LevelFilter;

/// Starts the `scrabbler` logger on stderr.
///
/// This crate logs at `Debug` with `--debug` and at `Info` otherwise; other
/// crates only get through at `Warn`. `RUST_LOG` replaces both filters.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    match env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module(env!("CARGO_PKG_NAME"), level);
        }
    }
    builder
        .format_timestamp(None)
        .format_target(false)
        .format_module_path(false);

    // Tests and embedders may have installed a logger already
    if builder.try_init().is_ok() {
        log::debug!(
            "{} {} logging at {level:?}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_keeps_first_logger() {
        init_logger(true);
        init_logger(false);
        log::info!("still logging");
    }
}

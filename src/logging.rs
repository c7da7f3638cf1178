//=========================================================================
// Logging
//
// Installs the `log` sink for the current target:
// - wasm32: browser console (`console_log`) plus the panic hook
// - native: `env_logger`, still overridable through `RUST_LOG`
//
// Installing twice is an error from the underlying logger, reported as
// `BridgeError::Logging`.
//
//=========================================================================

use log::Level;

use crate::core::platform_bridge::BridgeError;

/// Installs the logger at `level`.
#[cfg(target_arch = "wasm32")]
pub fn init(level: Level) -> Result<(), BridgeError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|e| BridgeError::Logging(e.to_string()))
}

/// Installs the logger at `level`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: Level) -> Result<(), BridgeError> {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init()
        .map_err(|e| BridgeError::Logging(e.to_string()))
}

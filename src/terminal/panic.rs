//! Panic hook for terminal restoration.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that restores the terminal before the previous
/// hook prints the panic message. Call it before [`super::TerminalManager::new`]
/// and after `color_eyre::install`, which installs its own hook.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        tracing::error!("Panic: {}", panic_info);
        original_hook(panic_info);
    }));
}

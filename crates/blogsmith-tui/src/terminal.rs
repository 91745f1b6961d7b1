//! Terminal setup and restoration

use blogsmith_core::prelude::*;

/// Enter the alternate screen in raw mode and install the panic hook.
///
/// Unlike `ratatui::init`, a terminal that cannot be set up is reported as
/// [`Error::TerminalInit`] instead of a panic.
pub fn init() -> Result<ratatui::DefaultTerminal> {
    let terminal = ratatui::try_init().map_err(init_error)?;
    install_panic_hook();
    Ok(terminal)
}

fn init_error(err: std::io::Error) -> Error {
    Error::TerminalInit(err.to_string())
}

/// Install a panic hook that restores the terminal before the report prints
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

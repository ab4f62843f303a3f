use std::io::stdout;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use folio_config::{Config, PreferenceStore};

mod app;
mod logging;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(err) = logging::init() {
        eprintln!("folio: logging disabled: {err:#}");
    }

    let config = Config::load();
    let prefs = PreferenceStore::open_default();

    let terminal = ratatui::init();
    if let Err(err) = execute!(stdout(), EnableMouseCapture, EnableFocusChange) {
        tracing::warn!("failed to enable mouse capture: {err}");
    }
    let result = App::new(config, prefs).run(terminal);
    if let Err(err) = execute!(stdout(), DisableMouseCapture, DisableFocusChange) {
        tracing::warn!("failed to release mouse capture: {err}");
    }
    ratatui::restore();
    result
}

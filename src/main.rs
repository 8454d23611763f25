use std::{fs, io, time::Duration};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use mohair_atlas::{
    config::Cli,
    data::DataCache,
    regions::province_names,
    sales::{AuctionReport, demo_report},
    scene::Focus,
    state::AppState,
    svg, ui,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let cache = DataCache::new(&cli.data_dir);
    let boundaries = cache.load_boundaries(&cli.boundaries)?;
    let reports = load_reports(&cache, &cli);
    let mut state = AppState::new(&boundaries, reports, cli.layout, cli.auction.as_deref())?;

    if let Some(path) = &cli.svg {
        fs::write(path, svg::render_scene(&state.scene, Focus::None))?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

/// Event loop; errors are returned only after the caller restores the terminal.
fn run<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => {
                    if state.handle_key(code) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => state.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

/// Reports from disk, or a generated one with `--demo` or when the file
/// is missing, unreadable or empty. A generated report takes the
/// `--auction` id when one is given.
fn load_reports(cache: &DataCache, cli: &Cli) -> Vec<AuctionReport> {
    if !cli.demo {
        match cache.load_reports(&cli.reports) {
            Ok(reports) if !reports.is_empty() => return reports,
            Ok(_) => log::warn!("no auctions in {}, using demo data", cli.reports.display()),
            Err(e) => log::warn!("{e}, using demo data"),
        }
    }
    let mut report = demo_report(&mut rand::rng(), &province_names());
    if let Some(id) = &cli.auction {
        report.id = id.clone();
    }
    vec![report]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_report_answers_to_requested_auction() {
        let cli = Cli::try_parse_from(["mohair-atlas", "--demo", "--auction", "2026-08"]).expect("valid args");
        let reports = load_reports(&DataCache::new("no-such-dir"), &cli);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "2026-08");
        assert!(AppState::new(&[], reports, cli.layout, cli.auction.as_deref()).is_ok());
    }

    #[test]
    fn missing_reports_fall_back_to_demo() {
        let cli = Cli::try_parse_from(["mohair-atlas"]).expect("defaults parse");
        let reports = load_reports(&DataCache::new("no-such-dir"), &cli);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "demo");
    }
}

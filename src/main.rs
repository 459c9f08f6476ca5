use std::fs::File;
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use tracing::{info, info_span};
use tracing_error::ErrorLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod columns;
mod controller;
mod dataset;
mod domain;
mod model;
mod sorting;
mod ui;

use controller::Controller;
use dataset::{SortKey, universities};
use domain::{AppConfig, ExplorerError};
use model::{Model, Status};
use sorting::{SortCycle, SortState};
use ui::TableUI;

/// Explore and sort data for top American universities.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Column to sort by on startup
    #[arg(long, value_enum, default_value_t = SortKey::Rank)]
    sort: SortKey,

    /// Start with a descending sort
    #[arg(long)]
    descending: bool,

    /// Start in natural order
    #[arg(long, conflicts_with_all = ["sort", "descending"])]
    unsorted: bool,

    /// What activating the sorted column again does
    #[arg(long, value_enum, default_value_t = SortCycle::Toggle)]
    cycle: SortCycle,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Upper bound for the width of a column
    #[arg(long, default_value_t = 48)]
    max_column_width: usize,

    /// Do not capture mouse events
    #[arg(long)]
    no_mouse: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the sorted table as CSV and exit
    #[arg(long)]
    csv: bool,
}

impl Args {
    fn config(&self) -> AppConfig {
        let initial_sort = match (self.unsorted, self.descending) {
            (true, _) => None,
            (false, true) => Some(SortState::descending(self.sort)),
            (false, false) => Some(SortState::ascending(self.sort)),
        };
        AppConfig::default()
            .event_poll_time(self.poll_ms)
            .max_column_width(self.max_column_width)
            .initial_sort(initial_sort)
            .sort_cycle(self.cycle)
            .mouse(!self.no_mouse)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(path: &Path) -> Result<(), ExplorerError> {
    let file = File::create(path)?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter),
        )
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| ExplorerError::LoggingFailed(e.to_string()))
}

fn run(args: &Args) -> Result<(), ExplorerError> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let cfg = args.config();
    let _span = info_span!("run", csv = args.csv).entered();
    info!("Starting unirank with {:?}", cfg);

    if args.csv {
        let model = Model::init(&cfg, universities(), columns::columns(), 0, 0)?;
        print!("{}", model.export_csv()?);
        return Ok(());
    }

    let mut terminal = ratatui::try_init()?;
    let result = with_mouse_capture(&mut stdout(), cfg.mouse, || {
        event_loop(&cfg, &mut terminal)
    });
    // Restore even when capture or the loop failed
    ratatui::restore();
    result
}

/// Runs `body` with mouse capture enabled when asked to. Capture is always
/// released again and the first error wins.
fn with_mouse_capture<W, F>(out: &mut W, enabled: bool, body: F) -> Result<(), ExplorerError>
where
    W: Write,
    F: FnOnce() -> Result<(), ExplorerError>,
{
    if !enabled {
        return body();
    }
    execute!(out, EnableMouseCapture)?;
    let result = body();
    let released = execute!(out, DisableMouseCapture);
    result?;
    Ok(released?)
}

fn event_loop(cfg: &AppConfig, terminal: &mut DefaultTerminal) -> Result<(), ExplorerError> {
    let size = terminal.size()?;
    let mut model = Model::init(
        cfg,
        universities(),
        columns::columns(),
        size.width as usize,
        size.height as usize,
    )?;
    let ui = TableUI::new(cfg);
    let controller = Controller::new(cfg);

    while model.status != Status::Quitting {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        };
    }

    info!("Quitting ...");
    Ok(())
}

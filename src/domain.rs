use std::fmt;
use std::io::Error;

use derive_setters::Setters;
use tracing_error::SpanTrace;

use crate::dataset::SortKey;
use crate::sorting::{SortCycle, SortState};

#[derive(Debug)]
pub enum ExplorerError {
    IoError(Error, SpanTrace),
    CsvError(csv::Error),
    LoggingFailed(String),
}

impl From<Error> for ExplorerError {
    fn from(err: Error) -> Self {
        ExplorerError::IoError(err, SpanTrace::capture())
    }
}

impl From<csv::Error> for ExplorerError {
    fn from(err: csv::Error) -> Self {
        ExplorerError::CsvError(err)
    }
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::IoError(err, trace) => write!(f, "terminal i/o failed: {err}\n{trace}"),
            ExplorerError::CsvError(err) => write!(f, "csv export failed: {err}"),
            ExplorerError::LoggingFailed(reason) => write!(f, "could not set up logging: {reason}"),
        }
    }
}

impl std::error::Error for ExplorerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    SelectRow(usize),
    /// Sort by the focused column
    Activate,
    ActivateColumn(usize),
    Help,
    Exit,
    Resize(usize, usize),
}

#[derive(Debug, Clone, Setters)]
pub struct AppConfig {
    pub event_poll_time: u64,
    pub max_column_width: usize,
    pub initial_sort: Option<SortState>,
    pub sort_cycle: SortCycle,
    pub mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            max_column_width: 48,
            initial_sort: Some(SortState::ascending(SortKey::Rank)),
            sort_cycle: SortCycle::Toggle,
            mouse: true,
        }
    }
}

pub const HELP_TEXT: &str = "\
Sorting
  Enter, s, Space   Sort by the focused column, again to reverse
  1 - 7             Sort by column number
  Click header      Sort by the clicked column

Navigation
  Left/Right, h/l   Move column focus
  Up/Down, j/k      Move row selection
  PgUp/PgDn         Move one page
  Home/End, g/G     Jump to first/last row

  ?                 Show this help
  Esc               Close this popup
  q                 Quit";

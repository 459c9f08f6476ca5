use std::time::Instant;
use tracing::{debug, info, trace};

use crate::columns::ColumnDescriptor;
use crate::dataset::{SortKey, University};
use crate::domain::{AppConfig, ExplorerError, HELP_TEXT, Message};
use crate::sorting::{SortController, SortOrder, SortState, sorted_order, sorted_view};
use crate::ui::{
    CMDLINE_HEIGH, COLUMN_WIDTH_MARGIN, INDICATOR_WIDTH, SCROLLBAR_WIDTH, TABLE_HEADER_HEIGHT,
    TITLE_HEIGHT,
};

pub const PLACEHOLDER_TEXT: &str = "No universities to display.";

#[derive(Debug, PartialEq)]
pub enum Status {
    Ready,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    Table,
    Popup,
}

/// A column with all of its cells pre-formatted in natural record order.
struct Column {
    descriptor: ColumnDescriptor,
    max_width: usize,
    render_width: usize,
    data: Vec<String>,
}

impl Column {
    fn load(descriptor: ColumnDescriptor, records: &[University]) -> Self {
        let data: Vec<String> = records.iter().map(|r| descriptor.cell(r)).collect();
        let max_width = data.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        Column {
            descriptor,
            max_width,
            render_width: 0,
            data,
        }
    }

    fn as_string(&self) -> String {
        format!(
            "\"{}\", {:?}, width_max: {}, render_width: {}, # rows {}",
            self.descriptor.label,
            self.descriptor.key,
            self.max_width,
            self.render_width,
            self.data.len(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    None,
    /// Faint arrow on a focused column that is not sorted
    Hint,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::None => "",
            SortIndicator::Hint | SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub width: usize,
    pub right_aligned: bool,
    pub indicator: SortIndicator,
    pub focused: bool,
    pub accent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Visible window of rows, only the visible columns
    Rows(Vec<Vec<String>>),
    /// Spans every column
    Placeholder(String),
}

#[derive(Default, Clone, Debug)]
pub struct UILayout {
    pub width: usize,
    pub height: usize,
    pub table_width: usize,
    pub table_height: usize,
}

impl UILayout {
    pub fn from_values(ui_width: usize, ui_height: usize) -> Self {
        let layout = UILayout {
            width: ui_width,
            height: ui_height,
            table_width: ui_width.saturating_sub(SCROLLBAR_WIDTH),
            table_height: ui_height
                .saturating_sub(TITLE_HEIGHT + CMDLINE_HEIGH + TABLE_HEADER_HEIGHT),
        };
        trace!("Build UILayout: {:?}", layout);
        layout
    }

    pub fn header_y(&self) -> usize {
        TITLE_HEIGHT
    }

    pub fn body_y(&self) -> usize {
        TITLE_HEIGHT + TABLE_HEADER_HEIGHT
    }
}

pub struct UIData {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    pub first_row: usize, // Absolute position of the first row in `body`
    pub nrows: usize,
    pub selected_row: usize,
    pub abs_selected_row: usize,
    pub column_hint: String,
    pub show_popup: bool,
    pub popup_message: String,
    pub status_message: String,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            header: Vec::new(),
            body: TableBody::Rows(Vec::new()),
            first_row: 0,
            nrows: 0,
            selected_row: 0,
            abs_selected_row: 0,
            column_hint: String::new(),
            show_popup: false,
            popup_message: String::new(),
            status_message: String::new(),
        }
    }
}

pub struct Model {
    config: AppConfig,
    pub status: Status,
    modus: Modus,
    records: Vec<University>,
    data: Vec<Column>,
    sorter: SortController,
    rows: Vec<usize>, // Display position to record index
    visible_columns: Vec<usize>,
    curser_row: usize, // Absolute position in `rows`
    curser_column: usize,
    offset_row: usize,
    offset_column: usize,
    uilayout: UILayout,
    uidata: UIData,
    status_message: String,
}

impl Model {
    pub fn init(
        config: &AppConfig,
        records: Vec<University>,
        columns: Vec<ColumnDescriptor>,
        ui_width: usize,
        ui_height: usize,
    ) -> Result<Self, ExplorerError> {
        let start_time = Instant::now();
        let mut data: Vec<Column> = columns
            .into_iter()
            .map(|descriptor| Column::load(descriptor, &records))
            .collect();
        for column in data.iter_mut() {
            column.render_width = Self::calculate_column_width(column, config.max_column_width);
            debug!("Column: {}", column.as_string());
        }
        info!(
            "Prepared {} records in {} columns in {}us",
            records.len(),
            data.len(),
            start_time.elapsed().as_micros()
        );

        let sorter = SortController::new(config.initial_sort, config.sort_cycle);
        let rows = sorted_order(&records, sorter.state());

        let mut model = Self {
            config: config.clone(),
            status: Status::Ready,
            modus: Modus::Table,
            records,
            data,
            sorter,
            rows,
            visible_columns: Vec::new(),
            curser_row: 0,
            curser_column: 0,
            offset_row: 0,
            offset_column: 0,
            uilayout: UILayout::from_values(ui_width, ui_height),
            uidata: UIData::empty(),
            status_message: String::new(),
        };
        model.status_message = model.sort_summary();
        model.update_table_data();
        Ok(model)
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sorter.state()
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    pub fn update(&mut self, message: Message) -> Result<(), ExplorerError> {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::Table => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_table_selection_up(1),
                Message::MoveDown => self.move_table_selection_down(1),
                Message::MovePageUp => self.move_table_selection_up(self.page_size()),
                Message::MovePageDown => self.move_table_selection_down(self.page_size()),
                Message::MoveBeginning => self.move_table_selection_beginning(),
                Message::MoveEnd => self.move_table_selection_end(),
                Message::MoveLeft => self.move_column_focus_left(),
                Message::MoveRight => self.move_column_focus_right(),
                Message::SelectRow(row) => self.select_row(row),
                Message::Activate => self.activate_column(self.curser_column),
                Message::ActivateColumn(idx) => self.activate_column(idx),
                Message::Help => self.show_help(),
                Message::Exit => {}
                Message::Resize(width, height) => self.ui_resize(width, height),
            },
            Modus::Popup => match message {
                Message::Quit => self.quit(),
                Message::Exit | Message::Help => self.close_popup(),
                Message::Resize(width, height) => self.ui_resize(width, height),
                _ => (),
            },
        }
        Ok(())
    }

    /// Maps a terminal cell to the message a click on it means.
    pub fn hit_test(&self, x: usize, y: usize) -> Option<Message> {
        if self.modus != Modus::Table {
            return None;
        }
        let layout = &self.uilayout;
        if y == layout.header_y() {
            return self.column_at(x).map(Message::ActivateColumn);
        }
        if y >= layout.body_y() && y < layout.body_y() + layout.table_height {
            let row = self.offset_row + (y - layout.body_y());
            if row < self.rows.len() {
                return Some(Message::SelectRow(row));
            }
        }
        None
    }

    fn column_at(&self, x: usize) -> Option<usize> {
        let mut begin = 0;
        for &cidx in self.visible_columns.iter() {
            let end = begin + self.data[cidx].render_width;
            if x >= begin && x < end {
                return Some(cidx);
            }
            begin = end + 1; // Column spacing
        }
        None
    }

    /// The table in display order as CSV, header labels first.
    pub fn export_csv(&self) -> Result<String, ExplorerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.data.iter().map(|c| c.descriptor.label))?;
        for record in sorted_view(&self.records, self.sorter.state()) {
            writer.write_record(self.data.iter().map(|c| c.descriptor.cell(record)))?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    // -------------------- Sorting ---------------------- //

    fn activate_column(&mut self, column_idx: usize) {
        let Some(column) = self.data.get(column_idx) else {
            trace!("Ignoring activation of unknown column {column_idx}");
            return;
        };
        let key = column.descriptor.key;
        let state = self.sorter.activate(key);
        self.rows = sorted_order(&self.records, state);

        // A fresh ordering is shown from the top
        self.curser_row = 0;
        self.offset_row = 0;
        self.focus_column(column_idx);

        let summary = self.sort_summary();
        info!("{summary}");
        self.set_status_message(summary);
    }

    fn sort_summary(&self) -> String {
        match self.sorter.state() {
            Some(state) => format!(
                "Sorted by {} ({})",
                self.label_of(state.key),
                state.order.as_str()
            ),
            None => "Natural order".to_string(),
        }
    }

    fn label_of(&self, key: SortKey) -> &str {
        self.data
            .iter()
            .find(|c| c.descriptor.key == key)
            .map(|c| c.descriptor.label)
            .unwrap_or("?")
    }

    fn indicator_for(&self, column_idx: usize) -> SortIndicator {
        let key = self.data[column_idx].descriptor.key;
        match self.sorter.state() {
            Some(SortState { key: active, order }) if active == key => match order {
                SortOrder::Ascending => SortIndicator::Ascending,
                SortOrder::Descending => SortIndicator::Descending,
            },
            _ if column_idx == self.curser_column => SortIndicator::Hint,
            _ => SortIndicator::None,
        }
    }

    // -------------------- View data ---------------------- //

    fn calculate_column_width(column: &Column, max_column_width: usize) -> usize {
        let header_width = column.descriptor.label.chars().count() + INDICATOR_WIDTH;
        let width = std::cmp::max(header_width, column.max_width) + COLUMN_WIDTH_MARGIN;
        std::cmp::min(width, max_column_width)
    }

    fn update_table_data(&mut self) {
        let table_width = self.uilayout.table_width;

        // Create a list of columns that fit in the table
        self.visible_columns.clear();
        let mut visible_width = 0;
        for (cidx, column) in self.data.iter_mut().enumerate().skip(self.offset_column) {
            column.render_width =
                Self::calculate_column_width(column, self.config.max_column_width);
            if visible_width + column.render_width < table_width {
                self.visible_columns.push(cidx);
                visible_width += column.render_width + 1; // Rendered width and 1 spacer character
            } else {
                // Add the last partial visible column
                if visible_width < table_width {
                    column.render_width = table_width - visible_width;
                    self.visible_columns.push(cidx);
                }
                break;
            }
        }

        let header = self
            .visible_columns
            .iter()
            .map(|&cidx| {
                let column = &self.data[cidx];
                HeaderCell {
                    label: column.descriptor.label.to_string(),
                    width: column.render_width,
                    right_aligned: column.descriptor.numeric,
                    indicator: self.indicator_for(cidx),
                    focused: cidx == self.curser_column,
                    accent: column.descriptor.key == SortKey::Name,
                }
            })
            .collect();

        let rbegin = self.offset_row;
        let rend = std::cmp::min(rbegin + self.uilayout.table_height, self.rows.len());
        let body = if self.rows.is_empty() {
            TableBody::Placeholder(PLACEHOLDER_TEXT.to_string())
        } else {
            TableBody::Rows(
                self.rows[rbegin.min(rend)..rend]
                    .iter()
                    .map(|&ridx| {
                        self.visible_columns
                            .iter()
                            .map(|&cidx| self.data[cidx].data[ridx].clone())
                            .collect()
                    })
                    .collect(),
            )
        };

        trace!(
            "Table: Cr {}, Cc {}, Or {}, Oc {}, Rb {}, Re {}, visible columns {:?}",
            self.curser_row,
            self.curser_column,
            self.offset_row,
            self.offset_column,
            rbegin,
            rend,
            self.visible_columns
        );

        self.uidata = UIData {
            header,
            body,
            first_row: self.offset_row,
            nrows: self.rows.len(),
            selected_row: self.curser_row.saturating_sub(self.offset_row),
            abs_selected_row: self.curser_row,
            column_hint: self
                .data
                .get(self.curser_column)
                .map(|c| c.descriptor.hint())
                .unwrap_or_default(),
            show_popup: self.modus == Modus::Popup,
            popup_message: self.uidata.popup_message.clone(),
            status_message: self.status_message.clone(),
        };
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.update_table_data();
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.uilayout.width, width, self.uilayout.height, height
        );
        self.uilayout = UILayout::from_values(width, height);
        self.scroll_to_selection();
        self.update_table_data();
    }

    fn show_help(&mut self) {
        self.modus = Modus::Popup;
        self.uidata.popup_message = HELP_TEXT.to_string();
        self.update_table_data();
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = Modus::Table;
        self.update_table_data();
    }

    // -------------------- Navigation ---------------------- //

    fn page_size(&self) -> usize {
        self.uilayout.table_height.max(1)
    }

    fn scroll_to_selection(&mut self) {
        let height = self.page_size();
        if self.curser_row < self.offset_row {
            self.offset_row = self.curser_row;
        } else if self.curser_row >= self.offset_row + height {
            self.offset_row = self.curser_row + 1 - height;
        }
    }

    fn select_row(&mut self, row: usize) {
        if row < self.rows.len() {
            trace!(
                "Select row {} (id {})",
                row, self.records[self.rows[row]].id
            );
            self.curser_row = row;
            self.scroll_to_selection();
            self.update_table_data();
        }
    }

    fn move_table_selection_up(&mut self, size: usize) {
        self.curser_row = self.curser_row.saturating_sub(size);
        self.scroll_to_selection();
        self.update_table_data();
    }

    fn move_table_selection_down(&mut self, size: usize) {
        if !self.rows.is_empty() {
            self.curser_row = std::cmp::min(self.curser_row + size, self.rows.len() - 1);
            self.scroll_to_selection();
            self.update_table_data();
        }
    }

    fn move_table_selection_beginning(&mut self) {
        self.curser_row = 0;
        self.offset_row = 0;
        self.update_table_data();
    }

    fn move_table_selection_end(&mut self) {
        self.curser_row = self.rows.len().saturating_sub(1);
        self.scroll_to_selection();
        self.update_table_data();
    }

    fn focus_column(&mut self, column_idx: usize) {
        self.curser_column = column_idx;
        if column_idx < self.offset_column {
            self.offset_column = column_idx;
        }
        self.update_table_data();
        // Shift right until the focused column is fully visible
        while self.offset_column < column_idx && !self.column_fully_visible(column_idx) {
            self.offset_column += 1;
            self.update_table_data();
        }
    }

    fn column_fully_visible(&self, column_idx: usize) -> bool {
        let column = &self.data[column_idx];
        self.visible_columns.contains(&column_idx)
            && column.render_width
                == Self::calculate_column_width(column, self.config.max_column_width)
    }

    fn move_column_focus_left(&mut self) {
        if self.curser_column > 0 {
            self.focus_column(self.curser_column - 1);
        }
    }

    fn move_column_focus_right(&mut self) {
        if self.curser_column + 1 < self.data.len() {
            self.focus_column(self.curser_column + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::columns;
    use crate::dataset::universities;
    use crate::sorting::SortCycle;

    fn model() -> Model {
        Model::init(&AppConfig::default(), universities(), columns(), 200, 40).unwrap()
    }

    fn names(model: &Model) -> Vec<&str> {
        model.rows.iter().map(|&idx| model.records[idx].name).collect()
    }

    fn body_rows(model: &Model) -> Vec<Vec<String>> {
        match &model.get_uidata().body {
            TableBody::Rows(rows) => rows.clone(),
            TableBody::Placeholder(text) => panic!("unexpected placeholder {text}"),
        }
    }

    fn column_idx(model: &Model, key: SortKey) -> usize {
        model.data.iter().position(|c| c.descriptor.key == key).unwrap()
    }

    #[test]
    fn default_sort_is_rank_ascending() {
        let model = model();
        assert_eq!(
            model.sort_state(),
            Some(SortState::ascending(SortKey::Rank))
        );
        let names = names(&model);
        assert_eq!(names[0], "Princeton University");
        let jhu = names.iter().position(|n| *n == "Johns Hopkins University").unwrap();
        assert_eq!(names[jhu + 1], "Northwestern University");
    }

    #[test]
    fn header_shows_active_direction() {
        let model = model();
        let header = &model.get_uidata().header;
        assert_eq!(header.len(), 7);
        assert_eq!(header[1].label, "Rank");
        assert_eq!(header[1].indicator, SortIndicator::Ascending);
        assert_eq!(header[1].indicator.symbol(), "▲");
        assert!(header[1].right_aligned);
        assert!(!header[0].right_aligned);
        assert!(header[0].accent);
        // Focused but unsorted column gets the faint hint
        assert_eq!(header[0].indicator, SortIndicator::Hint);
        assert_eq!(header[2].indicator, SortIndicator::None);
    }

    #[test]
    fn activating_accept_rate_twice_reverses() {
        let mut model = model();
        let accept = column_idx(&model, SortKey::AcceptanceRate);

        model.update(Message::ActivateColumn(accept)).unwrap();
        assert_eq!(names(&model)[0], "Harvard University");
        assert_eq!(body_rows(&model)[0][accept], "3.4%");
        assert_eq!(
            model.get_uidata().status_message,
            "Sorted by Accept % (ascending)"
        );

        model.update(Message::ActivateColumn(accept)).unwrap();
        assert_eq!(names(&model)[0], "University of Michigan - Ann Arbor");
        assert_eq!(body_rows(&model)[0][accept], "17.7%");
        assert_eq!(
            model.get_uidata().header[accept].indicator,
            SortIndicator::Descending
        );

        // Stays descending with the default cycle
        model.update(Message::ActivateColumn(accept)).unwrap();
        assert_eq!(
            model.sort_state(),
            Some(SortState::descending(SortKey::AcceptanceRate))
        );
    }

    #[test]
    fn activate_uses_focused_column() {
        let mut model = model();
        model.update(Message::MoveRight).unwrap();
        model.update(Message::MoveRight).unwrap();
        model.update(Message::Activate).unwrap();
        assert_eq!(
            model.sort_state(),
            Some(SortState::ascending(SortKey::Location))
        );
        assert_eq!(names(&model)[0], "University of Michigan - Ann Arbor");
        assert_eq!(
            model.get_uidata().column_hint,
            "City and state of the main campus. (Enter to sort)"
        );
    }

    #[test]
    fn unknown_column_is_ignored() {
        let mut model = model();
        model.update(Message::ActivateColumn(42)).unwrap();
        assert_eq!(
            model.sort_state(),
            Some(SortState::ascending(SortKey::Rank))
        );
    }

    #[test]
    fn three_state_cycle_restores_natural_order() {
        let config = AppConfig::default()
            .initial_sort(None)
            .sort_cycle(SortCycle::ThreeState);
        let mut model = Model::init(&config, universities(), columns(), 200, 40).unwrap();
        let natural = names(&model).iter().map(|s| s.to_string()).collect::<Vec<_>>();
        for _ in 0..3 {
            model.update(Message::ActivateColumn(0)).unwrap();
        }
        assert_eq!(model.sort_state(), None);
        assert_eq!(names(&model), natural);
        assert_eq!(model.get_uidata().status_message, "Natural order");
    }

    #[test]
    fn empty_dataset_renders_placeholder() {
        let mut model = Model::init(&AppConfig::default(), Vec::new(), columns(), 200, 40).unwrap();
        assert_eq!(
            model.get_uidata().body,
            TableBody::Placeholder(PLACEHOLDER_TEXT.to_string())
        );
        assert_eq!(model.get_uidata().header.len(), 7);
        // Navigation and sorting on an empty table are harmless
        model.update(Message::MoveDown).unwrap();
        model.update(Message::MoveEnd).unwrap();
        model.update(Message::Activate).unwrap();
        assert_eq!(model.get_uidata().nrows, 0);
    }

    #[test]
    fn selection_scrolls_window() {
        // 3 rows of table body
        let mut model =
            Model::init(&AppConfig::default(), universities(), columns(), 200, 7).unwrap();
        assert_eq!(body_rows(&model).len(), 3);
        for _ in 0..4 {
            model.update(Message::MoveDown).unwrap();
        }
        let uidata = model.get_uidata();
        assert_eq!(uidata.abs_selected_row, 4);
        assert_eq!(uidata.first_row, 2);
        assert_eq!(uidata.selected_row, 2);

        model.update(Message::MoveEnd).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 17);
        assert_eq!(model.get_uidata().first_row, 15);

        model.update(Message::MovePageDown).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 17);

        model.update(Message::MoveBeginning).unwrap();
        assert_eq!(model.get_uidata().first_row, 0);
    }

    #[test]
    fn sorting_resets_to_top() {
        let mut model =
            Model::init(&AppConfig::default(), universities(), columns(), 200, 7).unwrap();
        model.update(Message::MoveEnd).unwrap();
        model.update(Message::ActivateColumn(0)).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 0);
        assert_eq!(model.get_uidata().first_row, 0);
    }

    #[test]
    fn click_on_header_activates_column() {
        let model = model();
        let header_y = model.uilayout.header_y();
        assert_eq!(
            model.hit_test(0, header_y),
            Some(Message::ActivateColumn(0))
        );

        let first_width = model.data[0].render_width;
        assert_eq!(model.hit_test(first_width, header_y), None); // spacer
        assert_eq!(
            model.hit_test(first_width + 1, header_y),
            Some(Message::ActivateColumn(1))
        );
        assert_eq!(model.hit_test(199, header_y), None);
    }

    #[test]
    fn click_on_body_selects_row() {
        let model = model();
        let body_y = model.uilayout.body_y();
        assert_eq!(model.hit_test(3, body_y + 5), Some(Message::SelectRow(5)));
        assert_eq!(model.hit_test(3, body_y + 30), None);
        assert_eq!(model.hit_test(3, 0), None);
    }

    #[test]
    fn narrow_terminal_scrolls_columns() {
        let mut model =
            Model::init(&AppConfig::default(), universities(), columns(), 60, 30).unwrap();
        assert!(model.visible_columns.len() < 7);
        assert_eq!(model.visible_columns[0], 0);
        for _ in 0..6 {
            model.update(Message::MoveRight).unwrap();
        }
        assert_eq!(model.curser_column, 6);
        assert!(model.column_fully_visible(6));
        assert!(model.offset_column > 0);

        model.update(Message::Activate).unwrap();
        assert_eq!(
            model.sort_state(),
            Some(SortState::ascending(SortKey::EndowmentPerStudent))
        );
        assert_eq!(names(&model)[0], "New York University (NYU)");
    }

    #[test]
    fn help_popup_blocks_table_messages() {
        let mut model = model();
        model.update(Message::Help).unwrap();
        assert!(model.get_uidata().show_popup);
        assert_eq!(model.get_uidata().popup_message, HELP_TEXT);
        assert_eq!(model.hit_test(0, model.uilayout.header_y()), None);

        model.update(Message::ActivateColumn(0)).unwrap();
        assert_eq!(
            model.sort_state(),
            Some(SortState::ascending(SortKey::Rank))
        );

        model.update(Message::Exit).unwrap();
        assert!(!model.get_uidata().show_popup);
        model.update(Message::Quit).unwrap();
        assert_eq!(model.status, Status::Quitting);
    }

    #[test]
    fn resize_rebuilds_layout() {
        let mut model = model();
        model.update(Message::MoveEnd).unwrap();
        model.update(Message::Resize(200, 8)).unwrap();
        assert_eq!(model.uilayout.table_height, 4);
        assert_eq!(body_rows(&model).len(), 4);
        assert_eq!(model.get_uidata().first_row, 14);
    }

    #[test]
    fn csv_export_follows_sort_order() {
        let mut model = model();
        let avg_sat = column_idx(&model, SortKey::AvgSat);
        model.update(Message::ActivateColumn(avg_sat)).unwrap();
        let csv = model.export_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("University Name,Rank,Location,Avg SAT,Accept %,S/F Ratio,Endow./Std (K$)")
        );
        assert_eq!(
            lines.next(),
            Some("University of Michigan - Ann Arbor,21,\"Ann Arbor, MI\",1465,17.7%,10:1,$280K")
        );
        assert_eq!(csv.lines().count(), 19);
    }

    #[test]
    fn csv_quotes_cells_with_newlines_and_quotes() {
        let base = universities()[0].clone();
        let records = vec![University {
            name: "Line\nBreak \"Uni\"",
            ..base
        }];
        let model = Model::init(&AppConfig::default(), records, columns(), 200, 40).unwrap();
        let exported = model.export_csv().unwrap();
        assert!(exported.contains("\"Line\nBreak \"\"Uni\"\"\""));

        let mut reader = csv::Reader::from_reader(exported.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Line\nBreak \"Uni\"");
    }
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{
        Block, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState,
    },
};

use crate::domain::AppConfig;
use crate::model::{HeaderCell, Model, SortIndicator, TableBody, UIData};

pub const TITLE_HEIGHT: usize = 2;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const CMDLINE_HEIGH: usize = 1;
pub const SCROLLBAR_WIDTH: usize = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 1;
pub const INDICATOR_WIDTH: usize = 2; // Space and arrow

const TITLE: &str = "US University Rankings Explorer";
const FOOTER: &str = "Data is illustrative.";

const HEADER_BG: Color = Color::Rgb(51, 65, 85);
const EVEN_ROW_BG: Color = Color::Rgb(30, 41, 59);
const ODD_ROW_BG: Color = Color::Rgb(38, 50, 70);
const SELECTED_BG: Color = Color::Rgb(71, 85, 105);
const ACCENT: Color = Color::Rgb(125, 211, 252);
const ACTIVE_ARROW: Color = Color::Rgb(34, 211, 238);
const TEXT: Color = Color::Rgb(203, 213, 225);
const MUTED: Color = Color::Rgb(100, 116, 139);

#[derive(Debug)]
pub struct TableUI {
    subtitle: &'static str,
}

impl TableUI {
    pub fn new(config: &AppConfig) -> Self {
        let subtitle = if config.mouse {
            "Explore and sort data for top American universities. Click on column headers to sort."
        } else {
            "Explore and sort data for top American universities. Press Enter on a column to sort."
        };
        Self { subtitle }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();

        let [title_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT as u16),
            Constraint::Min(0),
            Constraint::Length(CMDLINE_HEIGH as u16),
        ])
        .areas(frame.area());
        let [table_area, scrollbar_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(SCROLLBAR_WIDTH as u16),
        ])
        .areas(table_area);

        self.draw_title(frame, title_area);
        Self::draw_table(uidata, frame, table_area);
        Self::draw_scrollbar(uidata, frame, scrollbar_area);
        Self::draw_statusline(uidata, frame, status_area);

        if uidata.show_popup {
            Self::draw_popup(uidata, frame);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(vec![
            Line::from(TITLE.bold().fg(ACTIVE_ARROW)),
            Line::from(self.subtitle.fg(MUTED)),
        ])
        .centered();
        frame.render_widget(title, area);
    }

    fn header_cell(header: &HeaderCell) -> Cell<'static> {
        let label_style = if header.focused {
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::new().fg(Color::Gray).add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![Span::styled(header.label.clone(), label_style)];
        let arrow_style = match header.indicator {
            SortIndicator::None => None,
            SortIndicator::Hint => Some(Style::new().fg(MUTED)),
            SortIndicator::Ascending | SortIndicator::Descending => {
                Some(Style::new().fg(ACTIVE_ARROW))
            }
        };
        if let Some(style) = arrow_style {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(header.indicator.symbol(), style));
        }
        let alignment = if header.right_aligned {
            Alignment::Right
        } else {
            Alignment::Left
        };
        Cell::from(Line::from(spans).alignment(alignment))
    }

    fn draw_table(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let widths: Vec<Constraint> = uidata
            .header
            .iter()
            .map(|h| Constraint::Length(h.width as u16))
            .collect();
        let header = Row::new(uidata.header.iter().map(Self::header_cell))
            .style(Style::new().bg(HEADER_BG))
            .height(TABLE_HEADER_HEIGHT as u16);

        let rows: Vec<Row> = match &uidata.body {
            TableBody::Rows(rows) => rows
                .iter()
                .enumerate()
                .map(|(ridx, row)| {
                    let stripe = if (uidata.first_row + ridx) % 2 == 0 {
                        EVEN_ROW_BG
                    } else {
                        ODD_ROW_BG
                    };
                    let cells = row.iter().zip(uidata.header.iter()).map(|(value, h)| {
                        let line = if h.right_aligned {
                            Line::from(value.as_str()).alignment(Alignment::Right)
                        } else {
                            Line::from(value.as_str())
                        };
                        let style = if h.accent {
                            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
                        } else {
                            Style::new().fg(TEXT)
                        };
                        Cell::from(line).style(style)
                    });
                    Row::new(cells).style(Style::new().bg(stripe))
                })
                .collect(),
            TableBody::Placeholder(_) => Vec::new(),
        };

        let selected = match uidata.body {
            TableBody::Rows(_) => Some(uidata.selected_row),
            TableBody::Placeholder(_) => None,
        };
        let mut state = TableState::default().with_selected(selected);

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .flex(Flex::Start)
            .row_highlight_style(Style::new().bg(SELECTED_BG).add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(table, area, &mut state);

        if let TableBody::Placeholder(text) = &uidata.body {
            let placeholder_area = Rect {
                y: area.y + TABLE_HEADER_HEIGHT as u16,
                height: 1,
                ..area
            }
            .intersection(area);
            frame.render_widget(
                Paragraph::new(text.as_str()).centered().fg(MUTED),
                placeholder_area,
            );
        }
    }

    fn draw_scrollbar(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let mut state = ScrollbarState::new(uidata.nrows).position(uidata.abs_selected_row);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        frame.render_stateful_widget(scrollbar, area, &mut state);
    }

    fn draw_statusline(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let position = if uidata.nrows == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", uidata.abs_selected_row + 1, uidata.nrows)
        };
        let right = Line::from(vec![
            Span::from(position).bold(),
            " │ ".fg(MUTED),
            FOOTER.fg(MUTED),
            " │ ".fg(MUTED),
            "?".bold(),
            " help ".fg(MUTED),
        ]);
        let [left_area, right_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(right.width() as u16),
        ])
        .areas(area);

        let left = Line::from(vec![
            Span::styled(
                uidata.status_message.as_str(),
                Style::new().fg(ACTIVE_ARROW),
            ),
            " │ ".fg(MUTED),
            Span::styled(uidata.column_hint.as_str(), Style::new().fg(TEXT)),
        ]);
        frame.render_widget(Paragraph::new(left), left_area);
        frame.render_widget(Paragraph::new(right).right_aligned(), right_area);
    }

    fn draw_popup(uidata: &UIData, frame: &mut Frame) {
        let height = uidata.popup_message.lines().count() as u16 + 2;
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [area] = Layout::horizontal([Constraint::Length(64)])
            .flex(Flex::Center)
            .areas(area);

        let block = Block::bordered()
            .title(Line::from(" Help ".bold()).centered())
            .title_bottom(Line::from(vec![" Close ".into(), "<Esc> ".blue().bold()]).centered())
            .border_set(border::THICK);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(uidata.popup_message.as_str()).block(block),
            area,
        );
    }
}

//! Main rendering logic for the TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::state::{InputMode, UiState};
use super::style::Styles;
use crate::client::DataClient;
use crate::tabs::{TabledTab, Tabs};
use crate::view::TableView;

/// Main render function.
pub fn render<C: DataClient + 'static>(frame: &mut Frame, state: &mut UiState, tabs: &Tabs<C>) {
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Header: title, search box, refresh state
        Constraint::Length(1),  // Tab menu
        Constraint::Min(5),     // Active table
        Constraint::Length(10), // Details / Copied panels
    ])
    .split(frame.area());

    render_header(frame, chunks[0], state, tabs);
    render_menu(frame, chunks[1], state, tabs);

    let tab = &tabs.tabs()[state.active];
    let view = tab.table.borrow().view();
    render_table(frame, chunks[2], state, &view);
    render_panels(frame, chunks[3], tab);
}

fn render_header<C: DataClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    tabs: &Tabs<C>,
) {
    let mut spans = vec![Span::styled(" bluetop ", Styles::header())];

    if tabs.is_refreshing() {
        spans.push(Span::styled(" refreshing… ", Styles::dim()));
    }

    match state.input_mode {
        InputMode::Search => {
            spans.push(Span::raw(" Search: "));
            spans.push(Span::raw(state.search_input.clone()));
            spans.push(Span::styled("█", Styles::tab_active()));
        }
        InputMode::Normal if !state.search_input.is_empty() => {
            spans.push(Span::styled(
                format!(" Search: {} ", state.search_input),
                Styles::dim(),
            ));
        }
        InputMode::Normal => {}
    }

    if let Some(error) = &state.last_error {
        spans.push(Span::styled(format!(" {} ", error), Styles::error()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_menu<C: DataClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    tabs: &Tabs<C>,
) {
    let spans: Vec<Span> = tabs
        .tabs()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if i == state.active {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", i + 1), Styles::dim()),
                Span::styled(format!("{} {} ", tab.kind.name(), tab.menu_label()), style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut UiState, view: &TableView) {
    let header_cells: Vec<Cell> = view
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let title = if view.sort_column == Some(i) {
                let arrow = if view.sort_reversed { "↓" } else { "↑" };
                format!("{}{}", col.title, arrow)
            } else {
                col.title.clone()
            };
            Cell::from(Span::styled(title, Styles::table_header()))
        })
        .collect();
    let header = Row::new(header_cells);

    let widths: Vec<Constraint> = view
        .columns
        .iter()
        .map(|col| {
            if col.fill {
                Constraint::Fill(1)
            } else {
                Constraint::Length(col.width + 1)
            }
        })
        .collect();

    let mut rows: Vec<Row> = view
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| Cell::from(c.text.clone()));
            let row = Row::new(cells);
            if vr.selected {
                row.style(Styles::selected_row())
            } else {
                row.style(Styles::default())
            }
        })
        .collect();

    if let Some(notice) = view.notice {
        rows.push(Row::new([Cell::from(Span::styled(notice.text(), Styles::dim()))]));
    }

    let cursor = state.cursor_mut();
    cursor.resolve(view.rows.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .column_spacing(1)
        .row_highlight_style(Styles::cursor());

    frame.render_stateful_widget(table, area, &mut cursor.ratatui_state);
}

fn render_panels(frame: &mut Frame, area: Rect, tab: &TabledTab) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let details = Paragraph::new(tab.table.borrow().detail_selected().to_string())
        .block(Block::default().title("Details").borders(Borders::ALL));
    frame.render_widget(details, chunks[0]);

    let copied = Paragraph::new(tab.copied_details().to_string())
        .block(Block::default().title("Copied").borders(Borders::ALL));
    frame.render_widget(copied, chunks[1]);
}

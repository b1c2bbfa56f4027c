// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod app;
pub mod pane;
pub mod popover;

use anyhow::{Context, Result};
use crmgrid_crm::{CrmDataset, ListKind};
use crmgrid_table::{CheckState, TableCommand, TableEvent};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::time::Duration;

pub use app::{AppCommand, AppEvent, AppMode, AppState};
pub use pane::{HeaderProjection, Pane, PaneProjection, RowProjection, TableView, panes_for};
pub use popover::{FilterPopover, PopoverAction};

const FILTER_MARK: &str = "▼";
const CHECK_ON: &str = "[x]";
const CHECK_SOME: &str = "[-]";
const CHECK_OFF: &str = "[ ]";

/// Panes in tab order plus the open filter popover, if any.
pub struct ViewData {
    pub panes: Vec<Box<dyn Pane>>,
    pub popover: Option<FilterPopover>,
}

impl ViewData {
    pub fn new(dataset: CrmDataset, page_size: usize) -> Self {
        Self {
            panes: panes_for(dataset, page_size),
            popover: None,
        }
    }

    fn pane(&self, tab: ListKind) -> Option<&dyn Pane> {
        self.panes
            .iter()
            .find(|pane| pane.kind() == tab)
            .map(|pane| pane.as_ref())
    }

    fn pane_mut(&mut self, tab: ListKind) -> Option<&mut Box<dyn Pane>> {
        self.panes.iter_mut().find(|pane| pane.kind() == tab)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    CycleSort,
    ClearSort,
    OpenFilter,
    ClearFilters,
    ToggleRow,
    ToggleAll,
    ClearSelection,
    DeleteSelected,
    NextPage,
    PrevPage,
}

pub fn run_app(state: &mut AppState, view_data: &mut ViewData) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = event_loop(&mut terminal, state, view_data);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    view_data: &mut ViewData,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| render(frame, state, view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) => {
                if handle_key_event(state, view_data, key) {
                    return Ok(());
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
}

/// Routes one key press. Returns true when the app should quit.
fn handle_key_event(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.mode {
        AppMode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                state.dispatch(AppCommand::ExitToNav);
            }
            false
        }
        AppMode::Filter => {
            handle_popover_key(state, view_data, key);
            false
        }
        AppMode::Nav => handle_nav_key(state, view_data, key),
    }
}

fn handle_nav_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Tab, _) => {
            state.dispatch(AppCommand::NextTab);
            return false;
        }
        (KeyCode::BackTab, _) => {
            state.dispatch(AppCommand::PrevTab);
            return false;
        }
        (KeyCode::Char('?'), _) => {
            state.dispatch(AppCommand::OpenHelp);
            return false;
        }
        _ => {}
    }

    let Some(command) = shell_command_for_key(key) else {
        return false;
    };
    if let Some(message) = apply_shell_command(state, view_data, command) {
        state.dispatch(AppCommand::SetStatus(message));
    }
    false
}

fn shell_command_for_key(key: KeyEvent) -> Option<ShellCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(ShellCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(ShellCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(ShellCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(ShellCommand::MoveColumn(1)),
        (KeyCode::Char('g'), _) => Some(ShellCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(ShellCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(ShellCommand::CycleSort),
        (KeyCode::Char('S'), _) => Some(ShellCommand::ClearSort),
        (KeyCode::Char('f'), KeyModifiers::NONE) => Some(ShellCommand::OpenFilter),
        (KeyCode::Char('F'), _) => Some(ShellCommand::ClearFilters),
        (KeyCode::Char(' '), _) => Some(ShellCommand::ToggleRow),
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(ShellCommand::ToggleAll),
        (KeyCode::Esc, _) => Some(ShellCommand::ClearSelection),
        (KeyCode::Char('D'), _) => Some(ShellCommand::DeleteSelected),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => Some(ShellCommand::NextPage),
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => Some(ShellCommand::PrevPage),
        _ => None,
    }
}

/// Applies `command` to the active pane; returns the status line to show.
fn apply_shell_command(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: ShellCommand,
) -> Option<String> {
    let tab = state.active_tab;
    let pane = view_data.pane_mut(tab)?;
    match command {
        ShellCommand::MoveRow(delta) => {
            pane.move_row(delta);
            None
        }
        ShellCommand::MoveColumn(delta) => {
            pane.move_column(delta);
            None
        }
        ShellCommand::JumpFirstRow => {
            pane.jump_row(false);
            None
        }
        ShellCommand::JumpLastRow => {
            pane.jump_row(true);
            None
        }
        ShellCommand::CycleSort => {
            let column_id = pane.focused_column_id()?;
            status_message(&pane.dispatch(TableCommand::ToggleSort(column_id)))
        }
        ShellCommand::ClearSort => status_message(&pane.dispatch(TableCommand::ClearSort)),
        ShellCommand::OpenFilter => match pane.open_filter() {
            Some(popover) => {
                view_data.popover = Some(popover);
                state.dispatch(AppCommand::OpenFilter);
                None
            }
            None => Some("filter unavailable".to_owned()),
        },
        ShellCommand::ClearFilters => status_message(&pane.dispatch(TableCommand::ClearFilters)),
        ShellCommand::ToggleRow => {
            let Some(id) = pane.focused_row_id() else {
                return Some("no row".to_owned());
            };
            let checked = !pane.is_selected(&id);
            status_message(&pane.dispatch(TableCommand::SelectOne { id, checked }))
        }
        ShellCommand::ToggleAll => {
            let checked = pane.check_state() != CheckState::Checked;
            status_message(&pane.dispatch(TableCommand::SelectAll(checked)))
        }
        ShellCommand::ClearSelection => {
            if pane.check_state() == CheckState::Unchecked {
                return None;
            }
            status_message(&pane.dispatch(TableCommand::ClearSelection))
        }
        ShellCommand::DeleteSelected => {
            if pane.selected_count() == 0 {
                return Some("nothing selected".to_owned());
            }
            let removed = pane.delete_selected();
            Some(format!("deleted {removed} {}", tab.label()))
        }
        ShellCommand::NextPage => status_message(&pane.dispatch(TableCommand::NextPage)),
        ShellCommand::PrevPage => status_message(&pane.dispatch(TableCommand::PrevPage)),
    }
}

fn handle_popover_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let Some(popover) = view_data.popover.as_mut() else {
        state.dispatch(AppCommand::ExitToNav);
        return;
    };
    let Some(action) = popover.handle_key(key) else {
        return;
    };

    let command = match action {
        PopoverAction::Edited => return,
        PopoverAction::Cancel => None,
        PopoverAction::Clear => Some(TableCommand::ClearFilter(popover.column_id.clone())),
        PopoverAction::Apply => Some(match popover.filter() {
            Some(filter) => TableCommand::SetFilter {
                column_id: popover.column_id.clone(),
                filter,
            },
            None => TableCommand::ClearFilter(popover.column_id.clone()),
        }),
    };

    view_data.popover = None;
    state.dispatch(AppCommand::ExitToNav);
    let Some(command) = command else {
        return;
    };
    let tab = state.active_tab;
    let message = view_data
        .pane_mut(tab)
        .and_then(|pane| status_message(&pane.dispatch(command)));
    if let Some(message) = message {
        state.dispatch(AppCommand::SetStatus(message));
    }
}

fn status_message(events: &[TableEvent]) -> Option<String> {
    events.iter().rev().find_map(|event| match event {
        TableEvent::StatusUpdated(status) => Some(status.message()),
        _ => None,
    })
}

fn tab_title(tab: ListKind, view_data: &ViewData) -> String {
    match view_data.pane(tab) {
        Some(pane) if pane.filter_count() > 0 => format!(" {} {} ", tab.label(), FILTER_MARK),
        _ => format!(" {} ", tab.label()),
    }
}

fn check_marker(check: CheckState) -> &'static str {
    match check {
        CheckState::Checked => CHECK_ON,
        CheckState::Indeterminate => CHECK_SOME,
        CheckState::Unchecked => CHECK_OFF,
    }
}

fn header_label(header: &HeaderProjection) -> String {
    let mut label = header.label.clone();
    if let Some(direction) = header.sort {
        label.push_str(direction.marker());
    }
    if header.filtered {
        label.push(' ');
        label.push_str(FILTER_MARK);
    }
    label
}

fn footer_text(projection: &PaneProjection) -> String {
    format!(
        "page {}/{} · {}/{}",
        projection.page_index + 1,
        projection.page_count,
        projection.shown,
        projection.total
    )
}

/// Bulk actions while something is selected, active filters otherwise.
fn toolbar_text(projection: &PaneProjection) -> String {
    if projection.selected > 0 {
        return format!(
            "{} selected | D delete | esc clear selection",
            projection.selected
        );
    }
    projection.chips.join(" · ")
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let tab_titles = ListKind::ALL
        .iter()
        .map(|tab| tab_title(*tab, view_data))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("crmgrid").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.tab_index());
    frame.render_widget(tabs, layout[0]);

    let projection = view_data
        .pane(state.active_tab)
        .map(|pane| pane.projection());
    if let Some(projection) = &projection {
        let toolbar = Paragraph::new(toolbar_text(projection)).style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(toolbar, layout[1]);
        render_table(frame, layout[2], projection);
    } else {
        let empty = Paragraph::new(String::new()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.active_tab.label()),
        );
        frame.render_widget(empty, layout[2]);
    }

    let status = Paragraph::new(state.status_line.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, layout[3]);

    if let Some(popover) = &view_data.popover {
        let area = centered_rect(50, 50, frame.area());
        frame.render_widget(Clear, area);
        let body = Paragraph::new(popover.render_text()).block(
            Block::default()
                .title(popover.title())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(body, area);
    }

    if state.mode == AppMode::Help {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | tab/shift+tab list | ? help\n\
nav: j/k rows | h/l columns | g/G first/last row | [/] page\n\
nav: s sort (asc, desc, off) | S clear sort | f filter column | F clear filters\n\
nav: space select row | a select all shown | esc clear selection | D delete selected\n\
filter: tab operator | type value | down/ctrl+n second bound | up/down + space options\n\
filter: enter apply | ctrl+d clear column | esc cancel\n\
help: esc or ? close"
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, projection: &PaneProjection) {
    let mut widths = vec![Constraint::Length(3)];
    widths.extend(vec![Constraint::Min(8); projection.headers.len().max(1)]);

    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut header_cells = vec![Cell::from(check_marker(projection.check)).style(header_style)];
    header_cells.extend(
        projection
            .headers
            .iter()
            .enumerate()
            .map(|(column_index, header)| {
                let mut style = header_style;
                if column_index == projection.cursor_col {
                    style = style.fg(Color::Cyan);
                }
                Cell::from(header_label(header)).style(style)
            }),
    );
    let header = Row::new(header_cells);

    let rows = projection.rows.iter().enumerate().map(|(row_index, row)| {
        let focused_row = row_index == projection.cursor_row;
        let mark = if row.selected { CHECK_ON } else { CHECK_OFF };
        let mut cells = vec![Cell::from(mark)];
        cells.extend(row.cells.iter().enumerate().map(|(column_index, text)| {
            let mut style = Style::default();
            if row.selected {
                style = style.fg(Color::Green);
            }
            if focused_row {
                style = style.bg(Color::DarkGray);
            }
            if focused_row && column_index == projection.cursor_col {
                style = Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD);
            }
            Cell::from(text.clone()).style(style)
        }));
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(projection.title.clone())
                .title_bottom(footer_text(projection))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppMode, AppState, CHECK_OFF, CHECK_ON, CHECK_SOME, HeaderProjection, ShellCommand,
        ViewData, check_marker, footer_text, handle_key_event, header_label, render,
        shell_command_for_key, tab_title, toolbar_text,
    };
    use crmgrid_crm::{
        Activity, ActivityId, ActivityKind, ActivityStatus, CrmDataset, ListKind, Order, OrderId,
        OrderStatus,
    };
    use crmgrid_table::{CheckState, SortDirection};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use time::macros::date;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut AppState, view_data: &mut ViewData, keys: &[KeyEvent]) {
        for key in keys {
            let _ = handle_key_event(state, view_data, *key);
        }
    }

    fn view_data_for_test() -> ViewData {
        let activities = [
            ("Call Ada", ActivityStatus::Open),
            ("Email Bo", ActivityStatus::Done),
            ("Demo Cy", ActivityStatus::Open),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (subject, status))| Activity {
            id: ActivityId::new(index as i64 + 1),
            kind: ActivityKind::Call,
            subject: subject.to_owned(),
            status,
            due_on: None,
            lead_id: None,
        })
        .collect();
        let orders = (1..=5)
            .map(|id| Order {
                id: OrderId::new(id),
                number: format!("SO-{id}"),
                customer: "Acme".to_owned(),
                status: OrderStatus::Pending,
                total_cents: id * 1_000,
                ordered_on: date!(2026 - 02 - 01),
                paid: id % 2 == 0,
            })
            .collect();
        ViewData::new(
            CrmDataset {
                activities,
                orders,
                ..CrmDataset::default()
            },
            2,
        )
    }

    fn projection(state: &AppState, view_data: &ViewData) -> super::PaneProjection {
        view_data
            .pane(state.active_tab)
            .expect("pane for tab")
            .projection()
    }

    #[test]
    fn key_mapping_covers_table_actions() {
        assert_eq!(
            shell_command_for_key(key(KeyCode::Char('s'))),
            Some(ShellCommand::CycleSort)
        );
        assert_eq!(
            shell_command_for_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Some(ShellCommand::DeleteSelected)
        );
        assert_eq!(
            shell_command_for_key(key(KeyCode::Char(']'))),
            Some(ShellCommand::NextPage)
        );
        assert_eq!(
            shell_command_for_key(key(KeyCode::Char(' '))),
            Some(ShellCommand::ToggleRow)
        );
        assert_eq!(shell_command_for_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn tab_key_cycles_lists_and_q_quits() {
        let mut state = AppState::default();
        let mut view_data = view_data_for_test();

        assert!(!handle_key_event(
            &mut state,
            &mut view_data,
            key(KeyCode::Tab)
        ));
        assert_eq!(state.active_tab, ListKind::Activities);
        assert!(!handle_key_event(
            &mut state,
            &mut view_data,
            key(KeyCode::BackTab)
        ));
        assert_eq!(state.active_tab, ListKind::Leads);
        assert!(handle_key_event(
            &mut state,
            &mut view_data,
            key(KeyCode::Char('q'))
        ));
    }

    #[test]
    fn sort_key_cycles_through_three_states() {
        let mut state = AppState::new(ListKind::Activities);
        let mut view_data = view_data_for_test();
        press(
            &mut state,
            &mut view_data,
            &[key(KeyCode::Char('l')), key(KeyCode::Char('s'))],
        );
        assert_eq!(state.status_line.as_deref(), Some("sort Subject asc"));
        press(&mut state, &mut view_data, &[key(KeyCode::Char('s'))]);
        assert_eq!(state.status_line.as_deref(), Some("sort Subject desc"));
        press(&mut state, &mut view_data, &[key(KeyCode::Char('s'))]);
        assert_eq!(state.status_line.as_deref(), Some("sort cleared"));
    }

    #[test]
    fn filter_popover_applies_and_select_all_respects_it() {
        let mut state = AppState::new(ListKind::Activities);
        let mut view_data = view_data_for_test();

        press(
            &mut state,
            &mut view_data,
            &[key(KeyCode::Char('l')), key(KeyCode::Char('f'))],
        );
        assert_eq!(state.mode, AppMode::Filter);
        assert!(view_data.popover.is_some());

        let typed = "call".chars().map(|ch| key(KeyCode::Char(ch)));
        press(&mut state, &mut view_data, &typed.collect::<Vec<_>>());
        press(&mut state, &mut view_data, &[key(KeyCode::Enter)]);
        assert_eq!(state.mode, AppMode::Nav);
        assert!(view_data.popover.is_none());
        assert_eq!(state.status_line.as_deref(), Some("filter: Subject ~ call"));

        press(&mut state, &mut view_data, &[key(KeyCode::Char('a'))]);
        let shown = projection(&state, &view_data);
        assert_eq!(shown.shown, 1);
        assert_eq!(shown.selected, 1);
        assert_eq!(shown.check, CheckState::Checked);
        assert_eq!(state.status_line.as_deref(), Some("1 selected"));

        press(&mut state, &mut view_data, &[key(KeyCode::Char('F'))]);
        let cleared = projection(&state, &view_data);
        assert_eq!(cleared.shown, 3);
        assert_eq!(cleared.check, CheckState::Indeterminate);
    }

    #[test]
    fn popover_escape_leaves_filters_alone() {
        let mut state = AppState::new(ListKind::Activities);
        let mut view_data = view_data_for_test();
        press(
            &mut state,
            &mut view_data,
            &[
                key(KeyCode::Char('f')),
                key(KeyCode::Char(' ')),
                key(KeyCode::Esc),
            ],
        );
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(projection(&state, &view_data).chips.len(), 0);
    }

    #[test]
    fn bulk_delete_removes_selected_rows() {
        let mut state = AppState::new(ListKind::Orders);
        let mut view_data = view_data_for_test();
        press(
            &mut state,
            &mut view_data,
            &[
                key(KeyCode::Char(' ')),
                key(KeyCode::Char('j')),
                key(KeyCode::Char(' ')),
            ],
        );
        assert_eq!(state.status_line.as_deref(), Some("2 selected"));
        assert_eq!(
            toolbar_text(&projection(&state, &view_data)),
            "2 selected | D delete | esc clear selection"
        );

        press(
            &mut state,
            &mut view_data,
            &[KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)],
        );
        assert_eq!(state.status_line.as_deref(), Some("deleted 2 orders"));
        let after = projection(&state, &view_data);
        assert_eq!(after.total, 3);
        assert_eq!(after.selected, 0);
        assert_eq!(footer_text(&after), "page 1/2 · 3/3");
    }

    #[test]
    fn bulk_delete_spares_filtered_out_rows() {
        let mut state = AppState::new(ListKind::Activities);
        let mut view_data = view_data_for_test();
        press(&mut state, &mut view_data, &[key(KeyCode::Char('a'))]);
        assert_eq!(state.status_line.as_deref(), Some("3 selected"));

        press(
            &mut state,
            &mut view_data,
            &[key(KeyCode::Char('l')), key(KeyCode::Char('f'))],
        );
        let typed = "call".chars().map(|ch| key(KeyCode::Char(ch)));
        press(&mut state, &mut view_data, &typed.collect::<Vec<_>>());
        press(&mut state, &mut view_data, &[key(KeyCode::Enter)]);
        assert_eq!(
            toolbar_text(&projection(&state, &view_data)),
            "1 selected | D delete | esc clear selection"
        );

        press(
            &mut state,
            &mut view_data,
            &[KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)],
        );
        assert_eq!(state.status_line.as_deref(), Some("deleted 1 activities"));

        press(&mut state, &mut view_data, &[key(KeyCode::Char('F'))]);
        let after = projection(&state, &view_data);
        assert_eq!(after.total, 2);
        assert_eq!(after.selected, 2);
        assert_eq!(after.check, CheckState::Checked);
    }

    #[test]
    fn jump_keys_cross_pages() {
        let mut state = AppState::new(ListKind::Orders);
        let mut view_data = view_data_for_test();
        press(
            &mut state,
            &mut view_data,
            &[KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)],
        );
        let last = projection(&state, &view_data);
        assert_eq!(footer_text(&last), "page 3/3 · 5/5");
        assert_eq!(last.rows[last.cursor_row].id, "order-5");

        press(&mut state, &mut view_data, &[key(KeyCode::Char('g'))]);
        let first = projection(&state, &view_data);
        assert_eq!(footer_text(&first), "page 1/3 · 5/5");
        assert_eq!(first.rows[first.cursor_row].id, "order-1");
    }

    #[test]
    fn paging_keys_report_position() {
        let mut state = AppState::new(ListKind::Orders);
        let mut view_data = view_data_for_test();
        press(&mut state, &mut view_data, &[key(KeyCode::Char(']'))]);
        assert_eq!(state.status_line.as_deref(), Some("page 2/3"));
        press(
            &mut state,
            &mut view_data,
            &[key(KeyCode::Char(']')), key(KeyCode::Char(']'))],
        );
        assert_eq!(state.status_line.as_deref(), Some("last page"));
        press(&mut state, &mut view_data, &[key(KeyCode::Char('['))]);
        assert_eq!(footer_text(&projection(&state, &view_data)), "page 2/3 · 5/5");
    }

    #[test]
    fn markers_render_in_headers_and_tabs() {
        assert_eq!(check_marker(CheckState::Checked), CHECK_ON);
        assert_eq!(check_marker(CheckState::Indeterminate), CHECK_SOME);
        assert_eq!(check_marker(CheckState::Unchecked), CHECK_OFF);

        let header = HeaderProjection {
            label: "Total".to_owned(),
            sort: Some(SortDirection::Desc),
            filtered: true,
        };
        assert_eq!(header_label(&header), "Total ↓ ▼");

        let mut state = AppState::new(ListKind::Activities);
        let mut view_data = view_data_for_test();
        assert_eq!(tab_title(ListKind::Activities, &view_data), " activities ");
        press(
            &mut state,
            &mut view_data,
            &[
                key(KeyCode::Char('f')),
                key(KeyCode::Char(' ')),
                key(KeyCode::Enter),
            ],
        );
        assert_eq!(tab_title(ListKind::Activities, &view_data), " activities ▼ ");
    }

    #[test]
    fn help_overlay_opens_and_closes() {
        let mut state = AppState::default();
        let mut view_data = view_data_for_test();
        press(&mut state, &mut view_data, &[key(KeyCode::Char('?'))]);
        assert_eq!(state.mode, AppMode::Help);
        press(&mut state, &mut view_data, &[key(KeyCode::Char('j'))]);
        assert_eq!(state.mode, AppMode::Help);
        press(&mut state, &mut view_data, &[key(KeyCode::Esc)]);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn render_draws_tabs_and_footer() -> anyhow::Result<()> {
        let state = AppState::new(ListKind::Orders);
        let view_data = view_data_for_test();
        let mut terminal = Terminal::new(TestBackend::new(100, 20))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;

        let screen = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(screen.contains("orders"));
        assert!(screen.contains("SO-1"));
        assert!(screen.contains("page 1/3"));
        Ok(())
    }
}

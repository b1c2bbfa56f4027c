// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;

use crmgrid_crm::{CrmDataset, ListKind, activity_table, lead_table, order_table, quote_table};
use crmgrid_table::{
    CheckState, FilterDraft, SortDirection, TableCommand, TableDef, TableEvent, TableState,
    describe_filter,
};

use crate::popover::FilterPopover;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProjection {
    pub label: String,
    pub sort: Option<SortDirection>,
    pub filtered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProjection {
    pub id: String,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// Everything the renderer needs for one frame of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneProjection {
    pub title: String,
    pub headers: Vec<HeaderProjection>,
    pub rows: Vec<RowProjection>,
    pub check: CheckState,
    pub chips: Vec<String>,
    pub selected: usize,
    pub shown: usize,
    pub total: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// Row-type-erased list view so tabs over different records can share a
/// `Vec<Box<dyn Pane>>`.
pub trait Pane {
    fn kind(&self) -> ListKind;
    fn total_rows(&self) -> usize;
    fn filter_count(&self) -> usize;
    /// Selected rows that pass the current filters.
    fn selected_count(&self) -> usize;
    fn is_selected(&self, id: &str) -> bool;
    fn check_state(&self) -> CheckState;
    fn dispatch(&mut self, command: TableCommand) -> Vec<TableEvent>;
    fn move_row(&mut self, delta: isize);
    fn move_column(&mut self, delta: isize);
    /// Moves the cursor to the first or last visible row, turning pages.
    fn jump_row(&mut self, last: bool);
    fn focused_column_id(&self) -> Option<String>;
    fn focused_row_id(&self) -> Option<String>;
    fn open_filter(&self) -> Option<FilterPopover>;
    /// Removes the selected rows that pass the current filters; returns how
    /// many went. Hidden rows are never touched.
    fn delete_selected(&mut self) -> usize;
    fn projection(&self) -> PaneProjection;
}

pub struct TableView<T> {
    kind: ListKind,
    table: TableDef<T>,
    rows: Vec<T>,
    state: TableState,
    cursor_row: usize,
    cursor_col: usize,
}

impl<T> TableView<T> {
    pub fn new(kind: ListKind, table: TableDef<T>, rows: Vec<T>, page_size: usize) -> Self {
        Self {
            kind,
            table,
            rows,
            state: TableState::new(page_size),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    fn page_len(&self) -> usize {
        self.state.page(&self.table, &self.rows).len()
    }

    /// Follows table events with the cursor.
    fn settle(&mut self, events: &[TableEvent]) {
        let moved = events.iter().any(|event| {
            matches!(
                event,
                TableEvent::PageChanged(_) | TableEvent::FiltersChanged(_)
            )
        });
        if moved {
            self.cursor_row = 0;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_len();
        self.cursor_row = self.cursor_row.min(len.saturating_sub(1));
        let columns = self.table.columns.len();
        self.cursor_col = self.cursor_col.min(columns.saturating_sub(1));
    }
}

impl<T> Pane for TableView<T> {
    fn kind(&self) -> ListKind {
        self.kind
    }

    fn total_rows(&self) -> usize {
        self.rows.len()
    }

    fn filter_count(&self) -> usize {
        self.state.filters().len()
    }

    fn selected_count(&self) -> usize {
        self.state.visible_selection(&self.table, &self.rows).len()
    }

    fn is_selected(&self, id: &str) -> bool {
        self.state.selection().contains(id)
    }

    fn check_state(&self) -> CheckState {
        self.state.check_state(&self.table, &self.rows)
    }

    fn dispatch(&mut self, command: TableCommand) -> Vec<TableEvent> {
        let events = self.state.dispatch(&self.table, &self.rows, command);
        self.settle(&events);
        events
    }

    fn move_row(&mut self, delta: isize) {
        let len = self.page_len();
        if len == 0 {
            self.cursor_row = 0;
            return;
        }
        let next = (self.cursor_row as isize + delta).clamp(0, len as isize - 1);
        self.cursor_row = next as usize;
    }

    fn move_column(&mut self, delta: isize) {
        let columns = self.table.columns.len();
        if columns == 0 {
            return;
        }
        let next = (self.cursor_col as isize + delta).clamp(0, columns as isize - 1);
        self.cursor_col = next as usize;
    }

    fn jump_row(&mut self, last: bool) {
        let shown = self.state.visible(&self.table, &self.rows).len();
        let index = if last { shown.saturating_sub(1) } else { 0 };
        let events = self.state.show_row(&self.table, &self.rows, index);
        self.settle(&events);
        self.cursor_row = index % self.state.pagination().page_size();
        self.clamp_cursor();
    }

    fn focused_column_id(&self) -> Option<String> {
        self.table
            .columns
            .get(self.cursor_col)
            .map(|column| column.id.clone())
    }

    fn focused_row_id(&self) -> Option<String> {
        self.state
            .page(&self.table, &self.rows)
            .get(self.cursor_row)
            .map(|row| self.table.row_id(row))
    }

    fn open_filter(&self) -> Option<FilterPopover> {
        let column = self.table.columns.get(self.cursor_col)?;
        let spec = column.filter_spec()?;
        let draft = FilterDraft::new(spec, self.state.filters().get(&column.id));
        Some(FilterPopover::new(column.id.clone(), column.header.clone(), draft))
    }

    fn delete_selected(&mut self) -> usize {
        let doomed = self
            .state
            .visible_selection(&self.table, &self.rows)
            .into_iter()
            .collect::<HashSet<_>>();
        let before = self.rows.len();
        let table = &self.table;
        self.rows.retain(|row| !doomed.contains(&table.row_id(row)));
        let removed = before - self.rows.len();
        let events = self.state.forget_missing(&self.table, &self.rows);
        self.settle(&events);
        log::info!(
            "deleted {removed} {} rows, {} hidden rows still selected",
            self.kind.as_str(),
            self.state.selection().len()
        );
        removed
    }

    fn projection(&self) -> PaneProjection {
        let visible = self.state.visible(&self.table, &self.rows);
        let shown = visible.len();
        let pagination = self.state.pagination();
        let range = pagination.range(shown);
        let selection = self.state.selection();
        let selected = self.selected_count();

        let headers = self
            .table
            .columns
            .iter()
            .map(|column| HeaderProjection {
                label: column.header.clone(),
                sort: self.state.sort_direction(&column.id),
                filtered: self.state.filters().contains(&column.id),
            })
            .collect();

        let rows = visible
            .window(range.start, range.len())
            .into_iter()
            .map(|row| {
                let id = self.table.row_id(row);
                RowProjection {
                    selected: selection.contains(&id),
                    cells: self
                        .table
                        .columns
                        .iter()
                        .map(|column| column.display(row))
                        .collect(),
                    id,
                }
            })
            .collect();

        let chips = self
            .state
            .filters()
            .iter()
            .map(|(column_id, filter)| match self.table.column(column_id) {
                Some(column) => describe_filter(&column.header, column.filter_spec(), filter),
                None => describe_filter(column_id, None, filter),
            })
            .collect();

        PaneProjection {
            title: self.table.title.clone(),
            headers,
            rows,
            check: self.check_state(),
            chips,
            selected,
            shown,
            total: self.rows.len(),
            page_index: pagination.page_index(),
            page_count: pagination.page_count(shown),
            cursor_row: self.cursor_row,
            cursor_col: self.cursor_col,
        }
    }
}

/// One pane per list, in tab order.
pub fn panes_for(dataset: CrmDataset, page_size: usize) -> Vec<Box<dyn Pane>> {
    let CrmDataset {
        leads,
        activities,
        orders,
        quotes,
    } = dataset;
    vec![
        Box::new(TableView::new(ListKind::Leads, lead_table(), leads, page_size)),
        Box::new(TableView::new(
            ListKind::Activities,
            activity_table(),
            activities,
            page_size,
        )),
        Box::new(TableView::new(ListKind::Orders, order_table(), orders, page_size)),
        Box::new(TableView::new(ListKind::Quotes, quote_table(), quotes, page_size)),
    ]
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::column::TableDef;
use crate::filter::{ActiveFilters, FilterValue, describe_filter};
use crate::pagination::Pagination;
use crate::pipeline::{RowView, filter_and_sort};
use crate::selection::Selection;
use crate::sort::{SortDirection, SortState, next_sort_state};

/// View-local table state: filters, sort, selection, and page cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableState {
    filters: ActiveFilters,
    sort: SortState,
    selection: Selection,
    pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    ToggleSort(String),
    ClearSort,
    SetFilter {
        column_id: String,
        filter: FilterValue,
    },
    ClearFilter(String),
    ClearFilters,
    SelectAll(bool),
    SelectOne {
        id: String,
        checked: bool,
    },
    ClearSelection,
    NextPage,
    PrevPage,
    SetPageSize(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    SortChanged(SortState),
    FiltersChanged(usize),
    SelectionChanged(usize),
    PageChanged(usize),
    StatusUpdated(TableStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    SortUnavailable,
    SortAsc(String),
    SortDesc(String),
    SortCleared,
    NoSort,
    FilterUnavailable,
    FilterApplied(String),
    FilterCleared(String),
    FiltersCleared,
    NoFilters,
    Selected(usize),
    SelectionCleared,
    RowNotVisible,
    FirstPage,
    LastPage,
    Page { index: usize, count: usize },
}

impl TableStatus {
    pub fn message(&self) -> String {
        match self {
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::SortCleared => "sort cleared".to_owned(),
            Self::NoSort => "no sort".to_owned(),
            Self::FilterUnavailable => "filter unavailable".to_owned(),
            Self::FilterApplied(summary) => format!("filter: {summary}"),
            Self::FilterCleared(column) => format!("filter cleared: {column}"),
            Self::FiltersCleared => "filters cleared".to_owned(),
            Self::NoFilters => "no filters".to_owned(),
            Self::Selected(count) => format!("{count} selected"),
            Self::SelectionCleared => "selection cleared".to_owned(),
            Self::RowNotVisible => "row not visible".to_owned(),
            Self::FirstPage => "first page".to_owned(),
            Self::LastPage => "last page".to_owned(),
            Self::Page { index, count } => format!("page {}/{count}", index + 1),
        }
    }
}

/// Tri-state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|spec| spec.column_id == column_id)
            .map(|spec| spec.direction)
    }

    /// Filtered and sorted rows, recomputed from `rows` on every call.
    pub fn visible<'a, T>(&self, table: &TableDef<T>, rows: &'a [T]) -> RowView<'a, T> {
        filter_and_sort(rows, &table.columns, &self.filters, &self.sort)
    }

    pub fn visible_ids<T>(&self, table: &TableDef<T>, rows: &[T]) -> Vec<String> {
        self.visible(table, rows)
            .iter()
            .map(|row| table.row_id(row))
            .collect()
    }

    /// Selected ids whose rows pass the current filters, in visible order.
    /// Actions driven by the selection act on this set only.
    pub fn visible_selection<T>(&self, table: &TableDef<T>, rows: &[T]) -> Vec<String> {
        self.visible_ids(table, rows)
            .into_iter()
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    /// The current page of visible rows.
    pub fn page<'a, T>(&self, table: &TableDef<T>, rows: &'a [T]) -> Vec<&'a T> {
        let visible = self.visible(table, rows);
        let range = self.pagination.range(visible.len());
        visible.window(range.start, range.len())
    }

    pub fn check_state<T>(&self, table: &TableDef<T>, rows: &[T]) -> CheckState {
        let visible = self.visible_ids(table, rows);
        if self.selection.is_all_selected(&visible) {
            CheckState::Checked
        } else if self.selection.is_some_selected(&visible) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Drops selected ids whose rows are gone, e.g. after a bulk delete.
    pub fn forget_missing<T>(&mut self, table: &TableDef<T>, rows: &[T]) -> Vec<TableEvent> {
        let before = self.selection.len();
        let present = rows
            .iter()
            .map(|row| table.row_id(row))
            .collect::<std::collections::HashSet<_>>();
        self.selection.retain(|id| present.contains(id));
        let mut events = Vec::new();
        if self.selection.len() != before {
            events.push(TableEvent::SelectionChanged(self.selection.len()));
        }
        self.clamp_page(table, rows, &mut events);
        events
    }

    /// Turns to the page holding visible row `index`.
    pub fn show_row<T>(
        &mut self,
        table: &TableDef<T>,
        rows: &[T],
        index: usize,
    ) -> Vec<TableEvent> {
        let before = self.pagination.page_index();
        self.pagination.show_row(index);
        self.pagination.clamp(self.visible(table, rows).len());
        let after = self.pagination.page_index();
        if after == before {
            Vec::new()
        } else {
            vec![TableEvent::PageChanged(after)]
        }
    }

    pub fn dispatch<T>(
        &mut self,
        table: &TableDef<T>,
        rows: &[T],
        command: TableCommand,
    ) -> Vec<TableEvent> {
        let mut events = match command {
            TableCommand::ToggleSort(column_id) => self.toggle_sort(table, &column_id),
            TableCommand::ClearSort => {
                if self.sort.take().is_some() {
                    vec![
                        TableEvent::SortChanged(None),
                        status(TableStatus::SortCleared),
                    ]
                } else {
                    vec![status(TableStatus::NoSort)]
                }
            }
            TableCommand::SetFilter { column_id, filter } => {
                self.set_filter(table, column_id, filter)
            }
            TableCommand::ClearFilter(column_id) => {
                if self.filters.remove(&column_id).is_none() {
                    return vec![status(TableStatus::NoFilters)];
                }
                self.pagination.first_page();
                let header = table
                    .column(&column_id)
                    .map_or(column_id.clone(), |column| column.header.clone());
                vec![
                    TableEvent::FiltersChanged(self.filters.len()),
                    status(TableStatus::FilterCleared(header)),
                ]
            }
            TableCommand::ClearFilters => {
                if self.filters.is_empty() {
                    vec![status(TableStatus::NoFilters)]
                } else {
                    self.filters.clear();
                    self.pagination.first_page();
                    vec![
                        TableEvent::FiltersChanged(0),
                        status(TableStatus::FiltersCleared),
                    ]
                }
            }
            TableCommand::SelectAll(checked) => {
                let visible = self.visible_ids(table, rows);
                self.selection.select_all(checked, visible);
                self.selection_events()
            }
            TableCommand::SelectOne { id, checked } => {
                if checked && !self.visible_ids(table, rows).contains(&id) {
                    return vec![status(TableStatus::RowNotVisible)];
                }
                if self.selection.select_one(&id, checked) {
                    self.selection_events()
                } else {
                    Vec::new()
                }
            }
            TableCommand::ClearSelection => {
                self.selection.clear();
                self.selection_events()
            }
            TableCommand::NextPage => {
                let total = self.visible(table, rows).len();
                if self.pagination.next_page(total) {
                    self.page_events(total)
                } else {
                    vec![status(TableStatus::LastPage)]
                }
            }
            TableCommand::PrevPage => {
                let total = self.visible(table, rows).len();
                if self.pagination.prev_page() {
                    self.page_events(total)
                } else {
                    vec![status(TableStatus::FirstPage)]
                }
            }
            TableCommand::SetPageSize(size) => {
                let total = self.visible(table, rows).len();
                self.pagination.set_page_size(size);
                self.page_events(total)
            }
        };
        self.clamp_page(table, rows, &mut events);
        events
    }

    fn toggle_sort<T>(&mut self, table: &TableDef<T>, column_id: &str) -> Vec<TableEvent> {
        let Some(column) = table.column(column_id).filter(|column| column.sortable) else {
            return vec![status(TableStatus::SortUnavailable)];
        };
        self.sort = next_sort_state(&self.sort, column_id);
        let header = column.header.clone();
        let message = match self.sort_direction(column_id) {
            Some(SortDirection::Asc) => TableStatus::SortAsc(header),
            Some(SortDirection::Desc) => TableStatus::SortDesc(header),
            None => TableStatus::SortCleared,
        };
        vec![TableEvent::SortChanged(self.sort.clone()), status(message)]
    }

    fn set_filter<T>(
        &mut self,
        table: &TableDef<T>,
        column_id: String,
        filter: FilterValue,
    ) -> Vec<TableEvent> {
        let Some(column) = table.column(&column_id) else {
            return vec![status(TableStatus::FilterUnavailable)];
        };
        let Some(spec) = column.filter_spec() else {
            return vec![status(TableStatus::FilterUnavailable)];
        };
        let summary = describe_filter(&column.header, Some(spec), &filter);
        self.filters.set(column_id, filter);
        self.pagination.first_page();
        vec![
            TableEvent::FiltersChanged(self.filters.len()),
            status(TableStatus::FilterApplied(summary)),
        ]
    }

    fn selection_events(&self) -> Vec<TableEvent> {
        let count = self.selection.len();
        let message = if count == 0 {
            TableStatus::SelectionCleared
        } else {
            TableStatus::Selected(count)
        };
        vec![TableEvent::SelectionChanged(count), status(message)]
    }

    fn page_events(&self, total: usize) -> Vec<TableEvent> {
        let index = self.pagination.page_index();
        vec![
            TableEvent::PageChanged(index),
            status(TableStatus::Page {
                index,
                count: self.pagination.page_count(total),
            }),
        ]
    }

    fn clamp_page<T>(&mut self, table: &TableDef<T>, rows: &[T], events: &mut Vec<TableEvent>) {
        let total = self.visible(table, rows).len();
        if self.pagination.clamp(total) {
            events.push(TableEvent::PageChanged(self.pagination.page_index()));
        }
    }
}

fn status(status: TableStatus) -> TableEvent {
    TableEvent::StatusUpdated(status)
}

#[cfg(test)]
mod tests {
    use super::{CheckState, TableCommand, TableEvent, TableState, TableStatus};
    use crate::{
        ColumnDef, ColumnFilter, FilterOption, FilterValue, Operator, SortSpec, TableDef,
    };

    struct Deal {
        id: u32,
        stage: &'static str,
        amount: i64,
    }

    fn table() -> TableDef<Deal> {
        TableDef::new(
            "deals",
            vec![
                ColumnDef::new("stage", "Stage", |deal: &Deal| deal.stage.into()).filter(
                    ColumnFilter::select(vec![
                        FilterOption::new("Open", "open"),
                        FilterOption::new("Won", "won"),
                    ]),
                ),
                ColumnDef::new("amount", "Amount", |deal: &Deal| deal.amount.into())
                    .sortable()
                    .filter(ColumnFilter::number()),
                ColumnDef::new("note", "Note", |_: &Deal| "".into()),
            ],
            |deal| format!("deal-{}", deal.id),
        )
    }

    fn deals() -> Vec<Deal> {
        (1..=10)
            .map(|id| Deal {
                id,
                stage: if id % 3 == 0 { "won" } else { "open" },
                amount: i64::from(id) * 100,
            })
            .collect()
    }

    fn stage_filter(value: &str) -> TableCommand {
        TableCommand::SetFilter {
            column_id: "stage".to_owned(),
            filter: FilterValue::new(Operator::Equals, value),
        }
    }

    #[test]
    fn toggle_sort_cycles_and_reports() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();

        let events = state.dispatch(&table, &rows, TableCommand::ToggleSort("amount".to_owned()));
        assert_eq!(
            events,
            vec![
                TableEvent::SortChanged(Some(SortSpec::asc("amount"))),
                TableEvent::StatusUpdated(TableStatus::SortAsc("Amount".to_owned())),
            ]
        );
        state.dispatch(&table, &rows, TableCommand::ToggleSort("amount".to_owned()));
        assert_eq!(state.sort(), &Some(SortSpec::desc("amount")));
        state.dispatch(&table, &rows, TableCommand::ToggleSort("amount".to_owned()));
        assert_eq!(state.sort(), &None);

        let events = state.dispatch(&table, &rows, TableCommand::ToggleSort("note".to_owned()));
        assert_eq!(
            events,
            vec![TableEvent::StatusUpdated(TableStatus::SortUnavailable)]
        );
    }

    #[test]
    fn select_all_uses_visible_rows_only() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();
        state.dispatch(&table, &rows, stage_filter("won"));

        state.dispatch(&table, &rows, TableCommand::SelectAll(true));
        let selected = state.selection().ids().collect::<Vec<_>>();
        assert_eq!(selected, vec!["deal-3", "deal-6", "deal-9"]);
        assert_eq!(state.check_state(&table, &rows), CheckState::Checked);

        state.dispatch(&table, &rows, TableCommand::ClearFilters);
        assert_eq!(state.check_state(&table, &rows), CheckState::Indeterminate);

        state.dispatch(&table, &rows, TableCommand::SelectAll(false));
        assert_eq!(state.check_state(&table, &rows), CheckState::Unchecked);
    }

    #[test]
    fn hidden_rows_cannot_be_checked_but_can_be_unchecked() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();
        state.dispatch(
            &table,
            &rows,
            TableCommand::SelectOne {
                id: "deal-1".to_owned(),
                checked: true,
            },
        );
        state.dispatch(&table, &rows, stage_filter("won"));

        let events = state.dispatch(
            &table,
            &rows,
            TableCommand::SelectOne {
                id: "deal-2".to_owned(),
                checked: true,
            },
        );
        assert_eq!(
            events,
            vec![TableEvent::StatusUpdated(TableStatus::RowNotVisible)]
        );

        state.dispatch(
            &table,
            &rows,
            TableCommand::SelectOne {
                id: "deal-1".to_owned(),
                checked: false,
            },
        );
        assert!(state.selection().is_empty());
    }

    #[test]
    fn visible_selection_skips_filtered_out_rows() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();
        state.dispatch(&table, &rows, TableCommand::SelectAll(true));
        assert_eq!(state.visible_selection(&table, &rows).len(), 10);

        state.dispatch(&table, &rows, stage_filter("won"));
        assert_eq!(state.selection().len(), 10);
        assert_eq!(
            state.visible_selection(&table, &rows),
            vec!["deal-3", "deal-6", "deal-9"]
        );
    }

    #[test]
    fn show_row_turns_to_its_page() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::new(4);

        let events = state.show_row(&table, &rows, 9);
        assert_eq!(events, vec![TableEvent::PageChanged(2)]);
        assert_eq!(state.pagination().page_index(), 2);

        assert!(state.show_row(&table, &rows, 8).is_empty());

        assert!(state.show_row(&table, &rows, 40).is_empty());
        assert_eq!(state.pagination().page_index(), 2);

        state.show_row(&table, &rows, 0);
        assert_eq!(state.pagination().page_index(), 0);
    }

    #[test]
    fn filter_on_unfilterable_column_is_refused() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();
        let events = state.dispatch(
            &table,
            &rows,
            TableCommand::SetFilter {
                column_id: "note".to_owned(),
                filter: FilterValue::new(Operator::Contains, "x"),
            },
        );
        assert_eq!(
            events,
            vec![TableEvent::StatusUpdated(TableStatus::FilterUnavailable)]
        );
        assert!(state.filters().is_empty());
    }

    #[test]
    fn filter_summary_uses_option_labels() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::default();
        let events = state.dispatch(&table, &rows, stage_filter("won"));
        assert_eq!(
            events,
            vec![
                TableEvent::FiltersChanged(1),
                TableEvent::StatusUpdated(TableStatus::FilterApplied("Stage = Won".to_owned())),
            ]
        );
        assert_eq!(state.visible(&table, &rows).len(), 3);
    }

    #[test]
    fn paging_and_filter_reset() {
        let (table, rows) = (table(), deals());
        let mut state = TableState::new(4);

        state.dispatch(&table, &rows, TableCommand::NextPage);
        state.dispatch(&table, &rows, TableCommand::NextPage);
        assert_eq!(state.pagination().page_index(), 2);
        let page = state.page(&table, &rows);
        assert_eq!(page.iter().map(|deal| deal.id).collect::<Vec<_>>(), vec![9, 10]);

        let events = state.dispatch(&table, &rows, TableCommand::NextPage);
        assert_eq!(events, vec![TableEvent::StatusUpdated(TableStatus::LastPage)]);

        state.dispatch(&table, &rows, stage_filter("won"));
        assert_eq!(state.pagination().page_index(), 0);

        let events = state.dispatch(&table, &rows, TableCommand::PrevPage);
        assert_eq!(events, vec![TableEvent::StatusUpdated(TableStatus::FirstPage)]);
    }

    #[test]
    fn page_is_clamped_when_rows_disappear() {
        let table = table();
        let mut rows = deals();
        let mut state = TableState::new(4);
        state.dispatch(&table, &rows, TableCommand::SelectAll(true));
        state.dispatch(&table, &rows, TableCommand::NextPage);
        state.dispatch(&table, &rows, TableCommand::NextPage);

        rows.truncate(3);
        let events = state.forget_missing(&table, &rows);
        assert_eq!(
            events,
            vec![TableEvent::SelectionChanged(3), TableEvent::PageChanged(0)]
        );
        assert_eq!(state.pagination().page_index(), 0);
    }

    #[test]
    fn status_messages() {
        assert_eq!(TableStatus::Page { index: 1, count: 4 }.message(), "page 2/4");
        assert_eq!(
            TableStatus::FilterCleared("Stage".to_owned()).message(),
            "filter cleared: Stage"
        );
    }
}

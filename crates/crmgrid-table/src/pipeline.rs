// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The filter-then-sort pass over a caller-owned row slice.

use crate::column::{ColumnDef, find_column};
use crate::filter::{ActiveFilters, FilterKind, FilterValue};
use crate::predicate::{MembershipSet, apply_one_filter};
use crate::sort::{SortDirection, SortState, compare_cells};
use crate::value::CellValue;

/// Rows produced by [`filter_and_sort`]. Borrows the input; never owns rows.
#[derive(Debug)]
pub enum RowView<'a, T> {
    /// Nothing narrowed or reordered the input.
    All(&'a [T]),
    Subset(Vec<&'a T>),
}

impl<'a, T> RowView<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            Self::All(rows) => rows.len(),
            Self::Subset(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the input slice came back untouched.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::All(_))
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        match self {
            Self::All(rows) => rows.get(index),
            Self::Subset(rows) => rows.get(index).copied(),
        }
    }

    pub fn iter(&self) -> RowIter<'_, 'a, T> {
        match self {
            Self::All(rows) => RowIter::All(rows.iter()),
            Self::Subset(rows) => RowIter::Subset(rows.iter()),
        }
    }

    /// Rows `start..start + len`, clipped to the view.
    pub fn window(&self, start: usize, len: usize) -> Vec<&'a T> {
        self.iter().skip(start).take(len).collect()
    }
}

impl<'v, 'a, T> IntoIterator for &'v RowView<'a, T> {
    type Item = &'a T;
    type IntoIter = RowIter<'v, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub enum RowIter<'v, 'a, T> {
    All(std::slice::Iter<'a, T>),
    Subset(std::slice::Iter<'v, &'a T>),
}

impl<'a, T> Iterator for RowIter<'_, 'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::All(rows) => rows.next(),
            Self::Subset(rows) => rows.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::All(rows) => rows.size_hint(),
            Self::Subset(rows) => rows.size_hint(),
        }
    }
}

/// One applicable filter, resolved against its column for this pass.
struct CompiledFilter<'c, T> {
    column: &'c ColumnDef<T>,
    filter: &'c FilterValue,
    kind: FilterKind,
    membership: Option<MembershipSet>,
}

impl<T> CompiledFilter<'_, T> {
    fn matches(&self, row: &T) -> bool {
        let cell = self.column.value(row);
        match &self.membership {
            Some(set) => set.matches(&cell, self.filter.operator),
            None => apply_one_filter(&cell, self.filter, self.kind),
        }
    }
}

fn compile_filters<'c, T>(
    columns: &'c [ColumnDef<T>],
    active: &'c ActiveFilters,
) -> Vec<CompiledFilter<'c, T>> {
    let mut compiled = Vec::with_capacity(active.len());
    for (column_id, filter) in active.iter() {
        let Some(column) = find_column(columns, column_id) else {
            log::debug!("skipping filter on unknown column {column_id:?}");
            continue;
        };
        let Some(spec) = column.filter_spec() else {
            log::debug!("skipping filter on non-filterable column {column_id:?}");
            continue;
        };
        if !filter.is_complete(spec.kind) {
            log::debug!(
                "ignoring incomplete {} filter on {column_id:?}",
                filter.operator.as_str()
            );
            continue;
        }
        let membership = match spec.kind {
            FilterKind::Multiselect => MembershipSet::from_operand(&filter.value),
            _ => None,
        };
        compiled.push(CompiledFilter {
            column,
            filter,
            kind: spec.kind,
            membership,
        });
    }
    compiled
}

fn resolve_sort<'c, T>(
    columns: &'c [ColumnDef<T>],
    sort: &SortState,
) -> Option<(&'c ColumnDef<T>, SortDirection)> {
    let spec = sort.as_ref()?;
    match find_column(columns, &spec.column_id) {
        Some(column) if column.sortable => Some((column, spec.direction)),
        Some(_) => {
            log::debug!("column {:?} is not sortable", spec.column_id);
            None
        }
        None => {
            log::debug!("skipping sort on unknown column {:?}", spec.column_id);
            None
        }
    }
}

/// Filters `rows` by every applicable entry of `active` (AND-combined), then
/// stably sorts by `sort`. Stale column ids and incomplete `between` filters
/// are skipped. Returns [`RowView::All`] without allocating when neither a
/// filter nor a sort applies.
pub fn filter_and_sort<'a, T>(
    rows: &'a [T],
    columns: &[ColumnDef<T>],
    active: &ActiveFilters,
    sort: &SortState,
) -> RowView<'a, T> {
    let filters = if active.is_empty() {
        Vec::new()
    } else {
        compile_filters(columns, active)
    };
    let sort = resolve_sort(columns, sort);

    if filters.is_empty() && sort.is_none() {
        return RowView::All(rows);
    }

    let mut visible = rows
        .iter()
        .filter(|row| filters.iter().all(|filter| filter.matches(row)))
        .collect::<Vec<_>>();

    if let Some((column, direction)) = sort {
        match column.comparator() {
            Some(comparator) => visible.sort_by(|left, right| match direction {
                SortDirection::Asc => comparator(*left, *right),
                SortDirection::Desc => comparator(*right, *left),
            }),
            None => {
                let mut keyed = visible
                    .into_iter()
                    .map(|row| (column.value(row), row))
                    .collect::<Vec<(CellValue, &T)>>();
                keyed.sort_by(|(left, _), (right, _)| compare_cells(left, right, direction));
                visible = keyed.into_iter().map(|(_, row)| row).collect();
            }
        }
    }

    RowView::Subset(visible)
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::fmt;

use crate::filter::ColumnFilter;
use crate::value::CellValue;

pub type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;
pub type Formatter<T> = Box<dyn Fn(&T) -> String>;
pub type RowIdAccessor<T> = Box<dyn Fn(&T) -> String>;

/// One column of a table over rows of type `T`.
pub struct ColumnDef<T> {
    pub id: String,
    pub header: String,
    accessor: Accessor<T>,
    sort_comparator: Option<Comparator<T>>,
    formatter: Option<Formatter<T>>,
    pub sortable: bool,
    pub filterable: bool,
    pub filter: Option<ColumnFilter>,
}

impl<T> ColumnDef<T> {
    /// A plain column: not sortable, not filterable.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Box::new(accessor),
            sort_comparator: None,
            formatter: None,
            sortable: false,
            filterable: false,
            filter: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn sort_with(mut self, comparator: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.sortable = true;
        self.sort_comparator = Some(Box::new(comparator));
        self
    }

    pub fn filter(mut self, filter: ColumnFilter) -> Self {
        self.filterable = true;
        self.filter = Some(filter);
        self
    }

    pub fn display_with(mut self, formatter: impl Fn(&T) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn comparator(&self) -> Option<&Comparator<T>> {
        self.sort_comparator.as_ref()
    }

    /// The filter spec, if this column takes part in filtering.
    pub fn filter_spec(&self) -> Option<&ColumnFilter> {
        if self.filterable {
            self.filter.as_ref()
        } else {
            None
        }
    }

    pub fn display(&self, row: &T) -> String {
        match &self.formatter {
            Some(formatter) => formatter(row),
            None => self.value(row).display(),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("custom_sort", &self.sort_comparator.is_some())
            .field("filterable", &self.filterable)
            .field("filter", &self.filter)
            .finish()
    }
}

/// Columns plus the row identity used for selection.
pub struct TableDef<T> {
    pub title: String,
    pub columns: Vec<ColumnDef<T>>,
    row_id: RowIdAccessor<T>,
}

impl<T> TableDef<T> {
    pub fn new(
        title: impl Into<String>,
        columns: Vec<ColumnDef<T>>,
        row_id: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            columns,
            row_id: Box::new(row_id),
        }
    }

    pub fn row_id(&self, row: &T) -> String {
        (self.row_id)(row)
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDef<T>> {
        find_column(&self.columns, column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == column_id)
    }
}

impl<T> fmt::Debug for TableDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableDef")
            .field("title", &self.title)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

pub(crate) fn find_column<'a, T>(
    columns: &'a [ColumnDef<T>],
    column_id: &str,
) -> Option<&'a ColumnDef<T>> {
    columns.iter().find(|column| column.id == column_id)
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod column;
pub mod draft;
pub mod filter;
pub mod pagination;
pub mod pipeline;
pub mod predicate;
pub mod selection;
pub mod sort;
pub mod state;
pub mod validation;
pub mod value;

pub use column::{ColumnDef, TableDef};
pub use draft::{DraftInput, FilterDraft};
pub use filter::{
    ActiveFilters, ColumnFilter, FilterKind, FilterOperand, FilterOption, FilterValue, Operator,
    describe_filter,
};
pub use pagination::{DEFAULT_PAGE_SIZE, Pagination};
pub use pipeline::{RowIter, RowView, filter_and_sort};
pub use predicate::{MembershipSet, apply_one_filter};
pub use selection::Selection;
pub use sort::{SortDirection, SortSpec, SortState, compare_cells, next_sort_state};
pub use state::{CheckState, TableCommand, TableEvent, TableState, TableStatus};
pub use validation::{ValidationError, ValidationResult};
pub use value::CellValue;

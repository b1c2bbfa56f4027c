// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Asc => " ↑",
            Self::Desc => " ↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// `None` keeps input order.
pub type SortState = Option<SortSpec>;

/// Header click on `column_id`: unsorted, then asc, then desc, then unsorted.
/// A column other than the current one always starts at asc.
pub fn next_sort_state(current: &SortState, column_id: &str) -> SortState {
    match current {
        Some(spec) if spec.column_id == column_id => match spec.direction {
            SortDirection::Asc => Some(SortSpec::desc(column_id)),
            SortDirection::Desc => None,
        },
        _ => Some(SortSpec::asc(column_id)),
    }
}

/// Default typed ordering for one column. `Null` is greater than every
/// defined value in both directions.
/// Cells with nothing to order by: `Null`, and a number that is NaN.
fn is_unordered(cell: &CellValue) -> bool {
    match cell {
        CellValue::Null => true,
        CellValue::Number(value) => value.is_nan(),
        _ => false,
    }
}

/// Unordered cells go last in both directions.
pub fn compare_cells(left: &CellValue, right: &CellValue, direction: SortDirection) -> Ordering {
    match (is_unordered(left), is_unordered(right)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Asc => left.cmp_value(right),
            SortDirection::Desc => right.cmp_value(left),
        },
    }
}

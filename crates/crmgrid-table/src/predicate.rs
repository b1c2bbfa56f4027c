// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Single-cell filter predicates, one per filter kind.
//!
//! Every predicate is total: a value that does not coerce for its kind, an
//! operator the kind does not define, or a `Null` cell yields `false` rather
//! than an error. Boolean filters are the one kind where `Null` takes part,
//! as `false`.

use std::collections::HashSet;

use crate::filter::{FilterKind, FilterOperand, FilterValue, Operator};
use crate::value::{CellValue, MemberKey};

/// Evaluates one filter against one cell.
pub fn apply_one_filter(cell: &CellValue, filter: &FilterValue, kind: FilterKind) -> bool {
    match kind {
        FilterKind::Text => matches_text(cell, filter),
        FilterKind::Number => matches_number(cell, filter),
        FilterKind::Date | FilterKind::DateRange => matches_date(cell, filter),
        FilterKind::Select => matches_select(cell, filter),
        FilterKind::Multiselect => MembershipSet::from_operand(&filter.value)
            .is_some_and(|set| set.matches(cell, filter.operator)),
        FilterKind::Boolean => matches_boolean(cell, filter),
    }
}

pub fn matches_text(cell: &CellValue, filter: &FilterValue) -> bool {
    let Some(haystack) = cell.to_text() else {
        return false;
    };
    let haystack = haystack.to_lowercase();
    let needle = operand_text(&filter.value).to_lowercase();

    match filter.operator {
        Operator::Contains => haystack.contains(&needle),
        Operator::NotContains => !haystack.contains(&needle),
        Operator::Equals => haystack == needle,
        Operator::StartsWith => haystack.starts_with(&needle),
        Operator::EndsWith => haystack.ends_with(&needle),
        _ => false,
    }
}

pub fn matches_number(cell: &CellValue, filter: &FilterValue) -> bool {
    let Some(cell) = cell.to_number() else {
        return false;
    };
    let Some(value) = filter.value.as_one().and_then(CellValue::to_number) else {
        return false;
    };

    match filter.operator {
        Operator::Equals => cell == value,
        Operator::NotEquals => cell != value,
        Operator::GreaterThan => cell > value,
        Operator::LessThan => cell < value,
        Operator::Between => filter
            .value2
            .as_ref()
            .and_then(CellValue::to_number)
            .is_some_and(|high| value <= cell && cell <= high),
        _ => false,
    }
}

pub fn matches_date(cell: &CellValue, filter: &FilterValue) -> bool {
    let Some(cell) = cell.to_calendar_date() else {
        return false;
    };
    let Some(value) = filter
        .value
        .as_one()
        .and_then(CellValue::to_calendar_date)
    else {
        return false;
    };

    match filter.operator {
        Operator::Equals => cell == value,
        Operator::Before => cell < value,
        Operator::After => cell > value,
        Operator::Between => filter
            .value2
            .as_ref()
            .and_then(CellValue::to_calendar_date)
            .is_some_and(|high| value <= cell && cell <= high),
        _ => false,
    }
}

pub fn matches_select(cell: &CellValue, filter: &FilterValue) -> bool {
    if cell.is_null() || filter.operator != Operator::Equals {
        return false;
    }
    filter.value.as_one().is_some_and(|value| value == cell)
}

pub fn matches_boolean(cell: &CellValue, filter: &FilterValue) -> bool {
    if filter.operator != Operator::Equals {
        return false;
    }
    let wanted = match &filter.value {
        FilterOperand::One(value) => value.is_truthy(),
        FilterOperand::Many(_) => true,
    };
    cell.is_truthy() == wanted
}

/// Precomputed member set of an `in` filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MembershipSet {
    members: HashSet<MemberKey>,
}

impl MembershipSet {
    /// `None` when the operand is not a list.
    pub fn from_operand(operand: &FilterOperand) -> Option<Self> {
        let values = operand.as_many()?;
        Some(Self {
            members: values.iter().filter_map(CellValue::member_key).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, cell: &CellValue) -> bool {
        cell.member_key()
            .is_some_and(|key| self.members.contains(&key))
    }

    pub fn matches(&self, cell: &CellValue, operator: Operator) -> bool {
        operator == Operator::In && self.contains(cell)
    }
}

fn operand_text(operand: &FilterOperand) -> String {
    match operand {
        FilterOperand::One(value) => value.display(),
        FilterOperand::Many(values) => values
            .iter()
            .map(CellValue::display)
            .collect::<Vec<_>>()
            .join(","),
    }
}

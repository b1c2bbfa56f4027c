// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Form-local state of one column's filter popover.

use std::collections::BTreeSet;

use crate::filter::{ColumnFilter, FilterKind, FilterOperand, FilterValue, Operator};
use crate::validation::{ValidationError, parse_date, parse_decimal};
use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftInput {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    spec: ColumnFilter,
    operator: Operator,
    pub input: String,
    pub input2: String,
    pub focus: DraftInput,
    pub cursor: usize,
    chosen: BTreeSet<usize>,
    pub flag: bool,
}

impl FilterDraft {
    /// Starts from `existing` when the column already has a filter.
    pub fn new(spec: &ColumnFilter, existing: Option<&FilterValue>) -> Self {
        let mut draft = Self {
            spec: spec.clone(),
            operator: spec.default_operator,
            input: String::new(),
            input2: String::new(),
            focus: DraftInput::First,
            cursor: 0,
            chosen: BTreeSet::new(),
            flag: true,
        };
        if let Some(existing) = existing {
            draft.load(existing);
        }
        draft
    }

    fn load(&mut self, existing: &FilterValue) {
        if self.spec.allowed_operators.contains(&existing.operator) {
            self.operator = existing.operator;
        }
        match &existing.value {
            FilterOperand::One(value) => {
                self.input = value.display();
                self.flag = value.is_truthy();
                if let Some(index) = self.option_index(value) {
                    self.chosen.insert(index);
                    self.cursor = index;
                }
            }
            FilterOperand::Many(values) => {
                let chosen = values
                    .iter()
                    .filter_map(|value| self.option_index(value))
                    .collect::<Vec<_>>();
                self.chosen.extend(chosen);
                if let Some(first) = self.chosen.first() {
                    self.cursor = *first;
                }
            }
        }
        if let Some(value2) = &existing.value2 {
            self.input2 = value2.display();
        }
    }

    fn option_index(&self, value: &CellValue) -> Option<usize> {
        self.spec
            .options
            .iter()
            .position(|option| &option.value == value)
    }

    pub fn spec(&self) -> &ColumnFilter {
        &self.spec
    }

    pub const fn kind(&self) -> FilterKind {
        self.spec.kind
    }

    pub const fn operator(&self) -> Operator {
        self.operator
    }

    pub fn cycle_operator(&mut self) -> Operator {
        let operators = &self.spec.allowed_operators;
        let current = operators
            .iter()
            .position(|operator| *operator == self.operator)
            .unwrap_or(0);
        if let Some(next) = operators.get((current + 1) % operators.len().max(1)) {
            self.operator = *next;
        }
        if !self.operator.takes_second_value() {
            self.focus = DraftInput::First;
        }
        self.operator
    }

    pub fn takes_text_input(&self) -> bool {
        matches!(
            self.spec.kind,
            FilterKind::Text | FilterKind::Number | FilterKind::Date | FilterKind::DateRange
        )
    }

    pub fn active_input_mut(&mut self) -> &mut String {
        match self.focus {
            DraftInput::First => &mut self.input,
            DraftInput::Second => &mut self.input2,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if self.takes_text_input() {
            self.active_input_mut().push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        self.active_input_mut().pop();
    }

    /// Switches between the two bounds of a `between` filter.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DraftInput::First if self.operator.takes_second_value() => DraftInput::Second,
            _ => DraftInput::First,
        };
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.spec.options.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Space in the popover: picks an option or flips the boolean flag.
    pub fn toggle_choice(&mut self) {
        match self.spec.kind {
            FilterKind::Select => {
                if self.chosen.contains(&self.cursor) {
                    self.chosen.clear();
                } else {
                    self.chosen.clear();
                    self.chosen.insert(self.cursor);
                }
            }
            FilterKind::Multiselect => {
                if !self.chosen.remove(&self.cursor) {
                    self.chosen.insert(self.cursor);
                }
            }
            FilterKind::Boolean => self.flag = !self.flag,
            FilterKind::Text | FilterKind::Number | FilterKind::Date | FilterKind::DateRange => {}
        }
    }

    pub fn is_chosen(&self, index: usize) -> bool {
        self.chosen.contains(&index)
    }

    /// The filter to apply, or `None` when the draft is empty and applying it
    /// should clear the column. Unparseable input is kept as text so the
    /// predicate sees it and rejects rows, as a typed filter would.
    pub fn to_filter(&self) -> Option<FilterValue> {
        match self.spec.kind {
            FilterKind::Text => {
                if self.input.trim().is_empty() {
                    return None;
                }
                Some(FilterValue::new(self.operator, self.input.clone()))
            }
            FilterKind::Number => self.bounded(typed_number),
            FilterKind::Date | FilterKind::DateRange => self.bounded(typed_date),
            FilterKind::Select => {
                let index = self.chosen.first()?;
                let option = self.spec.options.get(*index)?;
                Some(FilterValue::new(Operator::Equals, option.value.clone()))
            }
            FilterKind::Multiselect => {
                let values = self
                    .chosen
                    .iter()
                    .filter_map(|index| self.spec.options.get(*index))
                    .map(|option| option.value.clone())
                    .collect::<Vec<_>>();
                if values.is_empty() {
                    return None;
                }
                Some(FilterValue::any_of(values))
            }
            FilterKind::Boolean => Some(FilterValue::new(Operator::Equals, self.flag)),
        }
    }

    fn bounded(&self, typed: fn(&str) -> CellValue) -> Option<FilterValue> {
        if self.input.trim().is_empty() {
            return None;
        }
        let mut filter = FilterValue::new(self.operator, typed(&self.input));
        if self.operator.takes_second_value() && !self.input2.trim().is_empty() {
            filter.value2 = Some(typed(&self.input2));
        }
        Some(filter)
    }

    /// What is wrong with the draft, if anything. Advisory only.
    pub fn hint(&self) -> Option<ValidationError> {
        match self.spec.kind {
            FilterKind::Text => self
                .input
                .trim()
                .is_empty()
                .then_some(ValidationError::MissingValue),
            FilterKind::Number => self.bounds_hint(|raw| parse_decimal(raw).map(|_| ())),
            FilterKind::Date | FilterKind::DateRange => {
                self.bounds_hint(|raw| parse_date(raw).map(|_| ()))
            }
            FilterKind::Select | FilterKind::Multiselect => self
                .chosen
                .is_empty()
                .then_some(ValidationError::NoOptionChosen),
            FilterKind::Boolean => None,
        }
    }

    fn bounds_hint(
        &self,
        check: impl Fn(&str) -> Result<(), ValidationError>,
    ) -> Option<ValidationError> {
        if self.input.trim().is_empty() {
            return Some(ValidationError::MissingValue);
        }
        if let Err(error) = check(&self.input) {
            return Some(error);
        }
        if !self.operator.takes_second_value() {
            return None;
        }
        if self.input2.trim().is_empty() {
            return Some(ValidationError::MissingSecondValue);
        }
        check(&self.input2).err()
    }
}

fn typed_number(raw: &str) -> CellValue {
    parse_decimal(raw).map_or_else(|_| CellValue::text(raw.trim()), CellValue::Number)
}

fn typed_date(raw: &str) -> CellValue {
    parse_date(raw).map_or_else(|_| CellValue::text(raw.trim()), CellValue::Date)
}

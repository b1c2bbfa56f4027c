// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    Text,
    Number,
    Date,
    DateRange,
    Select,
    Multiselect,
    Boolean,
}

impl FilterKind {
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Number,
        Self::Date,
        Self::DateRange,
        Self::Select,
        Self::Multiselect,
        Self::Boolean,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateRange => "dateRange",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Boolean => "boolean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "dateRange" => Some(Self::DateRange),
            "select" => Some(Self::Select),
            "multiselect" => Some(Self::Multiselect),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Operators valid for this kind, in the order the filter UI offers them.
    pub const fn default_operators(self) -> &'static [Operator] {
        match self {
            Self::Text => &[
                Operator::Contains,
                Operator::NotContains,
                Operator::Equals,
                Operator::StartsWith,
                Operator::EndsWith,
            ],
            Self::Number => &[
                Operator::Equals,
                Operator::NotEquals,
                Operator::GreaterThan,
                Operator::LessThan,
                Operator::Between,
            ],
            Self::Date | Self::DateRange => &[
                Operator::Equals,
                Operator::Before,
                Operator::After,
                Operator::Between,
            ],
            Self::Select | Self::Boolean => &[Operator::Equals],
            Self::Multiselect => &[Operator::In],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    Between,
    Before,
    After,
    In,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Between => "between",
            Self::Before => "before",
            Self::After => "after",
            Self::In => "in",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contains" => Some(Self::Contains),
            "notContains" => Some(Self::NotContains),
            "equals" => Some(Self::Equals),
            "notEquals" => Some(Self::NotEquals),
            "startsWith" => Some(Self::StartsWith),
            "endsWith" => Some(Self::EndsWith),
            "greaterThan" => Some(Self::GreaterThan),
            "lessThan" => Some(Self::LessThan),
            "between" => Some(Self::Between),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "does not contain",
            Self::Equals => "is",
            Self::NotEquals => "is not",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
            Self::Between => "between",
            Self::Before => "before",
            Self::After => "after",
            Self::In => "is any of",
        }
    }

    /// Compact symbol for chips and status lines.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Contains => "~",
            Self::NotContains => "!~",
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Between => "in",
            Self::Before => "<",
            Self::After => ">",
            Self::In => "in",
        }
    }

    pub const fn takes_second_value(self) -> bool {
        matches!(self, Self::Between)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterOperand {
    Many(Vec<CellValue>),
    One(CellValue),
}

impl FilterOperand {
    pub fn as_one(&self) -> Option<&CellValue> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[CellValue]> {
        match self {
            Self::Many(values) => Some(values),
            Self::One(_) => None,
        }
    }
}

impl From<CellValue> for FilterOperand {
    fn from(value: CellValue) -> Self {
        Self::One(value)
    }
}

impl From<Vec<CellValue>> for FilterOperand {
    fn from(values: Vec<CellValue>) -> Self {
        Self::Many(values)
    }
}

/// One applied filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    pub operator: Operator,
    pub value: FilterOperand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<CellValue>,
}

impl FilterValue {
    pub fn new(operator: Operator, value: impl Into<CellValue>) -> Self {
        Self::with_operand(operator, FilterOperand::One(value.into()))
    }

    pub fn with_operand(operator: Operator, value: FilterOperand) -> Self {
        Self {
            operator,
            value,
            value2: None,
        }
    }

    pub fn between(low: impl Into<CellValue>, high: impl Into<CellValue>) -> Self {
        Self {
            operator: Operator::Between,
            value: FilterOperand::One(low.into()),
            value2: Some(high.into()),
        }
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self {
            operator: Operator::In,
            value: FilterOperand::Many(values.into_iter().map(Into::into).collect()),
            value2: None,
        }
    }

    /// A `between` filter whose second bound is missing or does not coerce
    /// for `kind` is incomplete and must not narrow the row set.
    pub fn is_complete(&self, kind: FilterKind) -> bool {
        if !self.operator.takes_second_value() {
            return true;
        }
        let Some(value2) = &self.value2 else {
            return false;
        };
        match kind {
            FilterKind::Number => value2.to_number().is_some(),
            FilterKind::Date | FilterKind::DateRange => value2.to_calendar_date().is_some(),
            FilterKind::Text
            | FilterKind::Select
            | FilterKind::Multiselect
            | FilterKind::Boolean => !value2.is_null(),
        }
    }
}

/// Currently applied filters keyed by column id. Every entry is AND-combined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters {
    filters: BTreeMap<String, FilterValue>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        column_id: impl Into<String>,
        filter: FilterValue,
    ) -> Option<FilterValue> {
        self.filters.insert(column_id.into(), filter)
    }

    pub fn with(mut self, column_id: impl Into<String>, filter: FilterValue) -> Self {
        self.set(column_id, filter);
        self
    }

    pub fn remove(&mut self, column_id: &str) -> Option<FilterValue> {
        self.filters.remove(column_id)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get(column_id)
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.filters.contains_key(column_id)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters
            .iter()
            .map(|(column_id, filter)| (column_id.as_str(), filter))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: CellValue,
    /// Opaque identifier the shell maps to a glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Filter configuration for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub kind: FilterKind,
    pub allowed_operators: Vec<Operator>,
    pub default_operator: Operator,
    #[serde(default)]
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ColumnFilter {
    pub fn new(kind: FilterKind) -> Self {
        let allowed_operators = kind.default_operators().to_vec();
        Self {
            kind,
            default_operator: allowed_operators[0],
            allowed_operators,
            options: Vec::new(),
            placeholder: None,
            min: None,
            max: None,
        }
    }

    pub fn text() -> Self {
        Self::new(FilterKind::Text)
    }

    pub fn number() -> Self {
        Self::new(FilterKind::Number)
    }

    pub fn date() -> Self {
        Self::new(FilterKind::Date)
    }

    pub fn date_range() -> Self {
        let mut filter = Self::new(FilterKind::DateRange);
        filter.default_operator = Operator::Between;
        filter
    }

    pub fn select(options: Vec<FilterOption>) -> Self {
        Self::new(FilterKind::Select).with_options(options)
    }

    pub fn multiselect(options: Vec<FilterOption>) -> Self {
        Self::new(FilterKind::Multiselect).with_options(options)
    }

    pub fn boolean() -> Self {
        Self::new(FilterKind::Boolean)
    }

    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }

    /// Restricts the offered operators. Operators that are not valid for the
    /// kind are dropped; an empty result keeps the kind defaults.
    pub fn with_operators(mut self, operators: &[Operator]) -> Self {
        let valid = self.kind.default_operators();
        let kept = operators
            .iter()
            .copied()
            .filter(|operator| valid.contains(operator))
            .collect::<Vec<_>>();
        if !kept.is_empty() {
            if !kept.contains(&self.default_operator) {
                self.default_operator = kept[0];
            }
            self.allowed_operators = kept;
        }
        self
    }

    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        if self.allowed_operators.contains(&operator) {
            self.default_operator = operator;
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn option_label(&self, value: &CellValue) -> Option<&str> {
        self.options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// Short human summary of an applied filter, e.g. `status = Open`.
pub fn describe_filter(
    header: &str,
    spec: Option<&ColumnFilter>,
    filter: &FilterValue,
) -> String {
    let label_for = |value: &CellValue| {
        spec.and_then(|spec| spec.option_label(value))
            .map_or_else(|| value.display(), str::to_owned)
    };
    let value = match &filter.value {
        FilterOperand::One(value) => label_for(value),
        FilterOperand::Many(values) => values
            .iter()
            .map(label_for)
            .collect::<Vec<_>>()
            .join(", "),
    };

    match (filter.operator, &filter.value2) {
        (Operator::Between, Some(high)) => format!("{header} {value}–{}", high.display()),
        (Operator::Between, None) => format!("{header} ≥ {value} …"),
        (Operator::In, _) => format!("{header} in [{value}]"),
        (operator, _) => format!("{header} {} {value}", operator.symbol()),
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::validation::{format_date, format_number, parse_date, parse_decimal};

/// One cell as seen by the filter and sort engine.
///
/// `Null` covers every "no value" case a row can produce; the predicates treat
/// it as never matching except where a filter kind defines otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(Date),
    DateTime(OffsetDateTime),
    List(Vec<CellValue>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date(_) | Self::DateTime(_))
    }

    /// Numeric coercion. `None` plays the role of NaN.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(raw) => parse_decimal(raw).ok()?,
            Self::Bool(value) => {
                if *value {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Date(_) | Self::DateTime(_) => self.epoch_millis()? as f64,
            Self::Null | Self::List(_) => return None,
        };
        (!value.is_nan()).then_some(value)
    }

    /// Calendar-date coercion with the time of day dropped. Instants keep the
    /// offset they carry; bare epoch milliseconds are read as UTC.
    pub fn to_calendar_date(&self) -> Option<Date> {
        match self {
            Self::Date(date) => Some(*date),
            Self::DateTime(at) => Some(at.date()),
            Self::Text(raw) => parse_date(raw).ok().or_else(|| {
                OffsetDateTime::parse(raw.trim(), &Rfc3339)
                    .ok()
                    .map(|at| at.date())
            }),
            Self::Number(millis) => date_from_epoch_millis(*millis),
            Self::Null | Self::Bool(_) | Self::List(_) => None,
        }
    }

    /// String coercion used by text filters. `Null` has no text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Bool(value) => Some(value.to_string()),
            Self::Date(date) => Some(format_date(*date)),
            Self::DateTime(at) => at.format(&Rfc3339).ok(),
            Self::List(items) => Some(
                items
                    .iter()
                    .map(Self::display)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    pub fn display(&self) -> String {
        self.to_text().unwrap_or_default()
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => !value.is_empty(),
            Self::Date(_) | Self::DateTime(_) | Self::List(_) => true,
        }
    }

    fn epoch_millis(&self) -> Option<i64> {
        match self {
            Self::Date(date) => Some(date.midnight().assume_utc().unix_timestamp() * 1000),
            Self::DateTime(at) => Some((at.unix_timestamp_nanos() / 1_000_000) as i64),
            _ => None,
        }
    }

    /// Default ordering between two defined cells: numbers numerically
    /// (NaN after every other number), dates by instant, everything else by
    /// lowercased text.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left
                .partial_cmp(right)
                .unwrap_or_else(|| left.is_nan().cmp(&right.is_nan())),
            (left, right) if left.is_temporal() && right.is_temporal() => {
                left.epoch_millis().cmp(&right.epoch_millis())
            }
            _ => self
                .display()
                .to_lowercase()
                .cmp(&other.display().to_lowercase()),
        }
    }

    pub(crate) fn member_key(&self) -> Option<MemberKey> {
        match self {
            Self::Text(value) => Some(MemberKey::Text(value.clone())),
            Self::Number(value) if value.is_nan() => None,
            // 0 and -0 are the same member.
            Self::Number(value) if *value == 0.0 => Some(MemberKey::Number(0.0_f64.to_bits())),
            Self::Number(value) => Some(MemberKey::Number(value.to_bits())),
            Self::Bool(value) => Some(MemberKey::Bool(*value)),
            Self::Date(date) => Some(MemberKey::Date(*date)),
            Self::DateTime(at) => Some(MemberKey::Instant(at.unix_timestamp_nanos())),
            Self::Null | Self::List(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for CellValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<OffsetDateTime> for CellValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Hashable identity of a cell, used for set membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MemberKey {
    Text(String),
    Number(u64),
    Bool(bool),
    Date(Date),
    Instant(i128),
}

fn date_from_epoch_millis(millis: f64) -> Option<Date> {
    if !millis.is_finite() {
        return None;
    }
    let nanos = (millis.trunc() as i128).checked_mul(1_000_000)?;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .map(|at| at.date())
}

#[cfg(test)]
mod tests {
    use super::CellValue;
    use std::cmp::Ordering;
    use time::macros::{date, datetime};

    #[test]
    fn number_coercion() {
        assert_eq!(CellValue::Number(4.5).to_number(), Some(4.5));
        assert_eq!(CellValue::text(" 12 ").to_number(), Some(12.0));
        assert_eq!(CellValue::Bool(true).to_number(), Some(1.0));
        assert_eq!(CellValue::text("twelve").to_number(), None);
        assert_eq!(CellValue::text("").to_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).to_number(), None);
        assert_eq!(CellValue::Null.to_number(), None);
    }

    #[test]
    fn calendar_date_coercion_drops_time_of_day() {
        let expected = date!(2026 - 04 - 02);
        assert_eq!(
            CellValue::DateTime(datetime!(2026-04-02 23:59:59 +02:00)).to_calendar_date(),
            Some(expected)
        );
        assert_eq!(
            CellValue::text("2026-04-02").to_calendar_date(),
            Some(expected)
        );
        assert_eq!(
            CellValue::text("2026-04-02T08:15:00Z").to_calendar_date(),
            Some(expected)
        );
        assert_eq!(
            CellValue::Number(1_775_088_000_000.0).to_calendar_date(),
            Some(expected)
        );
        assert_eq!(CellValue::text("soon").to_calendar_date(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).to_calendar_date(), None);
    }

    #[test]
    fn text_coercion() {
        assert_eq!(CellValue::Number(3.0).to_text().as_deref(), Some("3"));
        assert_eq!(CellValue::Bool(false).to_text().as_deref(), Some("false"));
        assert_eq!(
            CellValue::Date(date!(2026 - 01 - 05)).to_text().as_deref(),
            Some("2026-01-05")
        );
        assert_eq!(
            CellValue::List(vec!["a".into(), CellValue::Number(2.0)])
                .to_text()
                .as_deref(),
            Some("a,2")
        );
        assert_eq!(CellValue::Null.to_text(), None);
    }

    #[test]
    fn truthiness_follows_loose_boolean_rules() {
        assert!(!CellValue::Null.is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Number(f64::NAN).is_truthy());
        assert!(!CellValue::text("").is_truthy());
        assert!(CellValue::text("no").is_truthy());
        assert!(CellValue::List(Vec::new()).is_truthy());
    }

    #[test]
    fn cmp_value_orders_by_type() {
        assert_eq!(
            CellValue::Number(9.0).cmp_value(&CellValue::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::text("9").cmp_value(&CellValue::text("10")),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::text("apple").cmp_value(&CellValue::text("Banana")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Date(date!(2026 - 01 - 02))
                .cmp_value(&CellValue::DateTime(datetime!(2026-01-01 12:00 UTC))),
            Ordering::Greater
        );
        let nan = CellValue::Number(f64::NAN);
        assert_eq!(nan.cmp_value(&CellValue::Number(1e9)), Ordering::Greater);
        assert_eq!(CellValue::Number(-1e9).cmp_value(&nan), Ordering::Less);
        assert_eq!(nan.cmp_value(&nan), Ordering::Equal);
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
        assert_eq!(CellValue::from(Some(5_i64)), CellValue::Number(5.0));
    }

    #[test]
    fn member_keys_treat_signed_zero_as_equal() {
        assert_eq!(
            CellValue::Number(0.0).member_key(),
            CellValue::Number(-0.0).member_key()
        );
        assert!(CellValue::Number(f64::NAN).member_key().is_none());
    }
}

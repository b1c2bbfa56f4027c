// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Column definitions each list view hands to the table engine.

use crmgrid_table::{ColumnDef, ColumnFilter, FilterOption, Operator, TableDef};

use crate::model::{
    Activity, ActivityKind, ActivityStatus, Lead, LeadSource, LeadStatus, Order, OrderStatus,
    Quote, QuoteStatus,
};
use crate::money::{format_cents, format_optional_cents};

fn units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn yes_blank(value: bool) -> String {
    if value { "yes" } else { "" }.to_owned()
}

pub fn lead_status_options() -> Vec<FilterOption> {
    LeadStatus::ALL
        .iter()
        .map(|status| FilterOption::new(status.label(), status.as_str()).with_icon(status.icon()))
        .collect()
}

pub fn lead_source_options() -> Vec<FilterOption> {
    LeadSource::ALL
        .iter()
        .map(|source| FilterOption::new(source.label(), source.as_str()))
        .collect()
}

pub fn activity_kind_options() -> Vec<FilterOption> {
    ActivityKind::ALL
        .iter()
        .map(|kind| FilterOption::new(kind.label(), kind.as_str()).with_icon(kind.icon()))
        .collect()
}

pub fn activity_status_options() -> Vec<FilterOption> {
    ActivityStatus::ALL
        .iter()
        .map(|status| FilterOption::new(status.label(), status.as_str()))
        .collect()
}

pub fn order_status_options() -> Vec<FilterOption> {
    OrderStatus::ALL
        .iter()
        .map(|status| FilterOption::new(status.label(), status.as_str()).with_icon(status.icon()))
        .collect()
}

pub fn quote_status_options() -> Vec<FilterOption> {
    QuoteStatus::ALL
        .iter()
        .map(|status| FilterOption::new(status.label(), status.as_str()))
        .collect()
}

pub fn lead_table() -> TableDef<Lead> {
    TableDef::new(
        "Leads",
        vec![
            ColumnDef::new("name", "Name", |lead: &Lead| lead.name.as_str().into())
                .sortable()
                .filter(ColumnFilter::text().with_placeholder("name")),
            ColumnDef::new("company", "Company", |lead: &Lead| {
                lead.company.as_str().into()
            })
            .sortable()
            .filter(ColumnFilter::text()),
            ColumnDef::new("email", "Email", |lead: &Lead| lead.email.clone().into()).filter(
                ColumnFilter::text().with_operators(&[
                    Operator::Contains,
                    Operator::EndsWith,
                    Operator::Equals,
                ]),
            ),
            ColumnDef::new("status", "Status", |lead: &Lead| lead.status.as_str().into())
                .sort_with(|left: &Lead, right: &Lead| {
                    (left.status as u8).cmp(&(right.status as u8))
                })
                .filter(ColumnFilter::select(lead_status_options()))
                .display_with(|lead: &Lead| lead.status.label().to_owned()),
            ColumnDef::new("source", "Source", |lead: &Lead| lead.source.as_str().into())
                .sortable()
                .filter(ColumnFilter::multiselect(lead_source_options()))
                .display_with(|lead: &Lead| lead.source.label().to_owned()),
            ColumnDef::new("value", "Value", |lead: &Lead| {
                lead.value_cents.map(units).into()
            })
            .sortable()
            .filter(ColumnFilter::number().with_bounds(Some(0.0), None))
            .display_with(|lead: &Lead| format_optional_cents(lead.value_cents)),
            ColumnDef::new("created", "Created", |lead: &Lead| lead.created_on.into())
                .sortable()
                .filter(ColumnFilter::date()),
            ColumnDef::new("last_contact", "Last contact", |lead: &Lead| {
                lead.last_contacted_on.into()
            })
            .sortable()
            .filter(ColumnFilter::date_range()),
            ColumnDef::new("hot", "Hot", |lead: &Lead| lead.hot.into())
                .filter(ColumnFilter::boolean())
                .display_with(|lead: &Lead| yes_blank(lead.hot)),
        ],
        |lead| lead.id.row_key(),
    )
}

pub fn activity_table() -> TableDef<Activity> {
    TableDef::new(
        "Activities",
        vec![
            ColumnDef::new("type", "Type", |activity: &Activity| {
                activity.kind.as_str().into()
            })
            .sortable()
            .filter(ColumnFilter::select(activity_kind_options()))
            .display_with(|activity: &Activity| activity.kind.label().to_owned()),
            ColumnDef::new("subject", "Subject", |activity: &Activity| {
                activity.subject.as_str().into()
            })
            .sortable()
            .filter(ColumnFilter::text()),
            ColumnDef::new("status", "Status", |activity: &Activity| {
                activity.status.as_str().into()
            })
            .sort_with(|left: &Activity, right: &Activity| {
                (left.status as u8).cmp(&(right.status as u8))
            })
            .filter(ColumnFilter::select(activity_status_options()))
            .display_with(|activity: &Activity| activity.status.label().to_owned()),
            ColumnDef::new("due", "Due", |activity: &Activity| activity.due_on.into())
                .sortable()
                .filter(ColumnFilter::date()),
            ColumnDef::new("done", "Done", |activity: &Activity| activity.is_done().into())
                .filter(ColumnFilter::boolean())
                .display_with(|activity: &Activity| yes_blank(activity.is_done())),
        ],
        |activity| activity.id.row_key(),
    )
}

pub fn order_table() -> TableDef<Order> {
    TableDef::new(
        "Orders",
        vec![
            ColumnDef::new("number", "Number", |order: &Order| order.number.as_str().into())
                .sort_with(|left: &Order, right: &Order| {
                    left.sequence()
                        .cmp(&right.sequence())
                        .then_with(|| left.number.cmp(&right.number))
                })
                .filter(ColumnFilter::text().with_operators(&[
                    Operator::Contains,
                    Operator::StartsWith,
                    Operator::Equals,
                ])),
            ColumnDef::new("customer", "Customer", |order: &Order| {
                order.customer.as_str().into()
            })
            .sortable()
            .filter(ColumnFilter::text()),
            ColumnDef::new("status", "Status", |order: &Order| order.status.as_str().into())
                .sort_with(|left: &Order, right: &Order| {
                    (left.status as u8).cmp(&(right.status as u8))
                })
                .filter(ColumnFilter::multiselect(order_status_options()))
                .display_with(|order: &Order| order.status.label().to_owned()),
            ColumnDef::new("total", "Total", |order: &Order| units(order.total_cents).into())
                .sortable()
                .filter(ColumnFilter::number().with_bounds(Some(0.0), None))
                .display_with(|order: &Order| format_cents(order.total_cents)),
            ColumnDef::new("ordered", "Ordered", |order: &Order| order.ordered_on.into())
                .sortable()
                .filter(ColumnFilter::date_range()),
            ColumnDef::new("paid", "Paid", |order: &Order| order.paid.into())
                .filter(ColumnFilter::boolean())
                .display_with(|order: &Order| yes_blank(order.paid)),
        ],
        |order| order.id.row_key(),
    )
}

pub fn quote_table() -> TableDef<Quote> {
    TableDef::new(
        "Quotes",
        vec![
            ColumnDef::new("number", "Number", |quote: &Quote| quote.number.as_str().into())
                .sortable()
                .filter(ColumnFilter::text()),
            ColumnDef::new("customer", "Customer", |quote: &Quote| {
                quote.customer.as_str().into()
            })
            .sortable()
            .filter(ColumnFilter::text()),
            ColumnDef::new("status", "Status", |quote: &Quote| quote.status.as_str().into())
                .sortable()
                .filter(ColumnFilter::select(quote_status_options()))
                .display_with(|quote: &Quote| quote.status.label().to_owned()),
            ColumnDef::new("total", "Total", |quote: &Quote| units(quote.total_cents).into())
                .sortable()
                .filter(ColumnFilter::number())
                .display_with(|quote: &Quote| format_cents(quote.total_cents)),
            ColumnDef::new("valid_until", "Valid until", |quote: &Quote| {
                quote.valid_until.into()
            })
            .sortable()
            .filter(ColumnFilter::date()),
        ],
        |quote| quote.id.row_key(),
    )
}

#[cfg(test)]
mod tests {
    use super::{activity_table, lead_table, order_table, quote_table};
    use crate::{Lead, LeadId, LeadSource, LeadStatus, Order, OrderId, OrderStatus};
    use crmgrid_table::{
        ActiveFilters, CellValue, FilterKind, FilterValue, Operator, SortSpec, TableDef,
        filter_and_sort,
    };
    use std::collections::HashSet;
    use time::macros::date;

    fn assert_well_formed<T>(table: &TableDef<T>) {
        let mut seen = HashSet::new();
        for column in &table.columns {
            assert!(seen.insert(column.id.as_str()), "duplicate column {}", column.id);
            if column.filterable {
                assert!(column.filter_spec().is_some(), "{} lacks a filter", column.id);
            }
            if let Some(spec) = column.filter_spec() {
                assert!(spec.allowed_operators.contains(&spec.default_operator));
                if matches!(spec.kind, FilterKind::Select | FilterKind::Multiselect) {
                    assert!(!spec.options.is_empty(), "{} has no options", column.id);
                }
            }
        }
    }

    #[test]
    fn every_table_is_well_formed() {
        assert_well_formed(&lead_table());
        assert_well_formed(&activity_table());
        assert_well_formed(&order_table());
        assert_well_formed(&quote_table());
    }

    fn lead(id: i64, status: LeadStatus, value_cents: Option<i64>) -> Lead {
        Lead {
            id: LeadId::new(id),
            name: format!("Lead {id}"),
            company: "Acme".to_owned(),
            email: None,
            status,
            source: LeadSource::Website,
            value_cents,
            created_on: date!(2026 - 02 - 01),
            last_contacted_on: None,
            hot: false,
        }
    }

    #[test]
    fn select_option_values_match_accessor_values() {
        let table = lead_table();
        let status = table.column("status").expect("status column");
        let spec = status.filter_spec().expect("status filter");
        let row = lead(1, LeadStatus::Qualified, None);
        let cell = status.value(&row);
        assert!(spec.options.iter().any(|option| option.value == cell));
        assert_eq!(status.display(&row), "Qualified");
    }

    #[test]
    fn lead_value_filters_in_whole_currency_units() {
        let table = lead_table();
        let rows = vec![
            lead(1, LeadStatus::New, Some(150_000)),
            lead(2, LeadStatus::New, Some(90_000)),
            lead(3, LeadStatus::New, None),
        ];
        let active =
            ActiveFilters::new().with("value", FilterValue::new(Operator::GreaterThan, "1,000"));
        let visible = filter_and_sort(&rows, &table.columns, &active, &None);
        assert_eq!(visible.iter().map(|lead| lead.id.get()).collect::<Vec<_>>(), vec![1]);
        let value = table.column("value").expect("value column");
        assert_eq!(value.display(&rows[0]), "$1,500.00");
        assert_eq!(value.value(&rows[2]), CellValue::Null);
    }

    #[test]
    fn lead_status_sorts_by_pipeline_stage() {
        let table = lead_table();
        let rows = vec![
            lead(1, LeadStatus::Won, None),
            lead(2, LeadStatus::New, None),
            lead(3, LeadStatus::Proposal, None),
        ];
        let sort = Some(SortSpec::asc("status"));
        let visible = filter_and_sort(&rows, &table.columns, &ActiveFilters::new(), &sort);
        assert_eq!(
            visible.iter().map(|lead| lead.id.get()).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn order_numbers_sort_numerically() {
        let order = |id: i64, number: &str| Order {
            id: OrderId::new(id),
            number: number.to_owned(),
            customer: "Acme".to_owned(),
            status: OrderStatus::Pending,
            total_cents: 100,
            ordered_on: date!(2026 - 03 - 01),
            paid: false,
        };
        let rows = vec![order(1, "SO-100"), order(2, "SO-99"), order(3, "SO-1000")];
        let table = order_table();
        let sort = Some(SortSpec::desc("number"));
        let visible = filter_and_sort(&rows, &table.columns, &ActiveFilters::new(), &sort);
        assert_eq!(
            visible.iter().map(|order| order.number.as_str()).collect::<Vec<_>>(),
            vec!["SO-1000", "SO-100", "SO-99"]
        );
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::Proposal,
        Self::Won,
        Self::Lost,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "qualified" => Some(Self::Qualified),
            "proposal" => Some(Self::Proposal),
            "won" => Some(Self::Won),
            "lost" => Some(Self::Lost),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::New => "sparkle",
            Self::Contacted => "phone",
            Self::Qualified => "check",
            Self::Proposal => "document",
            Self::Won => "trophy",
            Self::Lost => "cross",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    Event,
    ColdCall,
    Partner,
    Social,
}

impl LeadSource {
    pub const ALL: [Self; 6] = [
        Self::Website,
        Self::Referral,
        Self::Event,
        Self::ColdCall,
        Self::Partner,
        Self::Social,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Referral => "referral",
            Self::Event => "event",
            Self::ColdCall => "cold_call",
            Self::Partner => "partner",
            Self::Social => "social",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "website" => Some(Self::Website),
            "referral" => Some(Self::Referral),
            "event" => Some(Self::Event),
            "cold_call" => Some(Self::ColdCall),
            "partner" => Some(Self::Partner),
            "social" => Some(Self::Social),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Referral => "Referral",
            Self::Event => "Event",
            Self::ColdCall => "Cold call",
            Self::Partner => "Partner",
            Self::Social => "Social",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Task,
    Note,
}

impl ActivityKind {
    pub const ALL: [Self; 5] = [
        Self::Call,
        Self::Email,
        Self::Meeting,
        Self::Task,
        Self::Note,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Task => "task",
            Self::Note => "note",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "call" => Some(Self::Call),
            "email" => Some(Self::Email),
            "meeting" => Some(Self::Meeting),
            "task" => Some(Self::Task),
            "note" => Some(Self::Note),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Call => "Call",
            Self::Email => "Email",
            Self::Meeting => "Meeting",
            Self::Task => "Task",
            Self::Note => "Note",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Call => "phone",
            Self::Email => "mail",
            Self::Meeting => "calendar",
            Self::Task => "check",
            Self::Note => "pencil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Open,
    InProgress,
    Done,
    Cancelled,
}

impl ActivityStatus {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Done, Self::Cancelled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Done => "Done",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Pending => "clock",
            Self::Confirmed => "check",
            Self::Shipped => "truck",
            Self::Delivered => "package",
            Self::Cancelled => "cross",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Sent,
        Self::Accepted,
        Self::Rejected,
        Self::Expired,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }
}

/// The four list views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Leads,
    Activities,
    Orders,
    Quotes,
}

impl ListKind {
    pub const ALL: [Self; 4] = [Self::Leads, Self::Activities, Self::Orders, Self::Quotes];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Activities => "activities",
            Self::Orders => "orders",
            Self::Quotes => "quotes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leads" => Some(Self::Leads),
            "activities" => Some(Self::Activities),
            "orders" => Some(Self::Orders),
            "quotes" => Some(Self::Quotes),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: LeadStatus,
    pub source: LeadSource,
    #[serde(default)]
    pub value_cents: Option<i64>,
    #[serde(with = "iso_date")]
    pub created_on: Date,
    #[serde(default, with = "iso_date::option")]
    pub last_contacted_on: Option<Date>,
    #[serde(default)]
    pub hot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub subject: String,
    pub status: ActivityStatus,
    #[serde(default, with = "iso_date::option")]
    pub due_on: Option<Date>,
    #[serde(default)]
    pub lead_id: Option<LeadId>,
}

impl Activity {
    pub fn is_done(&self) -> bool {
        self.status == ActivityStatus::Done
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Display number such as `SO-1042`.
    pub number: String,
    pub customer: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    #[serde(with = "iso_date")]
    pub ordered_on: Date,
    #[serde(default)]
    pub paid: bool,
}

impl Order {
    /// Trailing digits of the order number, so `SO-99` sorts before `SO-100`.
    pub fn sequence(&self) -> Option<u64> {
        trailing_number(&self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub number: String,
    pub customer: String,
    pub status: QuoteStatus,
    pub total_cents: i64,
    #[serde(default, with = "iso_date::option")]
    pub valid_until: Option<Date>,
}

fn trailing_number(value: &str) -> Option<u64> {
    let start = value.trim_end_matches(|ch: char| ch.is_ascii_digit()).len();
    value[start..].parse().ok()
}

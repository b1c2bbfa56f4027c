// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crmgrid_crm::{
    Activity, ActivityId, ActivityKind, ActivityStatus, CrmDataset, Lead, LeadId, LeadSource,
    LeadStatus, Order, OrderId, OrderStatus, Quote, QuoteId, QuoteStatus,
};
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const COMPANY_STEMS: [&str; 14] = [
    "Summit",
    "Harbor",
    "Northwind",
    "Bluebird",
    "Granite",
    "Cascade",
    "Meridian",
    "Keystone",
    "Evergreen",
    "Lakeside",
    "Pioneer",
    "Redwood",
    "Silverline",
    "Orchard",
];
const COMPANY_SUFFIXES: [&str; 7] = [
    "Labs",
    "Logistics",
    "Foods",
    "Health",
    "Systems",
    "Partners",
    "Outfitters",
];

const ACTIVITY_VERBS: [&str; 8] = [
    "Follow up with",
    "Call",
    "Send proposal to",
    "Demo for",
    "Check in with",
    "Renewal talk with",
    "Intro meeting with",
    "Pricing review for",
];

const REFERENCE_START: Date = date!(2026 - 01 - 01);
const REFERENCE_DAYS: i64 = 365;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    /// True with probability `percent`/100.
    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Seeded generator of plausible CRM records. Same seed, same records.
#[derive(Debug, Clone)]
pub struct CrmFaker {
    rng: DeterministicRng,
    seed: u64,
    next_id: i64,
}

impl CrmFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            next_id: 1,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn lead(&mut self) -> Lead {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let company = self.company();
        let status = self.pick_copy(&LeadStatus::ALL);
        let created_on = self.date();
        let last_contacted_on = (status != LeadStatus::New)
            .then(|| created_on.saturating_add(Duration::days(self.int_range(1, 60))));
        let email = self.rng.chance(85).then(|| {
            format!(
                "{}.{}@{}.example",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase(),
                company
                    .split_whitespace()
                    .next()
                    .unwrap_or("mail")
                    .to_ascii_lowercase(),
            )
        });

        Lead {
            id: LeadId::new(self.take_id()),
            name: format!("{first} {last}"),
            company,
            email,
            status,
            source: self.pick_copy(&LeadSource::ALL),
            value_cents: self
                .rng
                .chance(80)
                .then(|| self.int_range(5, 900) * 10_000),
            created_on,
            last_contacted_on,
            hot: self.rng.chance(20),
        }
    }

    pub fn activity(&mut self) -> Activity {
        let verb = self.pick(&ACTIVITY_VERBS);
        let company = self.company();
        Activity {
            id: ActivityId::new(self.take_id()),
            kind: self.pick_copy(&ActivityKind::ALL),
            subject: format!("{verb} {company}"),
            status: self.pick_copy(&ActivityStatus::ALL),
            due_on: self.rng.chance(75).then(|| self.date()),
            lead_id: None,
        }
    }

    pub fn order(&mut self) -> Order {
        let id = self.take_id();
        Order {
            id: OrderId::new(id),
            number: format!("SO-{}", 1000 + id),
            customer: self.company(),
            status: self.pick_copy(&OrderStatus::ALL),
            total_cents: self.int_range(2_500, 4_000_000),
            ordered_on: self.date(),
            paid: self.rng.chance(60),
        }
    }

    pub fn quote(&mut self) -> Quote {
        let id = self.take_id();
        Quote {
            id: QuoteId::new(id),
            number: format!("Q-{id:04}"),
            customer: self.company(),
            status: self.pick_copy(&QuoteStatus::ALL),
            total_cents: self.int_range(10_000, 2_500_000),
            valid_until: self.rng.chance(70).then(|| self.date()),
        }
    }

    /// `rows` records per list. Activities point at generated leads.
    pub fn dataset(&mut self, rows: usize) -> CrmDataset {
        let leads = (0..rows).map(|_| self.lead()).collect::<Vec<_>>();
        let mut activities = (0..rows).map(|_| self.activity()).collect::<Vec<_>>();
        if !leads.is_empty() {
            for activity in &mut activities {
                if self.rng.chance(70) {
                    activity.lead_id = Some(leads[self.rng.int_n(leads.len())].id);
                }
            }
        }
        let orders = (0..rows).map(|_| self.order()).collect();
        let quotes = (0..rows).map(|_| self.quote()).collect();
        CrmDataset {
            leads,
            activities,
            orders,
            quotes,
        }
    }

    pub fn date(&mut self) -> Date {
        REFERENCE_START.saturating_add(Duration::days(self.int_range(0, REFERENCE_DAYS - 1)))
    }

    fn company(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(&COMPANY_STEMS),
            self.pick(&COMPANY_SUFFIXES)
        )
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn pick_copy<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Writes `dataset` as JSON into a fresh temp dir.
pub fn temp_dataset_path(dataset: &CrmDataset) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("crm.json");
    std::fs::write(&path, dataset.to_json()?)
        .with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::{CrmFaker, temp_dataset_path};
    use crmgrid_crm::{CrmDataset, LeadStatus, ListKind};
    use std::collections::HashSet;
    use time::macros::date;

    #[test]
    fn same_seed_same_records() {
        let mut left = CrmFaker::new(42);
        let mut right = CrmFaker::new(42);
        assert_eq!(left.dataset(10), right.dataset(10));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(CrmFaker::new(0).seed(), 1);
    }

    #[test]
    fn dataset_ids_are_unique() -> anyhow::Result<()> {
        let dataset = CrmFaker::new(7).dataset(40);
        dataset.validate()?;
        for kind in ListKind::ALL {
            assert_eq!(dataset.count(kind), 40);
        }
        Ok(())
    }

    #[test]
    fn new_leads_have_no_contact_date() {
        let mut faker = CrmFaker::new(3);
        for _ in 0..200 {
            let lead = faker.lead();
            if lead.status == LeadStatus::New {
                assert!(lead.last_contacted_on.is_none());
            } else {
                let contacted = lead.last_contacted_on.expect("contact date");
                assert!(contacted > lead.created_on);
            }
        }
    }

    #[test]
    fn dates_stay_in_reference_year() {
        let mut faker = CrmFaker::new(9);
        for _ in 0..500 {
            let day = faker.date();
            assert!((date!(2026 - 01 - 01)..=date!(2026 - 12 - 31)).contains(&day));
        }
    }

    #[test]
    fn statuses_vary_across_rows() {
        let dataset = CrmFaker::new(11).dataset(60);
        let statuses = dataset
            .leads
            .iter()
            .map(|lead| lead.status)
            .collect::<HashSet<_>>();
        assert!(statuses.len() > 3);
    }

    #[test]
    fn temp_dataset_round_trips() -> anyhow::Result<()> {
        let dataset = CrmFaker::new(5).dataset(5);
        let (_dir, path) = temp_dataset_path(&dataset)?;
        assert_eq!(CrmDataset::load(&path)?, dataset);
        Ok(())
    }
}

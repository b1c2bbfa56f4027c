// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use crate::model::{Activity, Lead, ListKind, Order, Quote};

/// Every record the list views show. Each list is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrmDataset {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl CrmDataset {
    pub fn from_json(contents: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(contents).context("parse dataset JSON")?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("load dataset {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize dataset")
    }

    /// Ids must be unique within each list; selection is keyed by them.
    pub fn validate(&self) -> Result<()> {
        ensure_unique(ListKind::Leads, self.leads.iter().map(|lead| lead.id))?;
        ensure_unique(
            ListKind::Activities,
            self.activities.iter().map(|activity| activity.id),
        )?;
        ensure_unique(ListKind::Orders, self.orders.iter().map(|order| order.id))?;
        ensure_unique(ListKind::Quotes, self.quotes.iter().map(|quote| quote.id))?;
        Ok(())
    }

    pub fn count(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Leads => self.leads.len(),
            ListKind::Activities => self.activities.len(),
            ListKind::Orders => self.orders.len(),
            ListKind::Quotes => self.quotes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ListKind::ALL.iter().all(|kind| self.count(*kind) == 0)
    }

    pub fn summary(&self) -> String {
        ListKind::ALL
            .iter()
            .map(|kind| format!("{} {}", self.count(*kind), kind.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn ensure_unique<I, K>(kind: ListKind, ids: I) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash + std::fmt::Debug,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            bail!(
                "duplicate id {id:?} in {}; every record needs a distinct id",
                kind.as_str()
            );
        }
        seen.insert(id);
    }
    Ok(())
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

/// Selected row ids. Keyed by the table's row-id accessor, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked: the selection becomes exactly `visible_ids`. Unchecked: empty.
    pub fn select_all<I>(&mut self, checked: bool, visible_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ids.clear();
        if checked {
            self.ids.extend(visible_ids);
        }
    }

    /// Returns whether the selection changed.
    pub fn select_one(&mut self, id: &str, checked: bool) -> bool {
        if checked {
            self.ids.insert(id.to_owned())
        } else {
            self.ids.remove(id)
        }
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        let checked = !self.ids.contains(id);
        self.select_one(id, checked);
        checked
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids for which `keep` is false, e.g. rows that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Non-empty, same size as the visible set, and every visible id selected.
    pub fn is_all_selected<I, S>(&self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.ids.is_empty() {
            return false;
        }
        let mut visible = 0usize;
        for id in visible_ids {
            if !self.ids.contains(id.as_ref()) {
                return false;
            }
            visible += 1;
        }
        visible == self.ids.len()
    }

    /// The header checkbox's indeterminate state.
    pub fn is_some_selected<I, S>(&self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        !self.ids.is_empty() && !self.is_all_selected(visible_ids)
    }
}

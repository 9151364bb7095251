//! Per-user shift totals

use crate::shift::Shift;
use std::collections::BTreeMap;

/// Summed shift proportions per user, across every roster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTotals {
    /// Map from user name to accumulated proportion
    totals: BTreeMap<String, f64>,
}

impl UserTotals {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every detail of an attributed shift
    pub fn record(&mut self, shift: &Shift) {
        for detail in shift.details.values().flatten() {
            self.add(&detail.user, detail.proportion);
        }
    }

    pub fn add(&mut self, user: &str, proportion: f64) {
        *self.totals.entry(user.to_string()).or_default() += proportion;
    }

    /// Total for one user, `None` if they never covered a shift
    pub fn get(&self, user: &str) -> Option<f64> {
        self.totals.get(user).copied()
    }

    /// Sum over all users
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Users in name order with their totals
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(user, total)| (user.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

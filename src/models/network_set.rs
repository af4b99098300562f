//! Reconciled set of IPv4 networks.
//!
//! A [`NetworkSet`] never holds an entry that is a strict subnet of another
//! entry. It only changes through [`NetworkSet::insert`], which returns a new
//! set together with an [`InsertOutcome`] describing what happened.

use super::Ipv4Net;
use itertools::Itertools;
use std::fmt;

/// What a single insertion did to the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The candidate lies inside an existing entry; nothing changed.
    Skipped { covered_by: Ipv4Net },
    /// The candidate was added and these entries, all inside it, were removed.
    Replaced(Vec<Ipv4Net>),
    /// The candidate was added without touching anything.
    Added,
    /// The candidate was added next to entries it partially overlaps.
    AddedWithOverlapWarning(Vec<Ipv4Net>),
}

impl InsertOutcome {
    /// Human-readable reason for a skip, `None` for the other outcomes.
    pub fn reason(&self) -> Option<String> {
        match self {
            InsertOutcome::Skipped { covered_by } => {
                Some(format!("already covered by {covered_by}"))
            }
            _ => None,
        }
    }

    /// Skips and replacements mean the pass has not reached a fixpoint yet.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            InsertOutcome::Skipped { .. } | InsertOutcome::Replaced(_)
        )
    }
}

/// Ordered collection of networks with no strict containment between entries.
///
/// Entries keep insertion order; use [`NetworkSet::sorted`] for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSet {
    entries: Vec<Ipv4Net>,
}

impl NetworkSet {
    pub fn new() -> NetworkSet {
        NetworkSet {
            entries: Vec::new(),
        }
    }

    /// Insert `candidate`, returning the resulting set and what happened.
    ///
    /// `self` is left untouched so the caller can keep or drop the old value.
    pub fn insert(&self, candidate: Ipv4Net) -> (NetworkSet, InsertOutcome) {
        if let Some(covering) = self.entries.iter().find(|e| candidate.is_subnet_of(e)) {
            return (
                self.clone(),
                InsertOutcome::Skipped {
                    covered_by: *covering,
                },
            );
        }

        let (replaced, mut kept): (Vec<Ipv4Net>, Vec<Ipv4Net>) = self
            .entries
            .iter()
            .copied()
            .partition(|e| e.is_subnet_of(&candidate));

        // Only reachable for ranges that are neither nested nor disjoint,
        // which aligned CIDR blocks never are.
        let overlapping: Vec<Ipv4Net> = kept
            .iter()
            .filter(|e| e.overlaps(&candidate))
            .copied()
            .collect();

        kept.push(candidate);
        let outcome = if !overlapping.is_empty() {
            InsertOutcome::AddedWithOverlapWarning(overlapping)
        } else if !replaced.is_empty() {
            InsertOutcome::Replaced(replaced)
        } else {
            InsertOutcome::Added
        };

        (NetworkSet { entries: kept }, outcome)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Ipv4Net] {
        &self.entries
    }

    /// Entries ascending by network address, wider prefix first on ties.
    pub fn sorted(&self) -> Vec<Ipv4Net> {
        self.entries.iter().copied().sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for NetworkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NetworkSet ({} networks):", self.entries.len())?;
        for net in self.sorted() {
            writeln!(f, "  - {net}")?;
        }
        Ok(())
    }
}

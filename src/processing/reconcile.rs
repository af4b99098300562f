//! Reconciliation of candidate networks into a [`NetworkSet`].
//!
//! One pass folds the candidates into an empty set in arrival order. Passes
//! repeat on their own output until one of them neither skips nor replaces
//! anything.

use crate::models::{Diagnostics, InsertOutcome, Ipv4Net, NetworkSet};

/// Result of folding one candidate sequence into an empty set.
#[derive(Debug, Clone)]
pub struct PassResult {
    pub set: NetworkSet,
    /// Each candidate with what inserting it did, in arrival order.
    pub outcomes: Vec<(Ipv4Net, InsertOutcome)>,
}

impl PassResult {
    /// Number of skips plus replacements in this pass.
    pub fn changes(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_change()).count()
    }

    /// Describe every outcome that is worth reporting.
    pub fn diagnostics(&self, label: &str) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for (net, outcome) in &self.outcomes {
            match outcome {
                InsertOutcome::Added => {}
                InsertOutcome::Skipped { covered_by } => {
                    diags.warn(label, format!("{net} is subnet of {covered_by}, skipped"));
                }
                InsertOutcome::Replaced(old) => {
                    for o in old {
                        diags.warn(label, format!("{net} is supernet of {o}, replace it"));
                    }
                }
                InsertOutcome::AddedWithOverlapWarning(others) => {
                    for o in others {
                        diags.warn(label, format!("{net} is overlap of {o}, still will add it"));
                    }
                }
            }
        }
        diags
    }
}

/// Insert each candidate in order, starting from an empty set.
pub fn reconcile_pass(candidates: &[Ipv4Net]) -> PassResult {
    let mut set = NetworkSet::new();
    let mut outcomes = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        let (next, outcome) = set.insert(candidate);
        set = next;
        outcomes.push((candidate, outcome));
    }
    PassResult { set, outcomes }
}

/// Final state of reconciliation run to a fixpoint.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub set: NetworkSet,
    /// Number of passes run, including the final unchanged one.
    pub passes: usize,
    /// False when `max_passes` ran out before a pass came back unchanged.
    pub converged: bool,
    pub diagnostics: Diagnostics,
}

impl Reconciled {
    /// Reconciled networks in output order.
    pub fn sorted(&self) -> Vec<Ipv4Net> {
        self.set.sorted()
    }
}

/// Run passes, each on the previous pass's entries, until nothing changes.
///
/// `max_passes` bounds the loop; running out is reported as a warning and the
/// last set is returned as is.
pub fn reconcile_to_fixpoint(candidates: Vec<Ipv4Net>, max_passes: usize) -> Reconciled {
    let max_passes = max_passes.max(1);
    let mut diagnostics = Diagnostics::new();
    let mut candidates = candidates;
    let mut passes = 0;

    loop {
        passes += 1;
        let label = format!("pass {passes}");
        let pass = reconcile_pass(&candidates);
        diagnostics.extend(pass.diagnostics(&label));
        let changes = pass.changes();
        diagnostics.debug(
            &label,
            format!(
                "{} candidates -> {} networks, {changes} changes",
                candidates.len(),
                pass.set.len()
            ),
        );

        if changes == 0 {
            return finish(pass.set, passes, true, diagnostics);
        }
        if passes >= max_passes {
            diagnostics.warn(
                &label,
                format!("no fixpoint after {passes} passes, {changes} changes in last pass"),
            );
            return finish(pass.set, passes, false, diagnostics);
        }
        candidates = pass.set.entries().to_vec();
    }
}

fn finish(set: NetworkSet, passes: usize, converged: bool, mut diagnostics: Diagnostics) -> Reconciled {
    for n in set.sorted() {
        diagnostics.debug("result", format!("{} {}", n.lo(), n.netmask()));
    }
    Reconciled {
        set,
        passes,
        converged,
        diagnostics,
    }
}

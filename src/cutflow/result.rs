//! Per-event cut-flow record.
//!
//! A [`CutflowResult`] is created fresh for each event, written exactly once
//! by the evaluator during one pass, and read-only afterwards. Each cut
//! carries an explicit four-valued status, so "was considered", "was
//! satisfied" and "is reported as passed" can never disagree.

use std::fmt;

use crate::cutflow::registry::CutName;

/// Outcome of one cut for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutStatus {
    /// The cut does not apply (its group is disabled) or evaluation stopped
    /// before reaching it.
    #[default]
    NotConsidered,
    /// Evaluated, not satisfied, not ignored: the rejection point.
    Failed,
    /// Not satisfied, but configured as ignored; recorded as passed.
    PassedIgnored,
    /// Evaluated and satisfied.
    PassedEvaluated,
}

impl CutStatus {
    /// Whether the cut is reported as passed.
    pub fn passed(self) -> bool {
        matches!(self, CutStatus::PassedIgnored | CutStatus::PassedEvaluated)
    }
}

impl fmt::Display for CutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CutStatus::NotConsidered => "not considered",
            CutStatus::Failed => "failed",
            CutStatus::PassedIgnored => "passed (ignored)",
            CutStatus::PassedEvaluated => "passed",
        };
        f.write_str(text)
    }
}

/// The per-event record of which cuts were satisfied, in fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutflowResult {
    statuses: [CutStatus; CutName::COUNT],
}

impl CutflowResult {
    pub(crate) fn new() -> Self {
        Self {
            statuses: [CutStatus::NotConsidered; CutName::COUNT],
        }
    }

    pub(crate) fn mark(&mut self, name: CutName, status: CutStatus) {
        self.statuses[name.index()] = status;
    }

    pub fn status(&self, name: CutName) -> CutStatus {
        self.statuses[name.index()]
    }

    /// Whether the cut is reported as passed (evaluated or ignored).
    pub fn passed(&self, name: CutName) -> bool {
        self.status(name).passed()
    }

    /// Whether the evaluator reached this cut and recorded an outcome for it.
    pub fn was_considered(&self, name: CutName) -> bool {
        self.status(name) != CutStatus::NotConsidered
    }

    /// True iff the evaluation reached the end of the flow with every
    /// non-ignored cut satisfied.
    pub fn overall_pass(&self) -> bool {
        self.passed(CutName::AllCuts)
    }

    /// The unique cut at which the event was rejected, if any.
    pub fn rejection_point(&self) -> Option<CutName> {
        CutName::ALL
            .iter()
            .find(|name| self.status(**name) == CutStatus::Failed)
            .copied()
    }

    /// Cuts reported as passed, in evaluation order.
    pub fn passed_cuts(&self) -> impl Iterator<Item = CutName> + '_ {
        CutName::ALL
            .iter()
            .copied()
            .filter(|name| self.passed(*name))
    }
}

impl fmt::Display for CutflowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in CutName::ALL {
            writeln!(f, "{:<28} {}", name.label(), self.status(name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_result_has_nothing_considered() {
        let result = CutflowResult::new();

        for name in CutName::ALL {
            assert!(!result.was_considered(name));
            assert!(!result.passed(name));
        }
        assert!(!result.overall_pass());
        assert_eq!(result.rejection_point(), None);
    }

    #[test]
    fn test_passed_states() {
        let mut result = CutflowResult::new();
        result.mark(CutName::NoSelection, CutStatus::PassedEvaluated);
        result.mark(CutName::Trigger, CutStatus::PassedIgnored);

        assert!(result.passed(CutName::NoSelection));
        assert!(result.passed(CutName::Trigger));
        assert!(result.was_considered(CutName::Trigger));
        assert_eq!(result.status(CutName::Trigger), CutStatus::PassedIgnored);
    }

    #[test]
    fn test_rejection_point_names_the_failed_cut() {
        let mut result = CutflowResult::new();
        result.mark(CutName::NoSelection, CutStatus::PassedEvaluated);
        result.mark(CutName::Trigger, CutStatus::PassedEvaluated);
        result.mark(CutName::PrimaryVertex, CutStatus::Failed);

        assert_eq!(result.rejection_point(), Some(CutName::PrimaryVertex));
        assert!(!result.overall_pass());
        assert!(!result.was_considered(CutName::NoiseFilter));
    }

    #[test]
    fn test_overall_pass_requires_all_cuts_bit() {
        let mut result = CutflowResult::new();
        for name in CutName::ALL {
            result.mark(name, CutStatus::PassedEvaluated);
        }

        assert!(result.overall_pass());
        assert_eq!(result.rejection_point(), None);
        assert_eq!(result.passed_cuts().count(), CutName::COUNT);
    }

    #[test]
    fn test_display_lists_every_cut() {
        let result = CutflowResult::new();
        let table = result.to_string();

        assert_eq!(table.lines().count(), CutName::COUNT);
        assert!(table.contains("One jet or more"));
        assert!(table.contains("not considered"));
    }
}

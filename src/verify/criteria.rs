//! Success-criteria reconciliation.
//!
//! Each criterion is matched, case-insensitively and as a substring, against
//! the messages of every result recorded so far, including the results of
//! criteria reconciled before it.

use crate::check::{CheckOutcome, CheckResult, FnCheck, ResultSet, Severity, Status};
use crate::error::Error;

/// Appends one `Criterion: <text>` result per criterion.
///
/// # Errors
///
/// Propagates [`ResultSet::run`] errors.
pub fn reconcile(criteria: &[String], results: &mut ResultSet) -> Result<(), Error> {
    for criterion in criteria {
        let outcome = judge(criterion, results.results());
        results.run(&FnCheck::new(format!("Criterion: {criterion}"), move || {
            Ok(outcome.clone())
        }))?;
    }
    Ok(())
}

fn judge(criterion: &str, prior: &[CheckResult]) -> CheckOutcome {
    let needle = criterion.to_lowercase();
    let matching = |status: Status| {
        prior.iter().find(|r| r.status == status && r.message.to_lowercase().contains(&needle))
    };

    if matching(Status::Pass).is_some() {
        return CheckOutcome::pass(criterion);
    }
    let evidence = matching(Status::Fail).and_then(|r| r.evidence.clone());
    CheckOutcome::fail(format!("Not verified: {criterion}"), Severity::High)
        .with_optional_evidence(evidence)
}

//! `attest status` command.

use crate::config::VerifyConfig;
use crate::context::ServiceContext;
use crate::store::VerificationStore;

/// Execute the `status` command.
///
/// Displays a table of stored reports showing task id, type,
/// recommendation and pass/fail/skip counts.
///
/// # Errors
///
/// Returns an error string if report listing or loading fails.
pub fn run(ctx: &ServiceContext, config: &VerifyConfig) -> Result<(), String> {
    let store = VerificationStore::new(ctx, &config.store_root);
    let ids = store.list_reports().map_err(|e| e.to_string())?;
    if ids.is_empty() {
        println!("No reports found in store.");
        return Ok(());
    }

    let mut rows = Vec::new();
    for id in &ids {
        let report = store.load_report(id).map_err(|e| e.to_string())?;
        let summary = report.results.summary;
        rows.push([
            report.task.id,
            report.task.task_type.to_string(),
            report.recommendation.to_string(),
            format!("{}/{}/{}", summary.passed, summary.failed, summary.skipped),
        ]);
    }

    print!("{}", table(&rows));
    Ok(())
}

fn table(rows: &[[String; 4]]) -> String {
    let width = |i: usize, min: usize| rows.iter().map(|r| r[i].len()).max().unwrap_or(min).max(min);
    let (id_w, type_w, rec_w) = (width(0, 4), width(1, 4), width(2, 14));

    let mut out = format!(
        "{:<id_w$}  {:<type_w$}  {:<rec_w$}  PASS/FAIL/SKIP\n",
        "TASK", "TYPE", "RECOMMENDATION",
    );
    out.push_str(&format!("{:-<id_w$}  {:-<type_w$}  {:-<rec_w$}  {:-<14}\n", "", "", "", ""));
    for [id, task_type, recommendation, counts] in rows {
        out.push_str(&format!("{id:<id_w$}  {task_type:<type_w$}  {recommendation:<rec_w$}  {counts}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckResult, Status};
    use crate::manifest::{Changes, Manifest};
    use crate::report::Report;
    use crate::testing::{test_context, MemFs};
    use chrono::{TimeZone, Utc};

    #[test]
    fn table_aligns_columns() {
        let rows = [
            ["task-1".to_string(), "ui-change".into(), "approve".into(), "4/0/1".into()],
            ["task-22".to_string(), "api".into(), "fix-required".into(), "1/2/0".into()],
        ];
        let text = table(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("TASK     TYPE       RECOMMENDATION  PASS/FAIL/SKIP"));
        assert!(lines[3].starts_with("task-22  api        fix-required    1/2/0"));
    }

    #[test]
    fn status_reads_stored_reports() {
        let fs = MemFs::new();
        let mut ctx = test_context();
        ctx.fs = Box::new(fs.clone());
        let config = VerifyConfig { store_root: "/store".into(), ..Default::default() };
        assert!(run(&ctx, &config).is_ok());

        let manifest =
            Manifest::assemble("task-8".into(), "Refactor", vec!["a.ts".into()], Changes::default());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let details = vec![CheckResult {
            check: "ESLint".into(),
            status: Status::Pass,
            message: "No lint errors".into(),
            evidence: None,
            severity: None,
        }];
        let store = VerificationStore::new(&ctx, &config.store_root);
        store.save_report(&Report::build(&manifest, at, at, details)).unwrap();

        assert_eq!(store.list_reports().unwrap(), vec!["task-8"]);
        assert!(run(&ctx, &config).is_ok());
    }
}

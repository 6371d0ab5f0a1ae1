//! Colocated unit tests for changed source files.

use std::path::Path;

use crate::check::{CheckOutcome, Evidence, FnCheck, ResultSet, Severity};
use crate::error::Error;
use crate::manifest::{Category, Manifest};
use crate::ports::FileSystem;

use super::{output_tail, run_command, VerifyEnv, Verifier};

const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// Runs the `.test.` / `.spec.` siblings of changed files as one batch.
///
/// Emits nothing when no changed file has a sibling test.
pub struct Functional;

impl Verifier for Functional {
    fn category(&self) -> Category {
        Category::Functional
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        let tests =
            related_tests(&*env.ctx.fs, &env.config.project_root, &manifest.files_modified);
        if tests.is_empty() {
            tracing::info!("no colocated tests for changed files");
            return Ok(());
        }

        let escaped: Vec<String> =
            tests.iter().map(|t| shell_escape::escape(t.as_str().into()).into_owned()).collect();
        let command = format!("{} {}", env.config.commands.test, escaped.join(" "));

        results.run(&FnCheck::new("Unit Tests", || {
            let output = run_command(env, &command)?;
            Ok(if output.success() {
                CheckOutcome::pass(format!("Related tests pass ({} files)", tests.len()))
            } else {
                CheckOutcome::fail("Some related tests failed", Severity::High)
                    .with_evidence(Evidence::logs(output_tail(&output)))
            })
        }))
    }
}

/// Existing `.test.` / `.spec.` siblings of JS/TS sources, in file order.
fn related_tests(fs: &dyn FileSystem, root: &Path, files: &[String]) -> Vec<String> {
    let mut tests = Vec::new();
    for file in files {
        let Some((stem, ext)) = file.rsplit_once('.') else { continue };
        if !SOURCE_EXTENSIONS.contains(&ext) || stem.ends_with(".test") || stem.ends_with(".spec") {
            continue;
        }
        for kind in ["test", "spec"] {
            let candidate = format!("{stem}.{kind}.{ext}");
            if fs.exists(&root.join(&candidate)) && !tests.contains(&candidate) {
                tests.push(candidate);
            }
        }
    }
    tests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Status;
    use crate::config::VerifyConfig;
    use crate::manifest::Changes;
    use crate::testing::{test_context, MemFs, ScriptedShell};

    fn manifest(files: &[&str]) -> Manifest {
        Manifest::assemble(
            "t".into(),
            "",
            files.iter().map(|f| (*f).to_string()).collect(),
            Changes::default(),
        )
    }

    #[test]
    fn finds_test_and_spec_siblings_under_project_root() {
        let fs = MemFs::new();
        fs.insert("/repo/src/a.test.ts", "");
        fs.insert("/repo/src/b.spec.tsx", "");
        fs.insert("/repo/src/c.test.py", "");

        let files: Vec<String> =
            ["src/a.ts", "src/b.tsx", "src/c.py", "src/a.test.ts", "README"].map(String::from).into();
        let tests = related_tests(&fs, Path::new("/repo"), &files);
        assert_eq!(tests, ["src/a.test.ts", "src/b.spec.tsx"]);
    }

    #[test]
    fn no_sibling_tests_emits_no_check() {
        let shell = ScriptedShell::new();
        let mut ctx = test_context();
        ctx.shell = Box::new(shell.clone());
        let config = VerifyConfig::default();
        let env = VerifyEnv { ctx: &ctx, config: &config };

        let mut results = ResultSet::new();
        Functional.verify(&env, &manifest(&["src/lonely.ts"]), &mut results).unwrap();
        assert!(results.results().is_empty());
        assert!(shell.ran().is_empty());
    }

    #[test]
    fn runs_one_escaped_batch() {
        let fs = MemFs::new();
        fs.insert("./src/my file.test.ts", "");
        fs.insert("./src/util.test.ts", "");
        let shell = ScriptedShell::new().exits("npm test", 1);
        let mut ctx = test_context();
        ctx.fs = Box::new(fs);
        ctx.shell = Box::new(shell.clone());
        let config = VerifyConfig::default();
        let env = VerifyEnv { ctx: &ctx, config: &config };

        let mut results = ResultSet::new();
        Functional
            .verify(&env, &manifest(&["src/my file.ts", "src/util.ts"]), &mut results)
            .unwrap();

        assert_eq!(shell.ran(), ["npm test -- 'src/my file.test.ts' src/util.test.ts"]);
        let result = &results.results()[0];
        assert_eq!(result.check, "Unit Tests");
        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.severity, Some(Severity::High));
    }
}

//! Analyzer orchestrating file discovery and the per-file lint pipeline.

use crate::config::{Config, ConfigError};
use crate::context::{display_path, FileContext};
use crate::parser::SourceParser;
use crate::rule::{Rule, RuleBox};
use crate::types::{FaultKind, FileFault, LintResult, Violation};
use crate::walker::{panic_message, WalkError, Walker};

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Errors that prevent a run from starting or completing.
///
/// Per-file problems are not errors; they are reported as
/// [`FileFault`]s in the [`LintResult`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error outside of a single file (e.g., resolving the working directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A path given to the analyzer does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Error while walking a directory.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No parser was supplied to the builder.
    #[error("No source parser configured")]
    MissingParser,

    /// The worker pool was shut down.
    #[error("Worker pool closed: {0}")]
    Pool(#[from] AcquireError),

    /// A worker task was cancelled.
    #[error("Worker task failed: {0}")]
    Join(#[from] JoinError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    paths: Vec<PathBuf>,
    base: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parser: Option<Arc<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    parallelism: Option<usize>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file or directory to analyze.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds several files or directories to analyze.
    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the directory that reported paths are made relative to
    /// (default: the current directory).
    #[must_use]
    pub fn base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the language parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Limits how many files are linted at once.
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// Rules disabled in the configuration are dropped here, so the rule set
    /// is fixed for the lifetime of the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was given, an exclude pattern is
    /// invalid, or the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let base = match self.base {
            Some(base) => base,
            None => std::env::current_dir()?,
        };

        let paths = if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p).map(|compiled| (p.clone(), compiled)))
            .collect::<Result<Vec<_>, _>>()?;

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let parallelism = self
            .parallelism
            .or(config.analyzer.parallelism)
            .or_else(|| std::thread::available_parallelism().ok().map(NonZeroUsize::get))
            .unwrap_or(1)
            .max(1);

        let respect_gitignore = config.analyzer.respect_gitignore;

        Ok(Analyzer {
            pipeline: Arc::new(Pipeline {
                walker: Walker::new(rules),
                parser,
                base,
            }),
            paths,
            excludes,
            respect_gitignore,
            parallelism,
        })
    }
}

/// Read, parse and walk one file. Shared read-only by all workers.
struct Pipeline {
    walker: Walker,
    parser: Arc<dyn SourceParser>,
    base: PathBuf,
}

impl Pipeline {
    fn lint_path(&self, path: &Path) -> Result<Vec<Violation>, FileFault> {
        let shown = display_path(path, &self.base);
        debug!("Analyzing: {}", shown.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| FileFault::new(&shown, FaultKind::Io, e.to_string()))?;
        self.lint_source(&shown, &content)
    }

    /// Severity overrides are already baked into the rules, so the walker's
    /// output is final.
    fn lint_source(&self, shown: &Path, content: &str) -> Result<Vec<Violation>, FileFault> {
        let tree = self
            .parser
            .parse(content)
            .map_err(|e| FileFault::new(shown, FaultKind::Parse, e.to_string()))?;

        let ctx = FileContext::new(shown, content);
        self.walker.walk(&tree, &ctx).map_err(|e| {
            let rule = e.rule();
            let message = match e {
                WalkError::Rule { source, .. } => source.to_string(),
                WalkError::Panic { message, .. } => format!("panicked: {message}"),
            };
            FileFault::new(shown, FaultKind::Rule, message).with_rule(rule)
        })
    }
}

/// Lints Ruby sources with a fixed rule set.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    pipeline: Arc<Pipeline>,
    paths: Vec<PathBuf>,
    excludes: Vec<(String, glob::Pattern)>,
    respect_gitignore: bool,
    parallelism: usize,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.pipeline.walker.rule_count()
    }

    /// Names of the active rules, in registry order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.pipeline.walker.rules().iter().map(|r| r.name()).collect()
    }

    /// Maximum number of files linted at once.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Lints in-memory source as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`FileFault`] if the source cannot be parsed or a rule fails.
    pub fn lint_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, FileFault> {
        self.pipeline.lint_source(path, content)
    }

    /// Analyzes all discovered files and returns the results.
    ///
    /// Files are linted in parallel, one task per file, bounded by the
    /// configured parallelism. Results are merged in path order, so the
    /// output does not depend on which task finishes first.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails or a worker is cancelled.
    /// Failures inside a single file become faults in the result instead.
    pub async fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        let files = self.discover_files()?;
        info!(
            "Analyzing {} file(s) with {} rule(s), {} worker(s)",
            files.len(),
            self.rule_count(),
            self.parallelism
        );

        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let mut tasks = JoinSet::new();

        for path in files {
            let permit = Arc::clone(&semaphore).acquire_owned().await?;
            let pipeline = Arc::clone(&self.pipeline);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let outcome = catch_unwind(AssertUnwindSafe(|| pipeline.lint_path(&path)))
                    .unwrap_or_else(|payload| {
                        Err(FileFault::new(
                            display_path(&path, &pipeline.base),
                            FaultKind::Internal,
                            panic_message(payload.as_ref()),
                        ))
                    });
                (path, outcome)
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined?);
        }
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result = LintResult::new();
        for (_, outcome) in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(fault) => {
                    warn!("Skipping {}", fault);
                    result.faults.push(fault);
                }
            }
        }

        info!(
            "Analysis complete: {} violation(s) in {} file(s), {} skipped",
            result.violations.len(),
            result.files_checked,
            result.faults.len()
        );

        Ok(result)
    }

    /// Discovers all source files to analyze, sorted and deduplicated.
    ///
    /// Explicitly named files are always included; directories are walked
    /// and filtered by the parser's extensions and the exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not exist or a directory cannot be
    /// walked.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = BTreeSet::new();

        for root in &self.paths {
            if root.is_file() {
                files.insert(root.clone());
                continue;
            }
            if !root.is_dir() {
                return Err(AnalyzerError::PathNotFound(root.clone()));
            }

            let mut builder = ignore::WalkBuilder::new(root);
            builder
                .hidden(true)
                .git_ignore(self.respect_gitignore)
                .git_global(self.respect_gitignore)
                .git_exclude(self.respect_gitignore)
                .ignore(self.respect_gitignore)
                .parents(self.respect_gitignore);

            for entry in builder.build() {
                let entry = entry?;
                let path = entry.path();

                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                if !self.pipeline.parser.handles(path) {
                    continue;
                }
                if self.should_exclude(path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }
                files.insert(path.to_path_buf());
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.excludes.iter().any(|(raw, pattern)| {
            if pattern.matches(&path_str) {
                return true;
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized = raw.replace("**", "");
            !normalized.is_empty() && normalized != "/" && path_str.contains(&normalized)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::StubParser;
    use crate::rule::RuleError;
    use crate::syntax::{Node, NodeKind};
    use crate::types::Severity;
    use std::fs;
    use tempfile::TempDir;

    struct FlagStrings;

    impl Rule for FlagStrings {
        fn name(&self) -> &'static str {
            "strings"
        }
        fn code(&self) -> &'static str {
            "RB001"
        }
        fn node_kinds(&self) -> &'static [NodeKind] {
            &[NodeKind::String]
        }
        fn check(
            &self,
            node: Node<'_>,
            ctx: &FileContext<'_>,
        ) -> Result<Vec<Violation>, RuleError> {
            Ok(vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location_of(node),
                "single quotes",
            )])
        }
    }

    fn analyzer_for(dir: &TempDir) -> AnalyzerBuilder {
        Analyzer::builder()
            .parser(StubParser)
            .path(dir.path())
            .base(dir.path())
            .rule(FlagStrings)
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn build_requires_parser() {
        let err = Analyzer::builder().build().err().unwrap();
        assert!(matches!(err, AnalyzerError::MissingParser));
    }

    #[test]
    fn build_rejects_bad_glob() {
        let err = Analyzer::builder()
            .parser(StubParser)
            .exclude("[")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, AnalyzerError::Glob(_)));
    }

    #[test]
    fn disabled_rules_are_dropped_at_build() {
        let config = Config::parse("[rules.strings]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .parser(StubParser)
            .rule(FlagStrings)
            .config(config)
            .build()
            .unwrap();
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .parser(StubParser)
            .exclude("**/tmp/**")
            .build()
            .unwrap();

        assert!(analyzer.should_exclude(Path::new("/app/tmp/cache.rb")));
        assert!(analyzer.should_exclude(Path::new("/app/vendor/bundle/x.rb")));
        assert!(!analyzer.should_exclude(Path::new("/app/lib/x.rb")));
    }

    #[test]
    fn discovers_sorted_ruby_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "lib/b.rb", "");
        write(&dir, "lib/a.rb", "");
        write(&dir, "Rakefile", "");
        write(&dir, "README.md", "");
        write(&dir, "vendor/gem.rb", "");

        let analyzer = analyzer_for(&dir).build().unwrap();
        let files: Vec<PathBuf> = analyzer
            .discover_files()
            .unwrap()
            .into_iter()
            .map(|p| display_path(&p, dir.path()))
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("Rakefile"),
                PathBuf::from("lib/a.rb"),
                PathBuf::from("lib/b.rb"),
            ]
        );
    }

    #[test]
    fn missing_path_is_an_error() {
        let analyzer = Analyzer::builder()
            .parser(StubParser)
            .path("/definitely/not/here")
            .build()
            .unwrap();
        assert!(matches!(
            analyzer.discover_files(),
            Err(AnalyzerError::PathNotFound(_))
        ));
    }

    #[test]
    fn lint_source_keeps_rule_severity() {
        // severity from config is applied when the registry builds the rules
        let config = Config::parse("[rules.strings]\nseverity = \"error\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .parser(StubParser)
            .rule(FlagStrings)
            .config(config)
            .build()
            .unwrap();
        let violations = analyzer.lint_source(Path::new("x.rb"), "x = 'a'").unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn lint_source_reports_parse_fault() {
        let analyzer = Analyzer::builder()
            .parser(StubParser)
            .rule(FlagStrings)
            .build()
            .unwrap();
        let fault = analyzer
            .lint_source(Path::new("bad.rb"), "x = @@")
            .unwrap_err();
        assert_eq!(fault.kind, FaultKind::Parse);
        assert_eq!(fault.file, PathBuf::from("bad.rb"));
    }

    #[tokio::test]
    async fn parse_fault_skips_only_that_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.rb", "x = 'a'");
        write(&dir, "b.rb", "x = @@");
        write(&dir, "c.rb", "x = 'a'");

        let analyzer = analyzer_for(&dir).parallelism(2).build().unwrap();
        let result = analyzer.analyze().await.unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.faults.len(), 1);
        assert_eq!(result.faults[0].file, PathBuf::from("b.rb"));
        assert_eq!(result.violations[0].location.file, PathBuf::from("a.rb"));
        assert_eq!(result.violations[1].location.file, PathBuf::from("c.rb"));
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        for name in ["d.rb", "a.rb", "c.rb", "b.rb"] {
            write(&dir, name, "x = 'a'");
        }
        let analyzer = analyzer_for(&dir).parallelism(4).build().unwrap();
        let first = analyzer.analyze().await.unwrap();
        let second = analyzer.analyze().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.violations.len(), 4);
    }
}

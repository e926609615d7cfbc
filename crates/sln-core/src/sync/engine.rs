//! ProjectGenerator implementation
//!
//! Coordinates one sync: gather eligible units from the host, aggregate
//! assets, write the solution, then one project per unit, then the editor
//! settings file.

use sln_fs::NormalizedPath;
use sln_host::{CompilationUnit, Host, ResponseFileData};

use crate::Result;
use crate::assets::collect_asset_fragments;
use crate::classify::{Classifier, ScriptingLanguage, is_reimport_trigger, language_of};
use crate::config::{GeneratorConfig, SolutionMode};
use crate::project::ProjectSerializer;
use crate::settings::ensure_editor_settings;
use crate::solution::SolutionSerializer;
use crate::writer::ArtifactWriter;

use super::report::{SkipReason, SyncOptions, SyncOutcome, SyncReport};

/// Generates the solution and project files for a host.
///
/// The generator keeps no state between syncs; every call re-reads the
/// host snapshot and the artifacts on disk.
pub struct ProjectGenerator<H: Host> {
    host: H,
    config: GeneratorConfig,
    options: SyncOptions,
}

impl<H: Host> ProjectGenerator<H> {
    pub fn new(host: H, config: GeneratorConfig) -> Self {
        Self {
            host,
            config,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn solution_path(&self) -> NormalizedPath {
        self.config.solution_path()
    }

    /// Whether a solution has been generated for this root.
    pub fn has_solution_been_generated(&self) -> bool {
        self.solution_path().is_file()
    }

    /// Sync when a batch of changed or reimported paths warrants it.
    ///
    /// Never creates the first solution: until [`sync`](Self::sync) has run
    /// once, every batch is skipped.
    pub fn sync_if_needed<C, R>(&self, changed: C, reimported: R) -> Result<SyncOutcome>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let classifier = Classifier::new(&self.host);

        if !self.has_solution_been_generated() {
            tracing::debug!(solution = %self.solution_path(), "no solution yet, skipping sync");
            return Ok(SyncOutcome::Skipped {
                reason: SkipReason::NoSolution,
            });
        }

        let relevant = changed
            .into_iter()
            .any(|path| classifier.is_eligible_source_file(path.as_ref()))
            || reimported
                .into_iter()
                .any(|path| is_reimport_trigger(path.as_ref()));

        if !relevant {
            tracing::debug!("no relevant changes, skipping sync");
            return Ok(SyncOutcome::Skipped {
                reason: SkipReason::NoRelevantChanges,
            });
        }

        self.generate(&classifier).map(SyncOutcome::Synced)
    }

    /// Unconditionally regenerate every artifact.
    pub fn sync(&self) -> Result<SyncReport> {
        let classifier = Classifier::new(&self.host);
        self.generate(&classifier)
    }

    fn generate(&self, classifier: &Classifier<'_, H>) -> Result<SyncReport> {
        let writer = ArtifactWriter::new(self.options.dry_run);
        let mut report = SyncReport::new(self.options.dry_run);

        let units: Vec<CompilationUnit> = self
            .host
            .compilation_units()?
            .into_iter()
            .filter(|unit| {
                let eligible = classifier.is_eligible_unit(unit);
                if !eligible {
                    tracing::debug!(unit = %unit.output_file_name(), "no eligible sources, skipping unit");
                }
                eligible
            })
            .collect();
        let project_units = relevant_units(&units, self.config.solution_mode);

        let fragments = collect_asset_fragments(classifier, &self.config.root);

        let solution = SolutionSerializer::new(&self.config).render(&project_units)?;
        let solution_path = self.solution_path();
        let outcome = writer.write(&solution_path, &solution)?;
        report.record(solution_path, outcome);

        let serializer = ProjectSerializer::new(&self.config, classifier, &fragments, &project_units);
        for unit in &project_units {
            let response_files = self.resolve_response_files(unit, &mut report.warnings);
            let text = serializer.render(unit, &response_files)?;
            let path = self.config.project_path(unit);
            let outcome = writer.write(&path, &text)?;
            report.record(path, outcome);
        }

        if let Some(path) = ensure_editor_settings(&self.config.root, self.options.dry_run)? {
            report.created.push(path);
        }

        tracing::info!(
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            dry_run = self.options.dry_run,
            "sync complete"
        );
        Ok(report)
    }

    /// Resolve every response file of `unit` in declaration order.
    ///
    /// Parse problems are logged and collected; they never stop generation.
    fn resolve_response_files(
        &self,
        unit: &CompilationUnit,
        warnings: &mut Vec<String>,
    ) -> Vec<ResponseFileData> {
        let system_dirs = self
            .host
            .system_reference_directories(unit.api_compatibility_level);

        unit.response_files
            .iter()
            .map(|response_file| {
                let path = self.config.root.join(response_file);
                let data = self
                    .host
                    .resolve_response_file(&path, &self.config.root, &system_dirs);
                for error in &data.errors {
                    tracing::warn!(
                        unit = %unit.output_file_name(),
                        response_file = %response_file,
                        "{}",
                        error
                    );
                    warnings.push(format!("{} Parse Error : {}", response_file, error));
                }
                data
            })
            .collect()
    }
}

/// Units that receive project files and solution entries under `mode`.
pub fn relevant_units(units: &[CompilationUnit], mode: SolutionMode) -> Vec<&CompilationUnit> {
    units
        .iter()
        .filter(|unit| match mode {
            SolutionMode::AllUnits => true,
            SolutionMode::PrimaryLanguageOnly => language_of(unit) == ScriptingLanguage::CSharp,
        })
        .collect()
}

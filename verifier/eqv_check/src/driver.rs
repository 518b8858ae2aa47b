//! Running every field check over a type.

use eqv_runtime::ClassRegistry;
use eqv_synth::{FieldProbe, SubjectCreator, ValueProvider};

use crate::checks::{
    FieldCheck, JpaLazyGetterFieldCheck, ReflexivityFieldCheck, StringFieldCheck,
    TransientFieldsCheck,
};
use crate::config::Configuration;
use crate::errors::CheckResult;
use crate::warning::Warning;

/// Runs the field checks, one check at a time over every field in
/// declaration order (inherited fields first). Stops at the first failure.
pub struct FieldsChecker<'a> {
    config: &'a Configuration,
    creator: &'a SubjectCreator<'a>,
}

impl<'a> FieldsChecker<'a> {
    pub fn new(config: &'a Configuration, creator: &'a SubjectCreator<'a>) -> Self {
        FieldsChecker { config, creator }
    }

    /// The checks enabled by the configuration, in the order they run.
    pub fn checks(&self) -> Vec<Box<dyn FieldCheck + 'a>> {
        let mut checks: Vec<Box<dyn FieldCheck + 'a>> = vec![Box::new(
            ReflexivityFieldCheck::new(self.creator, self.config),
        )];
        if !self.config.suppresses(Warning::TransientFields) {
            checks.push(Box::new(TransientFieldsCheck::new(self.creator, self.config)));
        }
        checks.push(Box::new(StringFieldCheck::new(self.creator, self.config)));
        if !self.config.suppresses(Warning::JpaGetter) {
            checks.push(Box::new(JpaLazyGetterFieldCheck::new(self.creator, self.config)));
        }
        checks
    }

    /// Every field of the type under test that can be probed; constants are
    /// left out.
    pub fn probes(&self) -> Vec<FieldProbe> {
        let registry = self.creator.provider().registry();
        registry
            .fields_of(self.config.class())
            .into_iter()
            .filter(|f| !f.flags.is_constant())
            .map(|f| FieldProbe::new(f, self.config.type_descriptor()))
            .collect()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(ty = %self.config.type_descriptor()))]
    pub fn check(&self) -> CheckResult<()> {
        let probes = self.probes();
        if probes.is_empty() {
            tracing::debug!("no fields; checking reflexivity of the type only");
            return ReflexivityFieldCheck::new(self.creator, self.config).check_type();
        }
        for check in self.checks() {
            for probe in &probes {
                tracing::trace!(check = check.name(), field = probe.name(), "field check");
                check.execute(probe)?;
            }
        }
        Ok(())
    }
}

/// Verify the type described by `config` against its equals/hash contract.
///
/// Builds a fresh value provider for the run, so nothing is shared with
/// other runs.
pub fn verify(registry: &ClassRegistry, config: &Configuration) -> CheckResult<()> {
    let provider = ValueProvider::new(registry, config.prefabs().clone());
    let creator = SubjectCreator::new(&provider, config.type_descriptor().clone())?;
    FieldsChecker::new(config, &creator).check()
}

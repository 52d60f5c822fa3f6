//! Catalog-backed provider
//!
//! Version selection walks the constraints in the order given: the first
//! override fixes the version for good, otherwise every regular requirement
//! replaces the previous choice. Options are merged first-wins, then filled in
//! from the selected version's defaults.

use tracing::{debug, trace};

use conflux_core::{
    ConfluxError, ConfluxResult, Constraint, EdgeKind, OptionMap, PackageDefinition, Provider,
};

use crate::catalog::Catalog;

impl Provider for Catalog {
    fn get_definition(
        &self,
        name: &str,
        constraints: &[Constraint],
    ) -> ConfluxResult<PackageDefinition> {
        debug!(name, constraints = constraints.len(), "catalog lookup");

        let package = self.package(name).ok_or_else(|| ConfluxError::PackageNotFound {
            name: name.to_string(),
        })?;

        let mut selected: Option<&str> = None;
        let mut overridden = false;
        let mut options = OptionMap::new();

        for constraint in constraints {
            let requirement = &constraint.requirement;
            trace!(origin = %constraint.origin, requirement = %requirement, "constraint");

            let version = requirement.version_expr.as_str();
            if !version.is_empty() && !package.versions.contains_key(version) {
                return Err(ConfluxError::Unsatisfiable {
                    name: name.to_string(),
                    reason: format!(
                        "'{}' asks for version '{}', available: {}",
                        constraint.origin,
                        version,
                        package.listing()
                    ),
                });
            }

            for (key, value) in &requirement.options {
                options.entry(key.clone()).or_insert_with(|| value.clone());
            }

            match requirement.edge_kind {
                EdgeKind::Override if !overridden => {
                    selected = Some(version);
                    overridden = true;
                },
                EdgeKind::Topological if !overridden => selected = Some(version),
                _ => {},
            }
        }

        let version = match selected.filter(|version| !version.is_empty()) {
            Some(version) => version,
            None => package.default_version().ok_or_else(|| ConfluxError::Unsatisfiable {
                name: name.to_string(),
                reason: "no versions listed".to_string(),
            })?,
        };
        let entry = package.versions.get(version).ok_or_else(|| ConfluxError::Unsatisfiable {
            name: name.to_string(),
            reason: format!("default version '{}' is not listed", version),
        })?;

        for (key, value) in &entry.options {
            options.entry(key.clone()).or_insert_with(|| value.clone());
        }

        let mut definition =
            PackageDefinition::new(name, version).with_requirements(entry.requires.iter().cloned());
        definition.options = options;
        Ok(definition)
    }
}

//! Build unit assembly
//!
//! Groups scanned sources into named build units (framework core, HAL,
//! variant). Units whose scan comes back empty are omitted: building an
//! empty library is wasted work and may be rejected by the build driver.

use std::path::{Path, PathBuf};

use crate::config::defaults::SOURCE_EXTENSIONS;
use crate::core::manifest::Manifest;
use crate::core::scanner::{scan_tree, SourceSet};

/// A named, independently buildable group of source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    /// Unit name presented to the build driver (e.g. "FrameworkCore")
    pub name: String,

    /// Sources belonging to this unit, never empty
    pub sources: SourceSet,
}

/// A unit to scan: name plus source tree root
#[derive(Debug, Clone)]
pub struct UnitSpec {
    /// Unit name
    pub name: String,

    /// Root directory of the unit's source tree
    pub root: PathBuf,
}

impl UnitSpec {
    /// Create a new unit spec
    pub fn new(name: &str, root: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            root,
        }
    }
}

/// Scan each spec and wrap the non-empty results as build units.
///
/// Per-unit file counts are reported through tracing; they carry no
/// control-flow meaning beyond the empty-unit omission.
pub fn assemble_units(specs: &[UnitSpec], extensions: &[&str]) -> Vec<BuildUnit> {
    let mut units = Vec::new();

    for spec in specs {
        let sources = scan_tree(&spec.root, extensions);

        if sources.is_empty() {
            tracing::debug!(
                "Unit '{}' has no sources under {}, omitting",
                spec.name,
                spec.root.display()
            );
            continue;
        }

        tracing::info!("Unit '{}': {} source files", spec.name, sources.len());
        units.push(BuildUnit {
            name: spec.name.clone(),
            sources,
        });
    }

    units
}

/// Standard unit specs for a framework checkout: core, HAL, and the
/// board-selected variant (when one is configured).
pub fn framework_unit_specs(project_root: &Path, manifest: &Manifest) -> Vec<UnitSpec> {
    let framework_dir = project_root.join(&manifest.framework.dir);
    let core_dir = framework_dir.join("cores").join(&manifest.framework.core);

    let mut specs = vec![
        UnitSpec::new("FrameworkCore", core_dir.clone()),
        UnitSpec::new("FrameworkHal", core_dir.join("hal")),
    ];

    if let Some(variant) = manifest.board.variant_name() {
        specs.push(UnitSpec::new(
            "FrameworkVariant",
            framework_dir.join("variants").join(variant),
        ));
    }

    specs
}

/// Discover the build units for a project
pub fn framework_units(project_root: &Path, manifest: &Manifest) -> Vec<BuildUnit> {
    let specs = framework_unit_specs(project_root, manifest);
    assemble_units(&specs, SOURCE_EXTENSIONS)
}

/// Source and target locations for one report run.
use std::path::{Path, PathBuf};

/// Terraform outputs, relative to the repository root.
pub const DEFAULT_OUTPUTS_PATH: &str = "deploy/coolify/outputs.tf";
/// Resource Manager schema, relative to the repository root.
pub const DEFAULT_SCHEMA_PATH: &str = "deploy/coolify/schema.yaml";
/// Generated report, relative to the repository root.
pub const DEFAULT_TARGET_PATH: &str = "deploy/coolify/docs/application-information-mapping.md";

/// Resolved file locations passed to the loader and renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub outputs: PathBuf,
    pub schema: PathBuf,
    pub target: PathBuf,
}

impl SourcePaths {
    /// Resolve paths against `root`. `None` selects the default location;
    /// absolute overrides are used as given.
    #[must_use]
    pub fn resolve(
        root: &Path,
        outputs: Option<&Path>,
        schema: Option<&Path>,
        target: Option<&Path>,
    ) -> Self {
        let pick = |given: Option<&Path>, default: &str| {
            root.join(given.unwrap_or_else(|| Path::new(default)))
        };
        Self {
            outputs: pick(outputs, DEFAULT_OUTPUTS_PATH),
            schema: pick(schema, DEFAULT_SCHEMA_PATH),
            target: pick(target, DEFAULT_TARGET_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_under_root() {
        let paths = SourcePaths::resolve(Path::new("/repo"), None, None, None);
        assert_eq!(paths.outputs, Path::new("/repo/deploy/coolify/outputs.tf"));
        assert_eq!(paths.schema, Path::new("/repo/deploy/coolify/schema.yaml"));
        assert_eq!(
            paths.target,
            Path::new("/repo/deploy/coolify/docs/application-information-mapping.md")
        );
    }

    #[test]
    fn test_overrides() {
        let paths = SourcePaths::resolve(
            Path::new("/repo"),
            Some(Path::new("infra/outputs.tf")),
            Some(Path::new("/abs/schema.yaml")),
            None,
        );
        assert_eq!(paths.outputs, Path::new("/repo/infra/outputs.tf"));
        assert_eq!(paths.schema, Path::new("/abs/schema.yaml"));
    }
}

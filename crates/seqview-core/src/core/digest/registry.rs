use super::rule::{CleavageRule, RuleError, Terminus};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RuleDefinition {
    cleave_at: String,
    restrict: Option<String>,
    terminus: Option<Terminus>,
}

/// User-defined cleavage rules, consulted before the built-in enzymes.
#[derive(Debug, Clone, Default)]
pub struct EnzymeRegistry {
    registry: HashMap<String, CleavageRule>,
}

impl EnzymeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rules from a TOML file with one table per enzyme:
    ///
    /// ```toml
    /// [my-enzyme]
    /// cleave-at = "KR"
    /// restrict = "P"
    /// terminus = "c"
    /// ```
    pub fn load(path: &Path) -> Result<Self, EnzymeLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnzymeLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            EnzymeLoadError::Toml { source, .. } => EnzymeLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, EnzymeLoadError> {
        let definitions: HashMap<String, RuleDefinition> =
            toml::from_str(content).map_err(|e| EnzymeLoadError::Toml {
                path: String::new(),
                source: e,
            })?;

        let mut registry = HashMap::with_capacity(definitions.len());
        for (name, def) in definitions {
            let restrict = match def.restrict.as_deref() {
                None | Some("") => None,
                Some(value) => {
                    let mut chars = value.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(c),
                        _ => {
                            return Err(RuleError::InvalidRestriction {
                                name,
                                value: value.to_string(),
                            }
                            .into());
                        }
                    }
                }
            };
            let rule = CleavageRule::new(
                name.clone(),
                &def.cleave_at,
                restrict,
                def.terminus.unwrap_or(Terminus::C),
            )?;
            registry.insert(name.to_lowercase(), rule);
        }
        Ok(Self { registry })
    }

    pub fn get(&self, name: &str) -> Option<&CleavageRule> {
        self.registry.get(&name.to_lowercase())
    }

    /// Resolves a rule by name, preferring user-defined rules over built-ins.
    pub fn resolve(&self, name: &str) -> Result<CleavageRule, RuleError> {
        match self.get(name) {
            Some(rule) => Ok(rule.clone()),
            None => name.parse(),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum EnzymeLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_reads_custom_rules() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("enzymes.toml");
        fs::write(
            &path,
            r#"
            [formic-acid]
            cleave-at = "D"
            terminus = "c"

            [Custom-N]
            cleave-at = "M"
            restrict = "P"
            terminus = "n"
            "#,
        )
        .unwrap();

        let registry = EnzymeRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 2);

        let formic = registry.get("formic-acid").unwrap();
        assert_eq!(formic.cleave_at(), &['D']);
        assert_eq!(formic.restrict(), None);
        assert_eq!(formic.terminus(), Terminus::C);

        let custom = registry.get("custom-n").unwrap();
        assert_eq!(custom.terminus(), Terminus::N);
        assert_eq!(custom.restrict(), Some('P'));
    }

    #[test]
    fn resolve_falls_back_to_builtin_rules() {
        let registry = EnzymeRegistry::new();
        assert_eq!(registry.resolve("trypsin").unwrap(), CleavageRule::trypsin());
        assert!(matches!(
            registry.resolve("unknown"),
            Err(RuleError::UnknownEnzyme(_))
        ));
    }

    #[test]
    fn resolve_prefers_custom_definition() {
        let registry = EnzymeRegistry::from_toml_str(
            r#"
            [trypsin]
            cleave-at = "K"
            "#,
        )
        .unwrap();
        let rule = registry.resolve("Trypsin").unwrap();
        assert_eq!(rule.cleave_at(), &['K']);
        assert_eq!(rule.restrict(), None);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = EnzymeRegistry::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(EnzymeLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = EnzymeRegistry::load(&path);
        assert!(matches!(result, Err(EnzymeLoadError::Toml { ref path, .. }) if path.ends_with("bad.toml")));
    }

    #[test]
    fn multi_residue_restriction_is_rejected() {
        let result = EnzymeRegistry::from_toml_str(
            r#"
            [odd]
            cleave-at = "K"
            restrict = "PP"
            "#,
        );
        assert!(matches!(
            result,
            Err(EnzymeLoadError::Rule(RuleError::InvalidRestriction { .. }))
        ));
    }
}

//! Catalog sources.

use std::collections::HashMap;
use std::path::Path;

use flame_core::{Catalog, LineKind};

use super::{FlameError, Result};

/// Supplies the tier values currently selectable for each line.
pub trait CatalogSource: Send + Sync {
    fn read_catalog(&self) -> Result<Catalog>;
}

impl<T> CatalogSource for std::sync::Arc<T>
where
    T: CatalogSource + ?Sized,
{
    fn read_catalog(&self) -> Result<Catalog> {
        (**self).read_catalog()
    }
}

/// A fixed catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog(pub Catalog);

impl CatalogSource for StaticCatalog {
    fn read_catalog(&self) -> Result<Catalog> {
        Ok(self.0.clone())
    }
}

/// Loader for catalogs stored as RON maps of line name to tier values.
///
/// File format: `HashMap<String, Vec<i32>>`
///
/// ```ron
/// {
///     "str": [11, 22, 33],
///     "strDex": [6, 12],
///     "armorAtt": [1, 2, 3],
/// }
/// ```
///
/// Lines missing from the file get no tiers. The resulting catalog is in
/// canonical line order regardless of the order in the file.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> Result<Catalog> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(
            "Loaded catalog from {} ({} options)",
            path.display(),
            catalog.option_count()
        );
        Ok(catalog)
    }

    pub fn parse(content: &str) -> Result<Catalog> {
        let raw: HashMap<String, Vec<i32>> =
            ron::from_str(content).map_err(|e| FlameError::Parse(e.to_string()))?;

        let mut by_line: HashMap<LineKind, Vec<i32>> = HashMap::new();
        for (name, tiers) in raw {
            by_line.insert(name.parse()?, tiers);
        }

        Ok(Catalog::canonical(|line| {
            by_line.remove(&line).unwrap_or_default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_canonical_order() {
        let catalog = CatalogLoader::parse(r#"{ "armorAtt": [1, 2], "str": [11, 11, 22] }"#).unwrap();

        assert_eq!(catalog.len(), LineKind::ALL.len());
        assert_eq!(catalog.iter().next().map(|e| e.line), Some(LineKind::Str));
        assert_eq!(catalog.tiers(LineKind::Str), &[11, 22]);
        assert_eq!(catalog.tiers(LineKind::ArmorAtt), &[1, 2]);
        assert!(catalog.tiers(LineKind::Dex).is_empty());
    }

    #[test]
    fn unknown_line_is_an_error() {
        let err = CatalogLoader::parse(r#"{ "bossDamage": [2] }"#).unwrap_err();
        assert!(matches!(err, FlameError::UnknownLine(_)));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = CatalogLoader::parse("{ str: ").unwrap_err();
        assert!(matches!(err, FlameError::Parse(_)));
    }
}

use anyhow::{ensure, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::{Category, MaterialStructure};

/// The record collection the browser presents. Validated on load and
/// read-only afterwards; every view is computed from it without mutation.
#[derive(Debug, Clone)]
pub struct Catalog {
    structures: Vec<MaterialStructure>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

const BUILTIN_JSON: &str = include_str!("structures.json");

/// The catalog shipped with the binary, parsed and validated once.
pub fn builtin() -> &'static Catalog {
    BUILTIN.get_or_init(|| {
        Catalog::from_json(BUILTIN_JSON).expect("embedded catalog must be valid")
    })
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let structures: Vec<MaterialStructure> =
            serde_json::from_str(json).context("catalog is not a JSON array of structures")?;
        Self::validate(&structures)?;
        Ok(Self { structures })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read catalog file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid catalog file {}", path.display()))
    }

    /// Rejects a catalog up front rather than letting a malformed record
    /// surface later as a corrupted ordering.
    fn validate(structures: &[MaterialStructure]) -> Result<()> {
        ensure!(!structures.is_empty(), "catalog contains no structures");
        let mut ids = HashSet::new();
        for s in structures {
            ensure!(!s.id.is_empty(), "catalog contains a structure with an empty id");
            ensure!(!s.name.is_empty(), "structure '{}' has an empty name", s.id);
            ensure!(ids.insert(s.id.as_str()), "duplicate structure id '{}'", s.id);
            s.thickness_microns()
                .with_context(|| format!("catalog rejected at structure '{}'", s.id))?;
        }
        Ok(())
    }

    pub fn structures(&self) -> &[MaterialStructure] {
        &self.structures
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&MaterialStructure> {
        self.structures.iter().find(|s| s.id == id)
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.structures.iter().filter(|s| s.category == category).count()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &MaterialStructure> {
        self.structures.iter().filter(move |s| s.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = builtin();
        assert!(!catalog.is_empty());

        // Every category family has at least one structure
        for category in Category::all() {
            assert!(catalog.count_in(category) > 0, "empty category {:?}", category);
        }

        // Ids are unique and every thickness parses
        let mut seen = HashSet::new();
        for s in catalog.structures() {
            assert!(seen.insert(s.id.as_str()), "duplicate id {}", s.id);
            s.thickness_microns().unwrap();
        }
    }

    #[test]
    fn by_id_finds_known_structures() {
        let catalog = builtin();
        let s = catalog.by_id("pcr-kraft-duplex-low").unwrap();
        assert_eq!(s.name, "PCR Kraft Duplex Low");
        assert!(catalog.by_id("missing").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = builtin().structures()[0].clone();
        let json = serde_json::to_string(&vec![a.clone(), a]).unwrap();
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate structure id"));
    }

    #[test]
    fn digit_free_thickness_is_rejected() {
        let mut a = builtin().structures()[0].clone();
        a.thickness = "thin".to_string();
        let json = serde_json::to_string(&vec![a]).unwrap();
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(format!("{err:#}").contains("no leading digits"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(Catalog::from_json("[]").is_err());
    }
}

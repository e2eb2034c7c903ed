//! Atomic concepts and the exact-match concept catalog.
//!
//! The correlation pipeline works with two catalogs bootstrapped from the
//! terminology server before the first row is processed: one for tooth
//! concepts, one for tooth-surface concepts.

use std::collections::hash_map;
use std::collections::HashMap;

use crate::SctId;

/// Well-known SNOMED CT concept IDs used by the dental correlation domain.
pub mod well_known {
    use crate::SctId;

    /// Dental caries (disorder) - focus concept of generated constraints
    pub const DENTAL_CARIES: SctId = 80967001;

    /// Finding site (attribute) - links a finding to its anatomical site
    pub const FINDING_SITE: SctId = 363698007;

    /// Procedure site (attribute) - links a procedure to its anatomical site
    pub const PROCEDURE_SITE: SctId = 363704007;

    /// Insertion of composite restoration into tooth (procedure)
    pub const COMPOSITE_RESTORATION: SctId = 234789004;

    /// Structure of single tooth surface (body structure)
    pub const SINGLE_TOOTH_SURFACE: SctId = 245644000;

    /// Tooth structure (body structure) - root of the tooth catalog
    pub const TOOTH_STRUCTURE: SctId = 38199008;

    /// Tooth-structure subhierarchy excluded from the tooth catalog
    pub const EXCLUDED_TOOTH_STRUCTURE: SctId = 410613002;

    /// Examination sentinel code marking a routine dental examination event
    pub const DENTAL_EXAMINATION: SctId = 34043003;
}

/// An atomic clinical code with a human-readable display term.
///
/// Identity is the code; the display term is carried for reporting only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// SNOMED CT concept ID.
    pub id: SctId,
    /// Display term, if the terminology server supplied one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: Option<String>,
}

impl Concept {
    /// Creates a concept with an ID and display term.
    pub fn new(id: SctId, display: impl Into<String>) -> Self {
        Self {
            id,
            display: Some(display.into()),
        }
    }

    /// Creates a concept with just an ID.
    pub fn id_only(id: SctId) -> Self {
        Self { id, display: None }
    }
}

/// Exact-match lookup table from concept ID to [`Concept`].
///
/// Lookups never fall back to hierarchy traversal; a code is either in the
/// catalog or it is not.
#[derive(Debug, Clone, Default)]
pub struct ConceptCatalog {
    concepts: HashMap<SctId, Concept>,
}

impl ConceptCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a concept, replacing any previous entry with the same ID.
    pub fn insert(&mut self, concept: Concept) {
        self.concepts.insert(concept.id, concept);
    }

    /// Looks up a concept by ID.
    pub fn get(&self, id: SctId) -> Option<&Concept> {
        self.concepts.get(&id)
    }

    /// Returns true if the catalog contains the given ID.
    pub fn contains(&self, id: SctId) -> bool {
        self.concepts.contains_key(&id)
    }

    /// Number of concepts in the catalog.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Iterates over the catalog's concepts in arbitrary order.
    pub fn iter(&self) -> hash_map::Values<'_, SctId, Concept> {
        self.concepts.values()
    }
}

impl FromIterator<Concept> for ConceptCatalog {
    fn from_iter<I: IntoIterator<Item = Concept>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for concept in iter {
            catalog.insert(concept);
        }
        catalog
    }
}

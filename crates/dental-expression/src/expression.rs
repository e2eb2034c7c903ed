//! Postcoordinated expressions and procedure-site resolution.

use crate::concept::{Concept, ConceptCatalog};
use crate::parser::procedure_site_targets;

/// An anatomical procedure site referenced by an expression.
///
/// Tagged with its structural role at construction; the role never changes
/// afterwards. Both flags are carried so that a code present in both the
/// tooth and surface catalogs can yield one site per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSite {
    concept: Concept,
    is_tooth: bool,
    is_surface: bool,
}

impl ProcedureSite {
    /// Creates a tooth site.
    pub fn tooth(concept: Concept) -> Self {
        Self {
            concept,
            is_tooth: true,
            is_surface: false,
        }
    }

    /// Creates a tooth-surface site.
    pub fn surface(concept: Concept) -> Self {
        Self {
            concept,
            is_tooth: false,
            is_surface: true,
        }
    }

    /// The underlying concept.
    pub fn concept(&self) -> &Concept {
        &self.concept
    }

    /// Whether this site is a tooth.
    pub fn is_tooth(&self) -> bool {
        self.is_tooth
    }

    /// Whether this site is a tooth surface.
    pub fn is_surface(&self) -> bool {
        self.is_surface
    }
}

/// A postcoordinated SNOMED CT expression (PCE) in brief compositional
/// grammar, with its resolved procedure sites.
///
/// Two lifecycles exist side by side:
/// - *catalog* expressions come from a terminology-server expansion and carry
///   a display description ([`PostCoordinatedExpression::new`])
/// - *ad hoc* expressions are constructed per stored event row from the raw
///   code value, with no description ([`PostCoordinatedExpression::ad_hoc`])
#[derive(Debug, Clone)]
pub struct PostCoordinatedExpression {
    expression: String,
    description: Option<String>,
    procedure_sites: Vec<ProcedureSite>,
}

impl PostCoordinatedExpression {
    /// Creates an expression with a display description.
    pub fn new(expression: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            description: Some(description.into()),
            procedure_sites: Vec::new(),
        }
    }

    /// Creates an ad hoc expression from a raw stored code, with no
    /// description.
    pub fn ad_hoc(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            description: None,
            procedure_sites: Vec::new(),
        }
    }

    /// The expression string in brief compositional grammar.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The display description, if one was supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The procedure sites from the most recent resolution.
    pub fn procedure_sites(&self) -> &[ProcedureSite] {
        &self.procedure_sites
    }

    /// Resolves the expression's procedure sites against the tooth and
    /// surface catalogs.
    ///
    /// Every procedure-site assignment target is checked against both
    /// catalogs independently; a code present in both yields two sites,
    /// tooth first. Targets found in neither catalog are ignored. Sites
    /// accumulate in encounter order.
    ///
    /// Resolution is idempotent: previously resolved sites are cleared
    /// before the expression is scanned again, so repeated calls against
    /// unchanged catalogs return the same list.
    pub fn resolve_procedure_sites(
        &mut self,
        teeth: &ConceptCatalog,
        surfaces: &ConceptCatalog,
    ) -> &[ProcedureSite] {
        self.procedure_sites.clear();

        for target in procedure_site_targets(&self.expression) {
            if let Some(concept) = teeth.get(target) {
                self.procedure_sites.push(ProcedureSite::tooth(concept.clone()));
            }
            if let Some(concept) = surfaces.get(target) {
                self.procedure_sites
                    .push(ProcedureSite::surface(concept.clone()));
            }
        }

        &self.procedure_sites
    }

    /// First resolved tooth site, if any.
    pub fn tooth_site(&self) -> Option<&ProcedureSite> {
        self.procedure_sites.iter().find(|s| s.is_tooth())
    }

    /// Resolved surface sites, in discovery order.
    pub fn surface_sites(&self) -> impl Iterator<Item = &ProcedureSite> {
        self.procedure_sites.iter().filter(|s| s.is_surface())
    }
}

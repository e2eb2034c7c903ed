//! # dental-expression
//!
//! Compositional grammar and ECL constraint utilities for dental
//! SNOMED CT postcoordinated expressions (PCEs).
//!
//! This crate provides:
//! - **Concept catalog**: exact-match lookup tables for tooth and
//!   tooth-surface concepts
//! - **Attribute parser**: extracts `attribute=value` assignments from brief
//!   compositional grammar
//! - **Procedure-site resolution**: decomposes a PCE into the teeth and
//!   surfaces it refers to
//! - **ECL generation**: derives a "dental caries on the same tooth"
//!   expression constraint from a resolved PCE
//!
//! ## Compositional Grammar vs ECL
//!
//! | Feature | Compositional Grammar | ECL (Constraints) |
//! |---------|-----------------------|-------------------|
//! | Purpose | Record a specific clinical event | Query a set of codes |
//! | Example | `234789004:363704007=245653002` | `<< 80967001` |
//! | Role here | Stored patient events | Terminology-server search |
//!
//! ## Usage
//!
//! ```rust
//! use dental_expression::{dental_caries_constraint, Concept, ConceptCatalog,
//!     PostCoordinatedExpression};
//!
//! let mut teeth = ConceptCatalog::new();
//! teeth.insert(Concept::new(245575001, "Lower right third molar tooth"));
//! let mut surfaces = ConceptCatalog::new();
//! surfaces.insert(Concept::new(245653002, "Occlusal surface"));
//!
//! let mut pce = PostCoordinatedExpression::ad_hoc(
//!     "234789004:363704007=245575001,363704007=245653002",
//! );
//! pce.resolve_procedure_sites(&teeth, &surfaces);
//!
//! let ecl = dental_caries_constraint(&pce).unwrap();
//! assert!(ecl.starts_with("<<80967001 |Dental caries|:"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod concept;
mod ecl;
mod error;
mod expression;
mod parser;

pub use concept::{well_known, Concept, ConceptCatalog};
pub use ecl::dental_caries_constraint;
pub use error::{ExpressionError, ExpressionResult};
pub use expression::{PostCoordinatedExpression, ProcedureSite};
pub use parser::{attribute_assignments, procedure_site_targets, AttributeAssignment};

/// SNOMED CT Identifier type (64-bit unsigned integer).
pub type SctId = u64;

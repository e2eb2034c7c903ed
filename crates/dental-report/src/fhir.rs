//! FHIR terminology-server client.
//!
//! Expands ECL constraints through the server's `ValueSet/$expand`
//! operation with an implicit value set:
//!
//! ```text
//! GET {base}/ValueSet/$expand?url={value-set-uri}?fhir_vs=ecl/{constraint}
//! ```
//!
//! The client is blocking on purpose: the pipeline issues at most one
//! terminology call at a time, strictly row by row.

use dental_correlation::{
    CorrelationError, CorrelationResult, ExpansionEntry, PostCoordinatedExpression,
    TerminologyExpander,
};
use dental_expression::{well_known, Concept, ConceptCatalog};
use serde::Deserialize;

use crate::config::AppConfig;

/// ECL for the tooth catalog: all tooth structures minus the subhierarchy
/// that is out of scope for per-tooth correlation.
fn tooth_catalog_ecl() -> String {
    format!(
        "<<{} MINUS <<{}",
        well_known::TOOTH_STRUCTURE,
        well_known::EXCLUDED_TOOTH_STRUCTURE
    )
}

/// ECL for the surface catalog: all single-tooth-surface structures.
fn surface_catalog_ecl() -> String {
    format!("<<{}", well_known::SINGLE_TOOTH_SURFACE)
}

/// ECL for the initial qualifying treatments: composite restorations with
/// the selected procedure-site cardinality.
fn composite_restoration_ecl(cardinality: &str) -> String {
    format!(
        "<<{} |Insertion of composite restoration into tooth|:{}{} |Procedure site|=<<{} |Structure of single tooth surface|",
        well_known::COMPOSITE_RESTORATION,
        cardinality,
        well_known::PROCEDURE_SITE,
        well_known::SINGLE_TOOTH_SURFACE
    )
}

#[derive(Debug, Deserialize)]
struct ValueSetResponse {
    expansion: Option<Expansion>,
}

#[derive(Debug, Deserialize)]
struct Expansion {
    contains: Option<Vec<ContainsEntry>>,
}

#[derive(Debug, Deserialize)]
struct ContainsEntry {
    code: String,
    display: Option<String>,
}

/// Blocking client for a FHIR terminology server's expansion operation.
pub struct FhirTerminologyClient {
    http: reqwest::blocking::Client,
    base_url: String,
    value_set_uri: String,
    username: Option<String>,
    password: Option<String>,
}

impl FhirTerminologyClient {
    /// Creates a client from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: config.fhir_base_url.trim_end_matches('/').to_string(),
            value_set_uri: config.value_set_uri.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn expand_ecl(&self, ecl: &str) -> CorrelationResult<Vec<ContainsEntry>> {
        let endpoint = format!("{}/ValueSet/$expand", self.base_url);
        let value_set = format!("{}?fhir_vs=ecl/{}", self.value_set_uri, ecl);

        let mut request = self.http.get(&endpoint).query(&[("url", value_set.as_str())]);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request
            .send()
            .map_err(|e| expansion_error(ecl, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(expansion_error(ecl, format!("{status}: {body}")));
        }

        let parsed: ValueSetResponse = response
            .json()
            .map_err(|e| expansion_error(ecl, format!("malformed ValueSet response: {e}")))?;

        Ok(parsed.expansion.and_then(|e| e.contains).unwrap_or_default())
    }

    fn concept_catalog(&self, ecl: &str) -> CorrelationResult<ConceptCatalog> {
        let mut catalog = ConceptCatalog::new();
        for entry in self.expand_ecl(ecl)? {
            match entry.code.parse() {
                Ok(id) => catalog.insert(match entry.display {
                    Some(display) => Concept::new(id, display),
                    None => Concept::id_only(id),
                }),
                Err(_) => {
                    tracing::warn!(code = %entry.code, "non-numeric code in catalog expansion");
                }
            }
        }
        Ok(catalog)
    }

    /// Fetches the tooth catalog.
    pub fn teeth(&self) -> CorrelationResult<ConceptCatalog> {
        self.concept_catalog(&tooth_catalog_ecl())
    }

    /// Fetches the tooth-surface catalog.
    pub fn surfaces(&self) -> CorrelationResult<ConceptCatalog> {
        self.concept_catalog(&surface_catalog_ecl())
    }

    /// Fetches the initial qualifying treatment expressions for the given
    /// surface cardinality (e.g. `[1..1]` or `[1..5]`).
    pub fn initial_expressions(
        &self,
        cardinality: &str,
    ) -> CorrelationResult<Vec<PostCoordinatedExpression>> {
        let entries = self.expand_ecl(&composite_restoration_ecl(cardinality))?;
        Ok(entries
            .into_iter()
            .map(|entry| match entry.display {
                Some(display) => PostCoordinatedExpression::new(entry.code, display),
                None => PostCoordinatedExpression::ad_hoc(entry.code),
            })
            .collect())
    }
}

impl TerminologyExpander for FhirTerminologyClient {
    fn expand(&self, constraint: &str) -> CorrelationResult<Vec<ExpansionEntry>> {
        Ok(self
            .expand_ecl(constraint)?
            .into_iter()
            .map(|entry| ExpansionEntry {
                code: entry.code,
                display: entry.display,
            })
            .collect())
    }
}

fn expansion_error(constraint: &str, message: String) -> CorrelationError {
    CorrelationError::Expansion {
        constraint: constraint.to_string(),
        message,
    }
}

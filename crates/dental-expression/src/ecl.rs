//! ECL constraint generation for dental caries correlation.

use std::fmt::Write;

use crate::concept::well_known;
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::PostCoordinatedExpression;

/// Builds the ECL constraint "any dental caries finding on the same tooth"
/// for a resolved expression.
///
/// The constraint anchors on the first resolved tooth site and, when any
/// surface sites were resolved, restricts the finding site further to an OR
/// group of those surfaces in discovery order:
///
/// ```text
/// <<80967001 |Dental caries|:363698007 |Finding site|=245575001,363698007 |Finding site|=(245653002 OR 245659003)
/// ```
///
/// The surface clause is omitted entirely when no surfaces were resolved; an
/// empty OR group is not valid ECL, and a tooth-only constraint still means
/// "any caries on this tooth".
///
/// # Errors
///
/// Returns [`ExpressionError::MissingToothSite`] when the expression has no
/// resolved tooth site. Correlation cannot proceed without a tooth anchor,
/// so the caller must surface or skip the offending row.
pub fn dental_caries_constraint(
    pce: &PostCoordinatedExpression,
) -> ExpressionResult<String> {
    let tooth = pce
        .tooth_site()
        .ok_or_else(|| ExpressionError::MissingToothSite {
            expression: pce.expression().to_string(),
        })?;

    let mut ecl = format!(
        "<<{} |Dental caries|:{} |Finding site|={}",
        well_known::DENTAL_CARIES,
        well_known::FINDING_SITE,
        tooth.concept().id
    );

    let surfaces: Vec<String> = pce
        .surface_sites()
        .map(|s| s.concept().id.to_string())
        .collect();
    if !surfaces.is_empty() {
        // Infallible for String targets.
        let _ = write!(
            ecl,
            ",{} |Finding site|=({})",
            well_known::FINDING_SITE,
            surfaces.join(" OR ")
        );
    }

    Ok(ecl)
}

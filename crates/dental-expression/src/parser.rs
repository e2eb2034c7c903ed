//! Attribute-value scanner for brief compositional grammar.
//!
//! Stored postcoordinated expressions use brief compositional grammar, e.g.
//! `234789004:363704007=245575001,363704007=245653002`. For procedure-site
//! resolution only the flat list of `attribute=value` assignments matters;
//! the grammar has no nesting in the recorded data. The scanner is therefore
//! tolerant by design: anything that is not an assignment (focus concepts,
//! separators, cardinality brackets, display terms) is skipped without error.

use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::sequence::separated_pair;
use nom::IResult;

use crate::concept::well_known;
use crate::SctId;

/// A single `attribute=value` assignment found in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeAssignment {
    /// The attribute type concept ID (left of `=`).
    pub attribute: SctId,
    /// The value concept ID (right of `=`).
    pub value: SctId,
}

fn sctid(input: &str) -> IResult<&str, SctId> {
    map_res(digit1, str::parse)(input)
}

fn assignment(input: &str) -> IResult<&str, AttributeAssignment> {
    let (rest, (attribute, value)) = separated_pair(sctid, char('='), sctid)(input)?;
    Ok((rest, AttributeAssignment { attribute, value }))
}

/// Extracts every `attribute=value` assignment from a compositional
/// expression, in encounter order.
///
/// Returns an empty list when the expression contains no assignments; that
/// is not an error.
///
/// # Examples
///
/// ```rust
/// use dental_expression::attribute_assignments;
///
/// let found = attribute_assignments("234789004:363704007=245575001");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].attribute, 363704007);
/// assert_eq!(found[0].value, 245575001);
/// ```
pub fn attribute_assignments(expression: &str) -> Vec<AttributeAssignment> {
    let mut found = Vec::new();
    let mut rest = expression;

    while let Some(start) = rest.find(|c: char| c.is_ascii_digit()) {
        let candidate = &rest[start..];
        match assignment(candidate) {
            Ok((after, parsed)) => {
                found.push(parsed);
                rest = after;
            }
            Err(_) => {
                // Not an assignment; skip past this digit run.
                let run = candidate
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(candidate.len());
                rest = &candidate[run..];
            }
        }
    }

    found
}

/// Extracts the target codes of every procedure-site (363704007) assignment,
/// in encounter order.
pub fn procedure_site_targets(expression: &str) -> Vec<SctId> {
    attribute_assignments(expression)
        .into_iter()
        .filter(|a| a.attribute == well_known::PROCEDURE_SITE)
        .map(|a| a.value)
        .collect()
}

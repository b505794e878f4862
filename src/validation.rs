//! Sale input validation
//!
//! Pure shape/range checks on sale fields. All violated rules are
//! accumulated; an empty list means the input is acceptable. Type-level
//! coercion failures (a string where a number belongs) are rejected
//! earlier, at the typed request boundary.

/// Maximum length of a designation, in characters.
pub const DESIGN_MAX_LEN: usize = 100;

pub const MSG_DESIGN: &str =
    "Designation must be a non-empty string of at most 100 characters.";
pub const MSG_PRIX_NUMBER: &str = "Price must be a number.";
pub const MSG_PRIX_POSITIVE: &str = "Price must be positive.";
pub const MSG_QUANTITE_INTEGER: &str = "Quantity must be an integer.";
pub const MSG_QUANTITE_POSITIVE: &str = "Quantity must be a positive integer.";

/// Validate sale fields, accumulating every violated rule.
///
/// `None` marks a field absent from the request body.
pub fn validate_vente(
    design: Option<&str>,
    prix: Option<f64>,
    quantite: Option<i64>,
) -> Vec<String> {
    let mut errors = Vec::new();

    match design {
        Some(d) if !d.is_empty() && d.chars().count() <= DESIGN_MAX_LEN => {}
        _ => errors.push(MSG_DESIGN.to_string()),
    }

    match prix {
        None => errors.push(MSG_PRIX_NUMBER.to_string()),
        Some(p) if !(p > 0.0) => errors.push(MSG_PRIX_POSITIVE.to_string()),
        Some(_) => {}
    }

    match quantite {
        None => errors.push(MSG_QUANTITE_INTEGER.to_string()),
        Some(q) if q <= 0 => errors.push(MSG_QUANTITE_POSITIVE.to_string()),
        Some(_) => {}
    }

    errors
}

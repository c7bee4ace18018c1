//! Age-consistency factor.
//!
//! Compares the age derived from the document's date of birth against the
//! age estimated from the face. Face-based age estimation gets less
//! accurate for older subjects, so the tolerance widens with document age.

use chrono::{Datelike, NaiveDate};

/// Neutral score when either side of the comparison is missing.
pub const NEUTRAL_SCORE: f64 = 0.7;

/// Completed years between `date_of_birth` and `as_of`. A date of birth
/// in the future yields 0.
pub fn age_on(date_of_birth: NaiveDate, as_of: NaiveDate) -> u32 {
    if date_of_birth > as_of {
        return 0;
    }
    let mut age = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Score the consistency of the documented and estimated ages as of a
/// reference date.
///
/// Returns the score plus, when both inputs are present, the pair
/// `(document_age, estimated_age)` for reason text. Missing data on
/// either side is neutral ([`NEUTRAL_SCORE`]), not suspicious: many valid
/// documents carry no machine-readable date of birth.
pub fn consistency_score(
    date_of_birth: Option<NaiveDate>,
    estimated_age: Option<u32>,
    as_of: NaiveDate,
) -> (f64, Option<(u32, u32)>) {
    let (dob, estimated) = match (date_of_birth, estimated_age) {
        (Some(dob), Some(estimated)) => (dob, estimated),
        _ => return (NEUTRAL_SCORE, None),
    };

    let document_age = age_on(dob, as_of);
    let diff = document_age.abs_diff(estimated);

    let tolerance = if document_age > 50 {
        10
    } else if document_age > 30 {
        7
    } else {
        5
    };

    let score = if diff <= tolerance {
        1.0
    } else if diff <= tolerance * 2 {
        0.7
    } else if diff <= tolerance * 3 {
        0.4
    } else {
        0.1
    };

    (score, Some((document_age, estimated)))
}

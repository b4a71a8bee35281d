//! Age class parser ("MB2", "FA2", ...)

use crate::error::{Result, TopnError};
use crate::types::{AgeClass, Gender};

/// Splits an age class into gender and age-group token
///
/// The first character must be `M` or `F` (any case); the remainder is the
/// age token and must not be empty.
///
/// # Example
/// ```
/// use ssr_topn_core::{parse_ageclass, Gender};
/// let class = parse_ageclass("MB2").unwrap();
/// assert_eq!(class.gender, Gender::Male);
/// assert_eq!(class.age, "B2");
/// ```
///
/// # Errors
/// `InvalidAgeClass` if the input is blank, shorter than two characters,
/// starts with another letter, or has no age token.
pub fn parse_ageclass(ageclass: &str) -> Result<AgeClass> {
    let s = ageclass.trim();
    let mut chars = s.chars();

    let gender = match chars.next() {
        Some('M' | 'm') => Gender::Male,
        Some('F' | 'f') => Gender::Female,
        Some(_) => {
            return Err(TopnError::InvalidAgeClass(format!(
                "'{}' must start with M or F, e.g. MB2 or FA2",
                s
            )));
        }
        None => {
            return Err(TopnError::InvalidAgeClass(
                "age class is empty, expected e.g. MB2 or FA2".to_string(),
            ));
        }
    };

    let age = chars.as_str().trim();
    if age.is_empty() {
        return Err(TopnError::InvalidAgeClass(format!(
            "'{}' is missing the age group, e.g. A2 or B2",
            s
        )));
    }

    Ok(AgeClass {
        gender,
        age: age.to_string(),
    })
}

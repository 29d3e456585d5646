//! Equality engine
//!
//! Rules, applied in order:
//! 1. both absent: equal
//! 2. one absent: not equal
//! 3. two string lists: equal iff same multiset (order ignored)
//! 4. two string maps: equal iff same keys with same values
//! 5. anything else: structural equality, so mismatched kinds never match

use crate::value::AttributeValue;

/// Compare two optional values under drift semantics
pub fn values_equal(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> bool {
    match (a, b) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some(AttributeValue::StringList(a)), Some(AttributeValue::StringList(b))) => {
            string_lists_equal(a, b)
        }
        (Some(AttributeValue::StringMap(a)), Some(AttributeValue::StringMap(b))) => a == b,
        (Some(a), Some(b)) => a == b,
    }
}

fn string_lists_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted: Vec<&String> = a.iter().collect();
    let mut b_sorted: Vec<&String> = b.iter().collect();
    a_sorted.sort_unstable();
    b_sorted.sort_unstable();
    a_sorted == b_sorted
}

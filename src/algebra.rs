//! Set operations used to apply incremental attribute changes.
//!
//! Both operations work on ordered lists rather than sets: the base list keeps
//! its order and any duplicates it already had. Items in the change list may
//! be given as `T` or as `Option<T>`; `None` entries are skipped.

use crate::value::AttributeValue;

/// Append every item of `to_add` that isn't already in the result.
///
/// The check runs against the accumulating result, so duplicates inside
/// `to_add` are added only once.
pub fn union<T, I>(base: &[T], to_add: I) -> Vec<T>
where
    T: PartialEq + Clone,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    let mut result = base.to_vec();
    for item in to_add.into_iter().filter_map(Into::into) {
        if !result.contains(&item) {
            result.push(item);
        }
    }
    result
}

/// Remove one occurrence (the first) of each item of `to_remove`.
///
/// Items not present are ignored.
pub fn subtract<T, I>(base: &[T], to_remove: I) -> Vec<T>
where
    T: PartialEq + Clone,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    let mut result = base.to_vec();
    for item in to_remove.into_iter().filter_map(Into::into) {
        if let Some(pos) = result.iter().position(|v| *v == item) {
            result.remove(pos);
        }
    }
    result
}

/// An incremental change to one attribute's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDelta {
    Add(Vec<AttributeValue>),
    Remove(Vec<AttributeValue>),
    /// Replace all values; duplicates in the new list are collapsed.
    Replace(Vec<AttributeValue>),
}

impl AttributeDelta {
    pub fn apply(&self, base: &[AttributeValue]) -> Vec<AttributeValue> {
        match self {
            AttributeDelta::Add(values) => union(base, values.iter().cloned()),
            AttributeDelta::Remove(values) => subtract(base, values.iter().cloned()),
            AttributeDelta::Replace(values) => union(&[], values.iter().cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_dedups_in_order() {
        assert_eq!(union(&["a", "b"], ["b", "c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_union_keeps_base_duplicates() {
        assert_eq!(union(&["a", "a"], ["a", "b", "b"]), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_union_skips_none() {
        let to_add: [Option<i32>; 3] = [None, Some(2), None];
        assert_eq!(union(&[1], to_add), vec![1, 2]);
    }

    #[test]
    fn test_subtract_single_occurrence() {
        assert_eq!(subtract(&["a", "b", "a"], ["a"]), vec!["b", "a"]);
        assert_eq!(subtract(&["a", "b", "a"], ["a", "a"]), vec!["b"]);
    }

    #[test]
    fn test_subtract_absent_is_noop() {
        assert_eq!(subtract(&["a", "b"], ["c"]), vec!["a", "b"]);
        assert_eq!(subtract(&["a"], [None::<&str>]), vec!["a"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let base = vec![1, 2, 3];
        let change = vec![2];
        let _ = subtract(&base, change.iter().copied());
        let _ = union(&base, change.iter().copied());
        assert_eq!(base, vec![1, 2, 3]);
        assert_eq!(change, vec![2]);
    }

    #[test]
    fn test_delta_secret_values_compare_by_payload() {
        let base = vec![AttributeValue::secret_text("old")];
        let delta = AttributeDelta::Remove(vec![AttributeValue::secret_text("old")]);
        assert!(delta.apply(&base).is_empty());

        let delta = AttributeDelta::Add(vec![
            AttributeValue::secret_text("old"),
            AttributeValue::secret_text("new"),
        ]);
        assert_eq!(
            delta.apply(&base),
            vec![
                AttributeValue::secret_text("old"),
                AttributeValue::secret_text("new")
            ]
        );
    }

    #[test]
    fn test_delta_replace_dedups() {
        let base = vec![AttributeValue::plain("x")];
        let delta = AttributeDelta::Replace(vec![
            AttributeValue::plain("a"),
            AttributeValue::plain("a"),
            AttributeValue::plain("b"),
        ]);
        assert_eq!(
            delta.apply(&base),
            vec![AttributeValue::plain("a"), AttributeValue::plain("b")]
        );
    }
}

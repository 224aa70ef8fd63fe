//! One-hot encoding for the location column.
//!
//! Categories are the sorted unique values seen during fit. A configured
//! drop category (the `"other"` bucket) never gets a column; its rows encode
//! as all zeros.

use crate::preprocessing::error::PipelineError;
use std::collections::BTreeSet;

/// Unfitted one-hot encoder.
///
/// # Example
/// ```
/// use bangalore_homeprice::preprocessing::OneHotEncoder;
///
/// let fitted = OneHotEncoder::new()
///     .with_drop("other")
///     .fit(["Whitefield", "other", "Hebbal", "Whitefield"])
///     .unwrap();
/// assert_eq!(fitted.categories(), ["Hebbal", "Whitefield"]);
/// assert_eq!(fitted.index_of("Whitefield"), Some(1));
/// assert_eq!(fitted.index_of("other"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    drop: Option<String>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category that is recognised but gets no output column.
    pub fn with_drop(mut self, category: &str) -> Self {
        self.drop = Some(category.to_string());
        self
    }

    /// Learns the sorted set of categories.
    pub fn fit<I, S>(&self, values: I) -> Result<FittedOneHotEncoder, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        for v in values {
            seen.insert(v.as_ref().to_string());
        }
        if seen.is_empty() {
            return Err(PipelineError::EmptyData {
                stage: "one-hot encoding",
            });
        }
        if let Some(drop) = &self.drop {
            seen.remove(drop);
        }
        Ok(FittedOneHotEncoder {
            categories: seen.into_iter().collect(),
        })
    }
}

/// Fitted encoder: one output column per category.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOneHotEncoder {
    categories: Vec<String>,
}

impl FittedOneHotEncoder {
    /// Output column names, in output order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn n_features_out(&self) -> usize {
        self.categories.len()
    }

    /// Output column of `value`, if it has one.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorts_and_dedups() {
        let fitted = OneHotEncoder::new().fit(["b", "a", "c", "a"]).unwrap();
        assert_eq!(fitted.categories(), ["a", "b", "c"]);
        assert_eq!(fitted.n_features_out(), 3);
    }

    #[test]
    fn test_drop_category_has_no_column() {
        let fitted = OneHotEncoder::new()
            .with_drop("other")
            .fit(["other", "x"])
            .unwrap();
        assert_eq!(fitted.categories(), ["x"]);
        assert_eq!(fitted.index_of("other"), None);
    }

    #[test]
    fn test_index_of_follows_sorted_order() {
        let fitted = OneHotEncoder::new().fit(["c", "a", "b"]).unwrap();
        assert_eq!(fitted.index_of("a"), Some(0));
        assert_eq!(fitted.index_of("c"), Some(2));
        assert_eq!(fitted.index_of("z"), None);
    }

    #[test]
    fn test_fit_empty_fails() {
        let values: Vec<&str> = vec![];
        assert!(OneHotEncoder::new().fit(values).is_err());
    }
}

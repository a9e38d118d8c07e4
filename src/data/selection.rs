//! Selection Module
//! The user-chosen set of categories to display.

use std::collections::BTreeSet;

/// Set of selected category names.
///
/// An empty selection is a valid state meaning "show nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    categories: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every given category.
    pub fn all<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        categories.into_iter().collect()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Add or remove a category. Returns whether the category is now selected.
    pub fn set(&mut self, category: &str, selected: bool) -> bool {
        if selected {
            self.categories.insert(category.to_string());
        } else {
            self.categories.remove(category);
        }
        selected
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().map(Into::into).collect(),
        }
    }
}

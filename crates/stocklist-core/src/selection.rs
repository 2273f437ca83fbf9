// ── UI selection state ──
//
// Which category, letter and (at most one) expanded product the user is
// looking at. Transient: lives for the session only.

use crate::model::{Category, ProductId};

/// Selection shared by the CLI defaults and the TUI catalog screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    category: Category,
    letter: char,
    expanded: Option<ProductId>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            category: Category::default(),
            letter: 'A',
            expanded: None,
        }
    }
}

impl Selection {
    pub fn new(category: Category, letter: char) -> Self {
        Self {
            category,
            letter,
            expanded: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn expanded(&self) -> Option<&ProductId> {
        self.expanded.as_ref()
    }

    /// Switch category. The letter and expanded product are kept.
    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn select_letter(&mut self, letter: char) {
        self.letter = letter;
    }

    /// Expand `id`, or collapse it when it is already expanded.
    /// Returns `true` when `id` is expanded afterwards.
    pub fn toggle_product(&mut self, id: &ProductId) -> bool {
        if self.is_expanded(id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(id.clone());
            true
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn is_expanded(&self, id: &ProductId) -> bool {
        self.expanded.as_ref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_jackets_letter_a() {
        let sel = Selection::default();
        assert_eq!(sel.category(), Category::Jackets);
        assert_eq!(sel.letter(), 'A');
        assert!(sel.expanded().is_none());
    }

    #[test]
    fn toggle_expands_then_collapses() {
        let mut sel = Selection::default();
        let id = ProductId::from("abc");

        assert!(sel.toggle_product(&id));
        assert!(sel.is_expanded(&id));
        assert!(!sel.toggle_product(&id));
        assert!(!sel.is_expanded(&id));
    }

    #[test]
    fn toggling_another_product_replaces_expansion() {
        let mut sel = Selection::default();
        let a = ProductId::from("a");
        let b = ProductId::from("b");

        sel.toggle_product(&a);
        sel.toggle_product(&b);
        assert!(!sel.is_expanded(&a));
        assert!(sel.is_expanded(&b));
    }

    #[test]
    fn category_switch_keeps_letter_and_expansion() {
        let mut sel = Selection::default();
        let id = ProductId::from("abc");
        sel.select_letter('K');
        sel.toggle_product(&id);

        sel.select_category(Category::Accessories);

        assert_eq!(sel.category(), Category::Accessories);
        assert_eq!(sel.letter(), 'K');
        assert!(sel.is_expanded(&id));

        sel.collapse();
        assert!(sel.expanded().is_none());
    }
}

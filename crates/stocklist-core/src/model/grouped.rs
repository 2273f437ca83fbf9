// ── Alphabetical grouping ──
//
// A category's product list is sorted by name and partitioned by the
// first character of the name. Every product lands in exactly one group.

use std::collections::BTreeMap;

use serde::Serialize;

use super::product::Product;

/// The products whose name starts with `letter`, in ascending name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterGroup {
    pub letter: char,
    pub products: Vec<Product>,
}

/// A category's products keyed by first letter of the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedCatalog {
    groups: BTreeMap<char, LetterGroup>,
    len: usize,
}

impl GroupedCatalog {
    /// Sort by name (stable, so equal names keep input order) and group.
    pub fn from_products(mut products: Vec<Product>) -> Self {
        products.sort_by(|a, b| a.name.cmp(&b.name));
        let len = products.len();

        let mut groups: BTreeMap<char, LetterGroup> = BTreeMap::new();
        for product in products {
            let letter = product.group_letter();
            groups
                .entry(letter)
                .or_insert_with(|| LetterGroup {
                    letter,
                    products: Vec::new(),
                })
                .products
                .push(product);
        }

        Self { groups, len }
    }

    /// Group letters in ascending order.
    pub fn letters(&self) -> Vec<char> {
        self.groups.keys().copied().collect()
    }

    pub fn group(&self, letter: char) -> Option<&LetterGroup> {
        self.groups.get(&letter)
    }

    /// Products under `letter`; empty when the letter has no group.
    pub fn products_for(&self, letter: char) -> &[Product] {
        self.groups
            .get(&letter)
            .map_or(&[], |group| group.products.as_slice())
    }

    /// Find a product by id, ignoring ASCII case.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.iter_products().find(|p| p.id.matches(id))
    }

    pub fn groups(&self) -> impl Iterator<Item = &LetterGroup> {
        self.groups.values()
    }

    /// Every product, letter by letter.
    pub fn iter_products(&self) -> impl Iterator<Item = &Product> {
        self.groups.values().flat_map(|g| g.products.iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.into(),
            product_type: "jackets".into(),
            price: 10.0,
            manufacturer: "reps".into(),
            colors: Vec::new(),
        }
    }

    #[test]
    fn partitions_without_loss_or_duplication() {
        let input = vec![
            product("1", "BEAUTY"),
            product("2", "AKKOL"),
            product("3", "BAR"),
            product("4", "ZOO"),
            product("5", "ALPHA"),
        ];
        let grouped = GroupedCatalog::from_products(input.clone());

        assert_eq!(grouped.len(), input.len());
        let mut ids: Vec<&str> = grouped.iter_products().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        for group in grouped.groups() {
            assert!(group.products.iter().all(|p| p.group_letter() == group.letter));
        }
    }

    #[test]
    fn letters_and_groups_are_sorted() {
        let grouped = GroupedCatalog::from_products(vec![
            product("1", "BEAUTY"),
            product("2", "AKKOL"),
            product("3", "BAR"),
            product("4", "ALPHA"),
        ]);

        assert_eq!(grouped.letters(), vec!['A', 'B']);
        let names: Vec<&str> = grouped
            .products_for('A')
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["AKKOL", "ALPHA"]);
    }

    #[test]
    fn equal_names_keep_input_order() {
        let grouped = GroupedCatalog::from_products(vec![
            product("second", "SAME"),
            product("first", "SAME"),
        ]);
        let ids: Vec<&str> = grouped
            .products_for('S')
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn absent_letter_is_empty_slice() {
        let grouped = GroupedCatalog::from_products(vec![product("1", "AKKOL")]);
        assert!(grouped.products_for('Q').is_empty());
        assert!(grouped.group('Q').is_none());
    }

    #[test]
    fn empty_names_group_under_hash() {
        let grouped = GroupedCatalog::from_products(vec![product("1", ""), product("2", "AB")]);
        assert_eq!(grouped.letters(), vec!['#', 'A']);
        assert_eq!(grouped.products_for('#').len(), 1);
    }

    #[test]
    fn find_ignores_case() {
        let grouped = GroupedCatalog::from_products(vec![product("abc123", "AKKOL")]);
        assert_eq!(grouped.find("ABC123").map(|p| p.name.as_str()), Some("AKKOL"));
        assert!(grouped.find("nope").is_none());
    }

    #[test]
    fn empty_catalog() {
        let grouped = GroupedCatalog::from_products(Vec::new());
        assert!(grouped.is_empty());
        assert!(grouped.letters().is_empty());
    }
}

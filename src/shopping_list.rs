use crate::ingredient::ParsedIngredient;
use log::debug;
use serde::Serialize;

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListEntry {
    /// Generated id, never reused within a list's lifetime
    pub id: String,
    pub count: Option<f64>,
    pub unit: Option<String>,
    pub ingredient: String,
}

/// Shopping list in insertion order. Entries are never merged.
#[derive(Debug, Default)]
pub struct ShoppingListModel {
    entries: Vec<ShoppingListEntry>,
    next_id: u64,
}

impl ShoppingListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and return a copy of it.
    ///
    /// A non-finite count is stored as `None`.
    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: Option<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingListEntry {
        self.next_id += 1;
        let entry = ShoppingListEntry {
            id: format!("item-{}", self.next_id),
            count: count.filter(|c| c.is_finite()),
            unit,
            ingredient: ingredient.into(),
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Add one entry per parsed ingredient, in order
    pub fn add_ingredients(&mut self, ingredients: &[ParsedIngredient]) -> Vec<ShoppingListEntry> {
        let added: Vec<ShoppingListEntry> = ingredients
            .iter()
            .map(|i| self.add_item(i.quantity, i.unit.clone(), i.name.clone()))
            .collect();
        debug!("Added {} items to shopping list", added.len());
        added
    }

    /// Remove an entry. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }

    /// Overwrite the count of an entry. Unknown ids are ignored.
    ///
    /// Non-finite counts (e.g. from an unparsable input field) clear the count.
    pub fn update_count(&mut self, id: &str, count: Option<f64>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.count = count.filter(|c| c.is_finite());
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ShoppingListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Player inventory for the adventure

use super::types::Item;

/// Ordered list of held items; insertion order is kept for narration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored records, dropping later duplicates by name.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut inventory = Self::new();
        for item in items {
            inventory.add(item);
        }
        inventory
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    /// Append `item`; returns false (and drops it) when one with the same name is held.
    pub fn add(&mut self, item: Item) -> bool {
        if self.contains(&item.name) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

/// Lines for the inventory listing.
pub fn format_inventory(inventory: &Inventory) -> Vec<String> {
    if inventory.is_empty() {
        return vec!["Inventory is empty".to_string()];
    }
    let mut lines = vec!["Inventory: ".to_string()];
    lines.extend(inventory.names().into_iter().map(str::to_string));
    lines
}

/// Lines for `inspect`: every held item with its description.
pub fn format_item_examination(inventory: &Inventory) -> Vec<String> {
    if inventory.is_empty() {
        return vec!["You do not have any items in your inventory".to_string()];
    }
    let mut lines = vec!["Here are your items: ".to_string()];
    lines.extend(inventory.items().iter().map(Item::to_string));
    lines
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use super::EntityId;
use crate::config::GameConfig;

/// Body slot occupied by a piece of armor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ArmorSlot {
    Head,
    Body,
    Hands,
    Feet,
    Cloak,
}

/// Single-letter inventory key from the fixed 26-letter alphabet.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InvKey(pub char);

impl fmt::Display for InvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyed, stack-based item container owned by exactly one actor.
///
/// Each occupied key maps to a non-empty stack of identically-named items;
/// a stack is removed outright when it empties. At most `capacity` distinct
/// keys may be occupied (capacity 0 = cannot hold items). `wielded` and the
/// per-slot armor keys always reference occupied keys: every removal path
/// runs through [`Inventory::clear_refs_to`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: BTreeMap<InvKey, Vec<EntityId>>,
    wielded: Option<InvKey>,
    armor: BTreeMap<ArmorSlot, InvKey>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: BTreeMap::new(),
            wielded: None,
            armor: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied keys (distinct stacks).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Occupied keys and their stacks, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (InvKey, &[EntityId])> {
        self.items.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn stack(&self, key: InvKey) -> Option<&[EntityId]> {
        self.items.get(&key).map(Vec::as_slice)
    }

    /// First item of the stack under `key`; the representative consulted for
    /// name, wielding, and wearing.
    pub fn first(&self, key: InvKey) -> Option<EntityId> {
        self.items.get(&key).and_then(|stack| stack.first()).copied()
    }

    /// Appends an item onto an existing stack. Returns false if the key is
    /// unoccupied.
    pub fn push_onto(&mut self, key: InvKey, item: EntityId) -> bool {
        match self.items.get_mut(&key) {
            Some(stack) => {
                stack.push(item);
                true
            }
            None => false,
        }
    }

    /// Whether a new distinct stack could be started right now.
    pub fn can_accept_new_stack(&self) -> bool {
        self.items.len() < self.capacity
            && GameConfig::INVENTORY_KEYS
                .chars()
                .map(InvKey)
                .any(|key| !self.items.contains_key(&key))
    }

    /// Starts a fresh stack under the first free letter. Returns the assigned
    /// key, or None when the capacity or the alphabet is exhausted.
    pub fn insert_new_stack(&mut self, item: EntityId) -> Option<InvKey> {
        if self.items.len() >= self.capacity {
            return None;
        }
        let key = GameConfig::INVENTORY_KEYS
            .chars()
            .map(InvKey)
            .find(|key| !self.items.contains_key(key))?;
        self.items.insert(key, vec![item]);
        Some(key)
    }

    /// Removes an entire stack, clearing any wielded/worn reference to it.
    pub fn remove_stack(&mut self, key: InvKey) -> Option<Vec<EntityId>> {
        let stack = self.items.remove(&key)?;
        self.clear_refs_to(key);
        Some(stack)
    }

    /// Removes one item from the top of a stack, dropping the stack (and any
    /// reference to it) when it empties.
    pub fn take_one(&mut self, key: InvKey) -> Option<EntityId> {
        let stack = self.items.get_mut(&key)?;
        let item = stack.pop()?;
        if stack.is_empty() {
            self.items.remove(&key);
            self.clear_refs_to(key);
        }
        Some(item)
    }

    pub fn wielded(&self) -> Option<InvKey> {
        self.wielded
    }

    /// Points the single wield slot at `key`. The previously wielded stack
    /// stays in the inventory; only the reference moves.
    pub fn wield(&mut self, key: InvKey) {
        debug_assert!(self.items.contains_key(&key));
        self.wielded = Some(key);
    }

    pub fn armor_in(&self, slot: ArmorSlot) -> Option<InvKey> {
        self.armor.get(&slot).copied()
    }

    /// Points a body slot at `key`, replacing any prior reference without
    /// unequipping the displaced item from the inventory.
    pub fn wear(&mut self, slot: ArmorSlot, key: InvKey) {
        debug_assert!(self.items.contains_key(&key));
        self.armor.insert(slot, key);
    }

    fn clear_refs_to(&mut self, key: InvKey) {
        if self.wielded == Some(key) {
            self.wielded = None;
        }
        self.armor.retain(|_, worn| *worn != key);
    }
}

//! Actor and item catalogs.
//!
//! A catalog maps definition ids (e.g. "orc", "health_potion") to templates.
//! [`ActorCatalog::builtin`] and [`ItemCatalog::builtin`] carry the stock
//! content; worlds can also be loaded from RON files keyed the same way.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use game_core::{ArmorSlot, ConsumableKind, Fighter, ItemKind, Rgb};

use crate::templates::{ActorTemplate, ItemTemplate};

/// Catalog of actor templates keyed by definition id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorCatalog {
    templates: BTreeMap<String, ActorTemplate>,
}

impl ActorCatalog {
    /// The stock bestiary: the player and the two standard enemies.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            "player".to_string(),
            ActorTemplate {
                name: "Player".to_string(),
                glyph: '@',
                color: Rgb(255, 255, 255),
                fighter: Fighter::new(30, 0, 1),
                inventory_capacity: 26,
            },
        );
        templates.insert(
            "orc".to_string(),
            ActorTemplate {
                name: "Orc".to_string(),
                glyph: 'o',
                color: Rgb(63, 127, 63),
                fighter: Fighter::new(10, 0, 3),
                inventory_capacity: 0,
            },
        );
        templates.insert(
            "troll".to_string(),
            ActorTemplate {
                name: "Troll".to_string(),
                glyph: 'T',
                color: Rgb(0, 127, 0),
                // Trolls hit hard but lumber: half again the base delays.
                fighter: Fighter::new(16, 1, 4).with_delays(15, 15),
                inventory_capacity: 0,
            },
        );
        Self { templates }
    }

    /// Loads a catalog from RON text: a map of id to template.
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        let templates: BTreeMap<String, ActorTemplate> =
            ron::from_str(text).context("failed to parse actor catalog RON")?;
        Ok(Self { templates })
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read actor catalog {}", path.display()))?;
        Self::from_ron_str(&text)
    }

    pub fn get(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

/// Catalog of item templates keyed by definition id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    templates: BTreeMap<String, ItemTemplate>,
}

impl ItemCatalog {
    /// The stock item set: one potion, three scrolls, two weapons, two
    /// pieces of armor.
    pub fn builtin() -> Self {
        let scroll = Rgb(255, 255, 0);
        let mut templates = BTreeMap::new();
        templates.insert(
            "health_potion".to_string(),
            ItemTemplate {
                name: "Health Potion".to_string(),
                glyph: '!',
                color: Rgb(127, 0, 255),
                kind: ItemKind::Consumable(ConsumableKind::Healing { amount: 4 }),
            },
        );
        templates.insert(
            "lightning_scroll".to_string(),
            ItemTemplate {
                name: "Lightning Scroll".to_string(),
                glyph: '~',
                color: scroll,
                kind: ItemKind::Consumable(ConsumableKind::Lightning {
                    damage: 20,
                    range: 5,
                }),
            },
        );
        templates.insert(
            "confusion_scroll".to_string(),
            ItemTemplate {
                name: "Confusion Scroll".to_string(),
                glyph: '~',
                color: Rgb(207, 63, 255),
                kind: ItemKind::Consumable(ConsumableKind::Confusion { turns: 10 }),
            },
        );
        templates.insert(
            "fireball_scroll".to_string(),
            ItemTemplate {
                name: "Fireball Scroll".to_string(),
                glyph: '~',
                color: Rgb(255, 0, 0),
                kind: ItemKind::Consumable(ConsumableKind::Fireball {
                    damage: 12,
                    radius: 3,
                }),
            },
        );
        templates.insert(
            "dagger".to_string(),
            ItemTemplate {
                name: "Dagger".to_string(),
                glyph: ')',
                color: Rgb(0, 191, 255),
                kind: ItemKind::Weapon { damage: 2 },
            },
        );
        templates.insert(
            "sword".to_string(),
            ItemTemplate {
                name: "Sword".to_string(),
                glyph: ')',
                color: Rgb(0, 191, 255),
                kind: ItemKind::Weapon { damage: 4 },
            },
        );
        templates.insert(
            "leather_armor".to_string(),
            ItemTemplate {
                name: "Leather Armor".to_string(),
                glyph: '[',
                color: Rgb(139, 69, 19),
                kind: ItemKind::Armor {
                    defense: 1,
                    slot: ArmorSlot::Body,
                },
            },
        );
        templates.insert(
            "chain_mail".to_string(),
            ItemTemplate {
                name: "Chain Mail".to_string(),
                glyph: '[',
                color: Rgb(139, 69, 19),
                kind: ItemKind::Armor {
                    defense: 3,
                    slot: ArmorSlot::Body,
                },
            },
        );
        Self { templates }
    }

    /// Loads a catalog from RON text: a map of id to template.
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        let templates: BTreeMap<String, ItemTemplate> =
            ron::from_str(text).context("failed to parse item catalog RON")?;
        Ok(Self { templates })
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read item catalog {}", path.display()))?;
        Self::from_ron_str(&text)
    }

    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

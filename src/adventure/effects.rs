//! Side effects fired when an item is used for the first time.
//!
//! Each [`UseEffect`] tag maps to one entry in [`EFFECT_TABLE`]: a narration
//! line and a pure world transformation. The engine looks the tag up after
//! flipping an item's `used` flag and applies the transformation exactly once.

use super::engine::World;
use super::seed::{moonstone, rose_stem, AGELESS_ROSE, CAVE_ENTRANCE, CAVE_OPENED_DESCRIPTION};
use super::types::UseEffect;

pub type EffectFn = fn(World) -> World;

pub struct EffectEntry {
    pub tag: UseEffect,
    pub narration: &'static str,
    pub apply: EffectFn,
}

pub static EFFECT_TABLE: &[EffectEntry] = &[EffectEntry {
    tag: UseEffect::RoseOffered,
    narration: "The rose's petals scatter into the dark, and something cool and smooth drops into your palm.",
    apply: rose_offered,
}];

pub fn lookup(tag: UseEffect) -> Option<&'static EffectEntry> {
    EFFECT_TABLE.iter().find(|entry| entry.tag == tag)
}

/// Rose becomes a stem, the cave entrance opens and empties, and the
/// moonstone lands in the inventory.
fn rose_offered(mut world: World) -> World {
    if let Some(rose) = world.inventory.find_mut(AGELESS_ROSE) {
        *rose = rose_stem();
    }
    if let Some(cave) = world.grid.room_mut(CAVE_ENTRANCE) {
        cave.description = Some(CAVE_OPENED_DESCRIPTION.to_string());
        cave.items.clear();
    }
    world.inventory.add(moonstone());
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::seed::{ageless_rose, MOONSTONE, ROSE_STEM};

    #[test]
    fn every_tag_has_an_entry() {
        for tag in [UseEffect::RoseOffered] {
            assert!(lookup(tag).is_some(), "no effect registered for {:?}", tag);
        }
    }

    #[test]
    fn rose_offered_transforms_world() {
        let mut world = World::fresh();
        world.inventory.add(ageless_rose());
        let world = (lookup(UseEffect::RoseOffered).unwrap().apply)(world);

        assert_eq!(world.inventory.names(), vec![ROSE_STEM, MOONSTONE]);
        assert!(world.inventory.items()[0].used);
        let cave = world.grid.room(CAVE_ENTRANCE).unwrap();
        assert!(cave.items.is_empty());
        assert_eq!(cave.description.as_deref(), Some(CAVE_OPENED_DESCRIPTION));
    }

    #[test]
    fn rose_offered_twice_does_not_duplicate_moonstone() {
        let mut world = World::fresh();
        world.inventory.add(ageless_rose());
        let once = rose_offered(world);
        let twice = rose_offered(once.clone());
        assert_eq!(once.inventory, twice.inventory);
    }
}

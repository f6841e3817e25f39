//! # Demonstration Components
//!
//! The plain-data component kinds the walkthrough composes entities from.
//! Each kind declares its dense index once; [`component_registry`] registers
//! them in that order and is the single place the set is enumerated.
//!
//! Payloads are opaque to the store: it only manages the identifier and
//! owner stamps. Everything else here is data plus a `describe` rendering.

use std::fmt;

use packrat_core::{Component, Ident, Kind, KindRegistry, Record, World};

use crate::text::FixedText;

/// Builds the kind registry for the demonstration component set.
///
/// Registration order must match each kind's declared index; the registry
/// validates this at startup.
#[must_use]
pub fn component_registry() -> KindRegistry {
    KindRegistry::builder()
        .register::<Transform>()
        .register::<Health>()
        .register::<Inventory>()
        .register::<ShortDescription>()
        .register::<Description>()
        .register::<Physics>()
        .build()
}

/// Planar position of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// World x coordinate.
    pub x: f32,
    /// World y coordinate.
    pub y: f32,
    id: Ident,
    owner: Ident,
}

impl Transform {
    /// Creates a transform at the given position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

impl Record for Transform {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for Transform {
    const KIND: Kind = Kind::new(0);
    const NAME: &'static str = "transform";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        format!("transform {{x: {}, y: {}}}", self.x, self.y)
    }
}

/// Hit points and status effects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Health {
    /// Remaining hit points.
    pub health: f32,
    /// Whether poison is currently draining this entity.
    pub poisoned: bool,
    id: Ident,
    owner: Ident,
}

impl Health {
    /// Creates a health record.
    #[must_use]
    pub fn new(health: f32, poisoned: bool) -> Self {
        Self {
            health,
            poisoned,
            ..Self::default()
        }
    }
}

impl Record for Health {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for Health {
    const KIND: Kind = Kind::new(1);
    const NAME: &'static str = "health";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        format!(
            "health {{health: {}, poisoned: {}}}",
            self.health, self.poisoned
        )
    }
}

/// Carryable item types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Item {
    /// A trusty sword.
    #[default]
    Sword,
    /// A woodcutter's axe.
    Axe,
    /// A healing potion.
    Potion,
    /// A single arrow.
    Arrow,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Item::Sword => "Sword",
            Item::Axe => "Axe",
            Item::Potion => "Potion",
            Item::Arrow => "Arrow",
        };
        f.write_str(name)
    }
}

/// One inventory slot: an item and how many of it are stacked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemSlot {
    /// The stacked item.
    pub item: Item,
    /// Stack size; zero marks the slot unused.
    pub count: u32,
}

/// Maximum number of slots in an inventory.
pub const MAX_ITEMS: usize = 64;

/// A fixed block of item slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inventory {
    /// The slot block; unused slots carry a zero count.
    pub slots: [ItemSlot; MAX_ITEMS],
    id: Ident,
    owner: Ident,
}

impl Inventory {
    /// Creates an inventory from item/count pairs.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_ITEMS`] pairs are given.
    #[must_use]
    pub fn new(contents: &[(Item, u32)]) -> Self {
        assert!(
            contents.len() <= MAX_ITEMS,
            "inventory holds at most {MAX_ITEMS} stacks"
        );
        let mut inventory = Self::default();
        for (slot, &(item, count)) in inventory.slots.iter_mut().zip(contents) {
            slot.item = item;
            slot.count = count;
        }
        inventory
    }

    /// Total count of `item` across all slots.
    #[must_use]
    pub fn count_of(&self, item: Item) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item == item)
            .map(|slot| slot.count)
            .sum()
    }

    /// Iterates the occupied slots.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemSlot> {
        self.slots.iter().filter(|slot| slot.count > 0)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [ItemSlot::default(); MAX_ITEMS],
            id: Ident::INVALID,
            owner: Ident::INVALID,
        }
    }
}

impl Record for Inventory {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for Inventory {
    const KIND: Kind = Kind::new(2);
    const NAME: &'static str = "inventory";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        let stacks: Vec<String> = self
            .stacks()
            .map(|slot| {
                if slot.count > 1 {
                    format!("{} ({})", slot.item, slot.count)
                } else {
                    slot.item.to_string()
                }
            })
            .collect();
        format!("inventory {{{}}}", stacks.join(", "))
    }
}

/// A one-line label, bounded at 32 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShortDescription {
    /// The label text.
    pub text: FixedText<32>,
    id: Ident,
    owner: Ident,
}

impl ShortDescription {
    /// Creates a label, truncating overlong input.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: FixedText::from(text),
            ..Self::default()
        }
    }
}

impl Record for ShortDescription {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for ShortDescription {
    const KIND: Kind = Kind::new(3);
    const NAME: &'static str = "short_description";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        format!("short_description {{text: \"{}\"}}", self.text)
    }
}

/// Prose describing an entity, bounded at 128 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Description {
    /// The description text.
    pub text: FixedText<128>,
    id: Ident,
    owner: Ident,
}

impl Description {
    /// Creates a description, truncating overlong input.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: FixedText::from(text),
            ..Self::default()
        }
    }
}

impl Record for Description {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for Description {
    const KIND: Kind = Kind::new(4);
    const NAME: &'static str = "description";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        format!("description {{text: \"{}\"}}", self.text)
    }
}

/// Velocity and the previously integrated position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Physics {
    /// Velocity along x, units per second.
    pub vx: f32,
    /// Velocity along y, units per second.
    pub vy: f32,
    /// Position x before the last integration step.
    pub oldx: f32,
    /// Position y before the last integration step.
    pub oldy: f32,
    id: Ident,
    owner: Ident,
}

impl Physics {
    /// Creates a physics record with the given velocity.
    #[must_use]
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            vx,
            vy,
            ..Self::default()
        }
    }
}

impl Record for Physics {
    fn id(&self) -> Ident {
        self.id
    }
    fn bind_id(&mut self, id: Ident) {
        self.id = id;
    }
}

impl Component for Physics {
    const KIND: Kind = Kind::new(5);
    const NAME: &'static str = "physics";

    fn owner(&self) -> Ident {
        self.owner
    }
    fn bind_owner(&mut self, owner: Ident) {
        self.owner = owner;
    }
    fn describe(&self) -> String {
        format!(
            "physics {{vx: {}, vy: {}, oldx: {}, oldy: {}}}",
            self.vx, self.vy, self.oldx, self.oldy
        )
    }
}

/// Shorthand accessors for the most common demo kinds, mirroring how the
/// walkthrough reads entities.
pub trait Shorthand {
    /// The entity's transform, or the sentinel transform when absent.
    fn transform(&self, entity: Ident) -> &Transform;
    /// The entity's health, or the sentinel health when absent.
    fn health(&self, entity: Ident) -> &Health;
    /// The entity's physics, or the sentinel physics when absent.
    fn physics(&self, entity: Ident) -> &Physics;
}

impl Shorthand for World {
    fn transform(&self, entity: Ident) -> &Transform {
        self.component::<Transform>(entity)
    }
    fn health(&self, entity: Ident) -> &Health {
        self.component::<Health>(entity)
    }
    fn physics(&self, entity: Ident) -> &Physics {
        self.component::<Physics>(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_kinds_in_order() {
        let registry = component_registry();
        assert_eq!(registry.len(), 6);
        let names: Vec<&str> = registry.iter().map(packrat_core::KindInfo::name).collect();
        assert_eq!(
            names,
            vec![
                "transform",
                "health",
                "inventory",
                "short_description",
                "description",
                "physics"
            ]
        );
    }

    #[test]
    fn test_describe_renderings() {
        assert_eq!(
            Transform::new(4.0, 5.0).describe(),
            "transform {x: 4, y: 5}"
        );
        assert_eq!(
            Health::new(99.0, true).describe(),
            "health {health: 99, poisoned: true}"
        );
        assert_eq!(
            ShortDescription::new("Bob-4").describe(),
            "short_description {text: \"Bob-4\"}"
        );
    }

    #[test]
    fn test_inventory_stacks() {
        let inventory = Inventory::new(&[
            (Item::Sword, 1),
            (Item::Potion, 4),
            (Item::Potion, 3),
            (Item::Arrow, 64),
        ]);
        assert_eq!(inventory.count_of(Item::Potion), 7);
        assert_eq!(inventory.count_of(Item::Axe), 0);
        assert_eq!(inventory.stacks().count(), 4);
        assert_eq!(
            inventory.describe(),
            "inventory {Sword, Potion (4), Potion (3), Arrow (64)}"
        );
    }

    #[test]
    fn test_shorthand_reads_through_the_store() {
        let mut world = World::with_capacity(component_registry(), 64);
        let e = world.create();
        world.attach(e, Transform::new(1.0, 2.0));

        assert!((world.transform(e).x - 1.0).abs() < f32::EPSILON);
        // Absent kinds degrade to the sentinel instance.
        assert!(world.health(e).id().is_none());
        assert!(world.physics(e).id().is_none());
    }
}

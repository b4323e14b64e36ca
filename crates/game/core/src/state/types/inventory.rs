//! Inventory storage and equipment slots.
//!
//! Carried items live in an unordered collection; equipped pieces are moved
//! out of it into a slot-indexed array, so an item is always in exactly one
//! place. Equipping into an occupied slot moves the displaced piece back to
//! the collection.

use strum::{EnumCount, IntoEnumIterator};

use crate::stats::EquipmentBonus;

use super::item::{Equipment, Item, ItemId, Potion, Slot};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
    equipped: [Option<Equipment>; Slot::COUNT],
    money: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_money(money: u32) -> Self {
        Self {
            money,
            ..Self::default()
        }
    }

    // ===== carried items =====

    /// Carried (not equipped) items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Adds an item, merging potions into a matching stack.
    pub fn add(&mut self, item: impl Into<Item>) {
        let item = item.into();
        if let Item::Potion(incoming) = &item {
            let existing = self.items.iter_mut().find_map(|slot| match slot {
                Item::Potion(stack) if stack.stacks_with(incoming) => Some(stack),
                _ => None,
            });
            if let Some(stack) = existing {
                stack.quantity += incoming.quantity;
                return;
            }
        }
        self.items.push(item);
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.find(id).is_some()
    }

    /// Removes a whole item or potion stack.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Takes a single unit: one potion from a stack (dropping the stack at
    /// zero) or the whole equipment piece.
    pub fn take_one(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        match &mut self.items[index] {
            Item::Potion(stack) if stack.quantity > 1 => {
                stack.quantity -= 1;
                Some(Item::Potion(Potion {
                    quantity: 1,
                    ..stack.clone()
                }))
            }
            _ => Some(self.items.remove(index)),
        }
    }

    pub fn potions(&self) -> impl Iterator<Item = &Potion> {
        self.items.iter().filter_map(Item::as_potion)
    }

    // ===== equipment =====

    /// Moves a carried equipment piece into its slot.
    ///
    /// Returns false for unknown ids and non-equipment items.
    pub fn equip(&mut self, id: ItemId) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.id() == id && item.as_equipment().is_some())
        else {
            return false;
        };
        let Item::Equipment(piece) = self.items.remove(index) else {
            return false;
        };
        let slot = piece.slot();
        if let Some(previous) = self.equipped[slot.index()].replace(piece) {
            self.items.push(Item::Equipment(previous));
        }
        true
    }

    /// Moves the piece in `slot` back to the collection. False if empty.
    pub fn unequip(&mut self, slot: Slot) -> bool {
        match self.equipped[slot.index()].take() {
            Some(piece) => {
                self.items.push(Item::Equipment(piece));
                true
            }
            None => false,
        }
    }

    pub fn equipped_in(&self, slot: Slot) -> Option<&Equipment> {
        self.equipped[slot.index()].as_ref()
    }

    /// Equipped pieces in slot order.
    pub fn equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.equipped.iter().flatten()
    }

    /// Slots that currently hold something.
    pub fn occupied_slots(&self) -> Vec<Slot> {
        Slot::iter()
            .filter(|slot| self.equipped[slot.index()].is_some())
            .collect()
    }

    pub fn weapon(&self) -> Option<&Equipment> {
        self.equipped_in(Slot::Weapon)
    }

    /// Sum of every equipped piece's bonus block.
    pub fn equipment_bonus(&self) -> EquipmentBonus {
        self.equipped().map(|piece| piece.bonus).sum()
    }

    /// Wears every equipped piece down by `amount`.
    pub fn degrade_equipped(&mut self, amount: i32) {
        for piece in self.equipped.iter_mut().flatten() {
            piece.degrade(amount);
        }
    }

    /// Wears one slot down. Returns false if the slot is empty.
    pub fn damage_slot(&mut self, slot: Slot, amount: i32) -> bool {
        match self.equipped[slot.index()].as_mut() {
            Some(piece) => {
                piece.degrade(amount);
                true
            }
            None => false,
        }
    }

    /// Slots whose equipped piece has reached zero durability.
    pub fn check_broken(&self) -> Vec<Slot> {
        Slot::iter()
            .filter(|slot| {
                self.equipped[slot.index()]
                    .as_ref()
                    .is_some_and(Equipment::is_broken)
            })
            .collect()
    }

    /// Destroys every broken equipped piece, calling `on_broken` once per
    /// piece. Returns how many were destroyed.
    pub fn remove_broken(&mut self, mut on_broken: impl FnMut(&Equipment)) -> usize {
        let broken = self.check_broken();
        for slot in &broken {
            if let Some(piece) = self.equipped[slot.index()].take() {
                on_broken(&piece);
            }
        }
        broken.len()
    }

    // ===== money =====

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Deducts `amount` if affordable.
    pub fn spend_money(&mut self, amount: u32) -> bool {
        if amount > self.money {
            return false;
        }
        self.money -= amount;
        true
    }

    /// Removes up to `amount`, returning what was actually taken.
    pub fn lose_money(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.money);
        self.money -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::item::{ArmorSlot, EquipmentKind, PotionType, WeaponKind};

    fn sword(id: u32, tier: u32) -> Equipment {
        Equipment::new(ItemId(id), EquipmentKind::Weapon(WeaponKind::Sword), tier)
    }

    #[test]
    fn equip_displaces_previous_piece() {
        let mut inv = Inventory::new();
        inv.add(sword(1, 1));
        inv.add(sword(2, 2));

        assert!(inv.equip(ItemId(1)));
        assert!(inv.equip(ItemId(2)));
        assert_eq!(inv.weapon().map(|w| w.id), Some(ItemId(2)));
        assert!(inv.contains(ItemId(1)));
        assert!(!inv.contains(ItemId(2)));
    }

    #[test]
    fn equip_rejects_potions_and_unknown_ids() {
        let mut inv = Inventory::new();
        inv.add(Potion::new(ItemId(5), PotionType::Healing, 1, 2));
        assert!(!inv.equip(ItemId(5)));
        assert!(!inv.equip(ItemId(99)));
        assert!(!inv.unequip(Slot::Helmet));
    }

    #[test]
    fn potion_stacks_merge_and_drain() {
        let mut inv = Inventory::new();
        inv.add(Potion::new(ItemId(5), PotionType::Healing, 1, 1));
        inv.add(Potion::new(ItemId(6), PotionType::Healing, 1, 2));
        assert_eq!(inv.items().len(), 1);
        assert_eq!(inv.potions().next().map(|p| p.quantity), Some(3));

        inv.take_one(ItemId(5));
        inv.take_one(ItemId(5));
        assert_eq!(inv.potions().next().map(|p| p.quantity), Some(1));
        inv.take_one(ItemId(5));
        assert!(inv.items().is_empty());
    }

    #[test]
    fn broken_pieces_are_collected_then_destroyed() {
        let mut inv = Inventory::new();
        inv.add(sword(1, 1));
        inv.add(Equipment::new(
            ItemId(2),
            EquipmentKind::Armor(ArmorSlot::Helmet),
            1,
        ));
        inv.equip(ItemId(1));
        inv.equip(ItemId(2));

        inv.damage_slot(Slot::Weapon, 100);
        assert_eq!(inv.check_broken(), vec![Slot::Weapon]);

        let mut seen = Vec::new();
        let removed = inv.remove_broken(|piece| seen.push(piece.id));
        assert_eq!(removed, 1);
        assert_eq!(seen, vec![ItemId(1)]);
        assert!(inv.weapon().is_none());
        assert!(!inv.contains(ItemId(1)));
        assert_eq!(inv.equipment_bonus().defense, 3.0);
    }

    #[test]
    fn money_cannot_go_negative() {
        let mut inv = Inventory::with_money(20);
        assert!(!inv.spend_money(30));
        assert!(inv.spend_money(20));
        inv.add_money(5);
        assert_eq!(inv.lose_money(10), 5);
        assert_eq!(inv.money(), 0);
    }
}

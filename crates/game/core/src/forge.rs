//! Item forge: combine two identical items into one of the next tier.
//!
//! [`can_combine`] and [`combine`] are pure rules over items; [`forge`] is
//! the inventory transaction that validates everything before charging.

use crate::state::{Equipment, Inventory, Item, ItemId, Potion};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForgeError {
    #[error("{0} is not in the inventory")]
    ItemNotFound(ItemId),

    #[error("cannot combine {0} with itself")]
    SameItem(ItemId),

    #[error("{first} and {second} cannot be combined")]
    Incompatible { first: String, second: String },

    #[error("forging costs {required} gold, only {available} available")]
    InsufficientFunds { required: u32, available: u32 },
}

impl crate::error::GameError for ForgeError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::ItemNotFound(_) | Self::SameItem(_) => crate::error::ErrorSeverity::Validation,
            Self::Incompatible { .. } | Self::InsufficientFunds { .. } => {
                crate::error::ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "FORGE_ITEM_NOT_FOUND",
            Self::SameItem(_) => "FORGE_SAME_ITEM",
            Self::Incompatible { .. } => "FORGE_INCOMPATIBLE",
            Self::InsufficientFunds { .. } => "FORGE_INSUFFICIENT_FUNDS",
        }
    }
}

/// A successful forge.
#[derive(Clone, Debug, PartialEq)]
pub struct ForgeOutcome {
    pub item: Item,
    pub cost: u32,
}

/// Offset added to the first source's id to form the result's id.
pub const FORGED_ID_OFFSET: u32 = 1000;

/// True for two items of the same type, sub-kind and tier.
pub fn can_combine(a: &Item, b: &Item) -> bool {
    match (a, b) {
        (Item::Equipment(x), Item::Equipment(y)) => x.kind == y.kind && x.tier == y.tier,
        (Item::Potion(x), Item::Potion(y)) => {
            x.potion_type == y.potion_type && x.tier == y.tier
        }
        _ => false,
    }
}

/// Builds the upgraded item, or `None` unless the sources combine and
/// `new_tier` is exactly one above them.
///
/// The result is a fresh item: generated name, full durability, the kind's
/// bonuses at `new_tier` and price `max(2 × a.price, 50 + 25 × new_tier)`.
/// Potions double their magnitude and come as a single unit.
pub fn combine(a: &Item, b: &Item, new_tier: u32) -> Option<Item> {
    if !can_combine(a, b) || new_tier != a.tier() + 1 {
        return None;
    }
    let id = ItemId(a.id().0.wrapping_add(FORGED_ID_OFFSET));
    let price = (2 * a.price()).max(50 + 25 * new_tier);

    let item = match a {
        Item::Equipment(source) => {
            Item::Equipment(Equipment::new(id, source.kind, new_tier).with_price(price))
        }
        Item::Potion(source) => {
            let mut potion = Potion::new(id, source.potion_type, new_tier, 1);
            potion.magnitude = source.magnitude * 2;
            potion.price = price;
            Item::Potion(potion)
        }
    };
    Some(item)
}

/// Gold charged to combine two items of `tier`.
pub const fn combine_cost(tier: u32) -> u32 {
    30 + 10 * tier.saturating_sub(1)
}

/// Combines two carried items into their next-tier version.
///
/// Everything is validated before any gold or item changes hands. A potion
/// stack with at least two units can supply both sources.
pub fn forge(inventory: &mut Inventory, a: ItemId, b: ItemId) -> Result<ForgeOutcome, ForgeError> {
    let first = inventory.find(a).ok_or(ForgeError::ItemNotFound(a))?;
    let second = inventory.find(b).ok_or(ForgeError::ItemNotFound(b))?;

    if a == b {
        let enough = first.as_potion().is_some_and(|stack| stack.quantity >= 2);
        if !enough {
            return Err(ForgeError::SameItem(a));
        }
    }

    let item = combine(first, second, first.tier() + 1).ok_or_else(|| ForgeError::Incompatible {
        first: first.name().to_owned(),
        second: second.name().to_owned(),
    })?;

    let cost = combine_cost(first.tier());
    if !inventory.spend_money(cost) {
        return Err(ForgeError::InsufficientFunds {
            required: cost,
            available: inventory.money(),
        });
    }

    inventory.take_one(a);
    inventory.take_one(b);
    inventory.add(item.clone());
    tracing::debug!(result = %item.name(), cost, "forged item");
    Ok(ForgeOutcome { item, cost })
}

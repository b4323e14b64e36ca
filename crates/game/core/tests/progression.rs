use game_core::combat::{AttackerSide, mitigated_damage};
use game_core::state::{ArmorSlot, EquipmentKind, Slot, WeaponKind};
use game_core::stats::{BaseStats, StatDelta};
use game_core::{
    Buff, BuffType, Equipment, Inventory, Item, ItemId, Player, PlayerClass, Potion, PotionType,
    SequenceRng, Unit, UnitStats, can_combine, combine, combine_cost, forge, resolve_attack,
};
use proptest::prelude::*;

fn sword(id: u32, tier: u32) -> Equipment {
    Equipment::new(ItemId(id), EquipmentKind::Weapon(WeaponKind::Sword), tier)
}

#[test]
fn archer_levels_into_focus_shoot() {
    let mut archer = Player::new("Rin", PlayerClass::Archer);
    assert_eq!(archer.base_hp(), 90);
    assert_eq!(archer.base_damage(), 15.0);
    assert_eq!(archer.base_critical_rate(), 0.12);
    assert!(archer.unit.skills.is_empty());

    let learned: Vec<String> = (0..4).flat_map(|_| archer.level_up()).collect();
    assert_eq!(archer.level(), 5);
    assert_eq!(archer.stats().max_hp, 122);
    assert_eq!(learned, vec!["Focus Shoot".to_owned()]);
    assert_eq!(archer.unit.skills.len(), 1);
}

#[test]
fn knight_affinity_only_for_swords() {
    let knight = Player::new("Aldric", PlayerClass::Knight);
    let bow = Equipment::new(ItemId(1), EquipmentKind::Weapon(WeaponKind::Bow), 1);
    assert_eq!(knight.class_weapon_bonus(&bow), (0.0, 0.0));
    assert_eq!(knight.class_weapon_bonus(&sword(2, 1)), (5.0, 0.05));
}

#[test]
fn forging_two_worn_swords() {
    let mut inventory = Inventory::with_money(100);
    inventory.add(sword(1, 1));
    inventory.add(sword(2, 1));
    assert_eq!(inventory.items()[0].price(), 25);

    let outcome = forge(&mut inventory, ItemId(1), ItemId(2)).unwrap();
    assert_eq!(outcome.cost, 30);
    assert_eq!(outcome.item.tier(), 2);
    assert_eq!(outcome.item.price(), 100);
    assert_eq!(inventory.money(), 70);
    assert_eq!(inventory.items().len(), 1);
    assert_eq!(combine_cost(2), 40);
}

#[test]
fn exp_carries_over_between_levels() {
    let mut mage = Player::new("Vela", PlayerClass::Mage);
    // 100 to reach level 2, 150 more for level 3
    assert_eq!(mage.gain_exp(260), 2);
    assert_eq!(mage.level(), 3);
    assert_eq!(mage.stats().exp, 10);
    assert_eq!(mage.unit.skills[0].name, "Fireball");
}

#[test]
fn exp_boost_potion_works_outside_battle() {
    let mut knight = Player::new("Aldric", PlayerClass::Knight);
    knight
        .inventory
        .add(Potion::new(ItemId(3), PotionType::ExpBoost, 1, 1));
    assert!(knight.use_potion(ItemId(3), true).is_err());
    assert!(knight.use_potion(ItemId(3), false).is_ok());
    assert!(knight.stats().exp > 0 || knight.level() > 1);
}

fn equipment_kind() -> impl Strategy<Value = EquipmentKind> {
    prop_oneof![
        Just(EquipmentKind::Weapon(WeaponKind::Sword)),
        Just(EquipmentKind::Weapon(WeaponKind::Bow)),
        Just(EquipmentKind::Weapon(WeaponKind::Staff)),
        Just(EquipmentKind::Armor(ArmorSlot::Helmet)),
        Just(EquipmentKind::Armor(ArmorSlot::Chest)),
        Just(EquipmentKind::Armor(ArmorSlot::Ring)),
    ]
}

fn class() -> impl Strategy<Value = PlayerClass> {
    prop_oneof![
        Just(PlayerClass::Knight),
        Just(PlayerClass::Archer),
        Just(PlayerClass::Mage),
    ]
}

proptest! {
    #[test]
    fn damage_never_increases_with_defense(
        attack in 0.0f64..500.0,
        low in -50.0f64..300.0,
        extra in 0.0f64..300.0,
        roll in 0.0f64..1.0,
        crit in 0.0f64..0.5,
        player_side in any::<bool>(),
    ) {
        let side = if player_side { AttackerSide::Player } else { AttackerSide::Monster };
        let weak = resolve_attack(side, attack, crit, low + extra, &mut SequenceRng::constant(roll));
        let strong = resolve_attack(side, attack, crit, low, &mut SequenceRng::constant(roll));
        prop_assert!(weak.damage >= 1);
        prop_assert!(strong.damage >= weak.damage);
        prop_assert!(mitigated_damage(attack, low + extra) <= mitigated_damage(attack, low));
    }

    #[test]
    fn hp_stays_within_bounds(ops in prop::collection::vec((any::<bool>(), -20i32..200), 1..40)) {
        let stats = UnitStats::from_base(&BaseStats::new(100, 10.0, 5.0, 5.0, 0.1, 20), 1);
        let mut unit = Unit::new("Dummy", stats);
        for (hurt, amount) in ops {
            if hurt {
                unit.take_damage(amount);
            } else {
                unit.heal(amount);
            }
            prop_assert!(unit.stats.hp >= 0);
            prop_assert!(unit.stats.hp <= unit.stats.max_hp);
            prop_assert_eq!(unit.is_alive(), unit.stats.hp > 0);
        }
    }

    #[test]
    fn expired_buff_nets_zero(
        kind in 0usize..4,
        magnitude in -20.0f64..20.0,
        duration in 1u32..6,
    ) {
        let buff_type = [BuffType::Attack, BuffType::Defense, BuffType::Speed, BuffType::Critical][kind];
        let stats = UnitStats::from_base(&BaseStats::new(100, 10.0, 5.0, 5.0, 0.1, 20), 1);
        let mut unit = Unit::new("Dummy", stats.clone());
        unit.add_buff(Buff::of_type(buff_type, magnitude, duration, 1));

        for _ in 0..duration {
            unit.tick_buffs();
        }
        prop_assert!(unit.buffs().is_empty());
        prop_assert!((unit.stats.damage - stats.damage).abs() < 1e-9);
        prop_assert!((unit.stats.defense - stats.defense).abs() < 1e-9);
        prop_assert!((unit.stats.speed - stats.speed).abs() < 1e-9);
        prop_assert!((unit.stats.critical_rate - stats.critical_rate).abs() < 1e-9);
        prop_assert_eq!(unit.buff_totals(), StatDelta::ZERO);
    }

    #[test]
    fn equip_then_unequip_restores_stats(
        class in class(),
        kind in equipment_kind(),
        tier in 1u32..4,
        levels in 0u32..6,
    ) {
        let mut player = Player::new("Hero", class);
        for _ in 0..levels {
            player.level_up();
        }
        let before = player.stats().clone();
        let slot: Slot = kind.slot();

        player.inventory.add(Equipment::new(ItemId(1), kind, tier));
        prop_assert!(player.equip(ItemId(1)));
        prop_assert!(player.unequip(slot));
        prop_assert_eq!(player.stats(), &before);
    }

    #[test]
    fn combine_only_matches_same_kind_and_tier(
        kind_a in equipment_kind(),
        kind_b in equipment_kind(),
        tier_a in 1u32..4,
        tier_b in 1u32..4,
    ) {
        let a = Item::Equipment(Equipment::new(ItemId(1), kind_a, tier_a));
        let b = Item::Equipment(Equipment::new(ItemId(2), kind_b, tier_b));
        let result = combine(&a, &b, tier_a + 1);
        prop_assert_eq!(result.is_some(), kind_a == kind_b && tier_a == tier_b);
        prop_assert_eq!(can_combine(&a, &b), result.is_some());
        if let Some(item) = result {
            prop_assert_eq!(item.tier(), tier_a + 1);
            prop_assert!(item.price() >= 50 + 25 * (tier_a + 1));
        }
        prop_assert!(combine(&a, &b, tier_a + 2).is_none());
    }
}

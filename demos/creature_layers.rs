//! Creature layers example: a card's stats seen through several tables
//!
//! This example demonstrates:
//! - Building a base table from persisted, untyped modifiers
//! - Layering card and creature tables on top of it
//! - Reading numeric, boolean and tagged stats
//! - Printing a breakdown of where a value came from

use nightstat::*;

fn main() -> Result<(), StatError> {
    // Player-wide bonuses, as they would arrive from save data
    println!("Loading player modifiers:");
    let player = StatTable::new().insert_all([
        Modifier::new(
            StatId::from_raw(41)?,
            Operation::Bool(BooleanOperation::Set(true)),
        )?,
        Modifier::new(
            StatId::CritChance,
            Operation::Percentage(NumericOperation::Add("5%".parse()?)),
        )?,
    ]);
    println!("  - CanCrit: true");
    println!("  - CritChance: +5%");

    // The card defines the creature's base stats
    println!("\nCard stats:");
    let card = StatTable::with_parent(&player)
        .insert(registry::HEALTH.overwrite(100))
        .insert(registry::HEALTH.add(5))
        .insert(registry::BASE_DAMAGE.overwrite("10-20 Physical".parse()?))
        .insert(registry::INFLUENCE_COST.add("2 Flame, 1 Shadow".parse()?));
    println!("  - Health: 100, +5");
    println!("  - BaseDamage: 10-20 Physical");

    // The summoned creature picks up a fire affix and a temporary buff
    println!("\nCreature affixes:");
    let creature = StatTable::with_parent(&card)
        .insert(registry::HEALTH.add(10))
        .insert(registry::BASE_DAMAGE.add("2-4 Fire".parse()?));
    let buffed = StatTable::with_parent(&creature)
        .insert(registry::HEALTH.increase("20%".parse()?))
        .insert_optional(None);
    println!("  - Health: +10, then 20% increased");
    println!("  - BaseDamage: +2-4 Fire");

    println!("\n=== Computed Stats ===");
    println!("Health (card): {}", card.get(registry::HEALTH));
    println!("Health (buffed creature): {}", buffed.get(registry::HEALTH));
    println!("Can crit: {}", buffed.get(registry::CAN_CRIT));
    println!("Crit chance: {}", buffed.get(registry::CRIT_CHANCE));
    println!("Base damage: {}", buffed.get(registry::BASE_DAMAGE));
    println!("Influence cost: {}", buffed.get(registry::INFLUENCE_COST));

    println!("\nHealth Breakdown:");
    let breakdown = buffed.breakdown(registry::HEALTH);
    for contribution in &breakdown.contributions {
        println!("  layer {}: {:?}", contribution.depth, contribution.operation);
    }
    println!("\nCalculation: (100 + 5 + 10) * 1.2 = {}", breakdown.value);

    Ok(())
}

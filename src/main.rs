//! Fireline - Entry Point
//!
//! Runs a small seeded duel between two gunfighters and prints every
//! signal the kernel emits, as a smoke test and a demonstration of the
//! command API. Pass a seed as the first argument to replay a
//! different fight.

use fireline::core::error::Result;
use fireline::core::types::Vec2;
use fireline::entity::character::{Character, Handedness};
use fireline::entity::weapon::Weapon;
use fireline::simulation::events::CombatSignal;
use fireline::simulation::world::World;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("fireline=debug")
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    tracing::info!(seed, "Fireline duel starting");

    let mut world = World::with_seed(seed)?;

    let gunfighter = Character::new("Ringo", 65, 20, 60, 55, 70, Handedness::RightHanded)
        .with_weapon(Weapon::pistol())
        .with_skill("pistol", 2);
    let outlaw = Character::new("Dutch", 55, 20, 45, 50, 50, Handedness::LeftHanded)
        .with_weapon(Weapon::pistol())
        .with_skill("pistol", 1);

    // Twenty feet apart, classic street duel distance
    let ringo = world.spawn_unit(gunfighter, Vec2::new(0.0, 0.0));
    let dutch = world.spawn_unit(outlaw, Vec2::new(140.0, 0.0));

    world.start_attack(ringo, dutch)?;
    world.start_attack(dutch, ringo)?;

    for _ in 0..3600 {
        let signals = world.run_tick()?;
        for signal in &signals {
            report(&world, signal)?;
        }
        if signals
            .iter()
            .any(|s| matches!(s, CombatSignal::Incapacitated { .. }))
        {
            break;
        }
    }

    for unit in &world.units {
        println!(
            "{}: {} hp, {} wounds",
            unit.character.name,
            unit.character.health,
            unit.character.wounds.len()
        );
    }
    Ok(())
}

fn report(world: &World, signal: &CombatSignal) -> Result<()> {
    let name = |id| {
        world
            .unit(id)
            .map(|u| u.character.name.clone())
            .unwrap_or_else(|_| "?".into())
    };
    match signal {
        CombatSignal::WeaponStateChanged { unit, state } => {
            println!("[{:>5}] {} -> {}", world.now(), name(*unit), state);
        }
        CombatSignal::Fired { shooter, target } => {
            println!("[{:>5}] {} fires at {}", world.now(), name(*shooter), name(*target));
        }
        CombatSignal::NoAmmunition { unit } => {
            println!("[{:>5}] {} clicks on an empty chamber", world.now(), name(*unit));
        }
        CombatSignal::Hit { target, body_part, severity, damage, .. } => {
            println!(
                "[{:>5}] {} is hit: {:?} {:?}, {} damage",
                world.now(),
                name(*target),
                body_part,
                severity,
                damage
            );
        }
        CombatSignal::Missed { shooter, .. } => {
            println!("[{:>5}] {} misses", world.now(), name(*shooter));
        }
        CombatSignal::StrayHit { target, body_part, severity, damage, .. } => {
            println!(
                "[{:>5}] a stray round catches {}: {:?} {:?}, {} damage",
                world.now(),
                name(*target),
                body_part,
                severity,
                damage
            );
        }
        CombatSignal::Incapacitated { unit } => {
            println!("[{:>5}] {} goes down", world.now(), name(*unit));
        }
        CombatSignal::HighlightCleared { .. } => {}
    }
    Ok(())
}

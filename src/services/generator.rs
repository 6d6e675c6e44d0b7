//! # Random Superhero Generator
//!
//! Names are assembled from a bundled corpus of prefixes, descriptors and
//! suffixes; powers are drawn from a fixed list. Nothing prevents two calls
//! from producing the same name, the store's upsert absorbs collisions.

use rand::{Rng, seq::IndexedRandom};

/// A freshly generated `(name, power)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHero {
    pub name: String,
    pub power: String,
}

/// Source of names and powers for new superheroes.
pub trait HeroGenerator: Send + Sync {
    fn generate(&self) -> GeneratedHero;
}

/// Default generator backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomHeroGenerator;

impl HeroGenerator for RandomHeroGenerator {
    fn generate(&self) -> GeneratedHero {
        let mut rng = rand::rng();
        GeneratedHero {
            name: random_name(&mut rng),
            power: pick(&mut rng, POWERS).to_string(),
        }
    }
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let descriptor = pick(rng, DESCRIPTORS);
    match rng.random_range(0..4) {
        0 => format!(
            "{} {} {}",
            pick(rng, PREFIXES),
            descriptor,
            pick(rng, SUFFIXES)
        ),
        1 => format!("{} {}", pick(rng, PREFIXES), descriptor),
        2 => format!("{} {}", descriptor, pick(rng, SUFFIXES)),
        _ => descriptor.to_string(),
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    // corpus slices are non-empty constants
    words.choose(rng).copied().unwrap_or_default()
}

const PREFIXES: &[&str] = &[
    "The", "Captain", "Doctor", "General", "Agent", "Mister", "Lady", "Professor", "Iron",
    "Red", "Black", "Silver", "Dark", "Giant", "Ultra", "Super", "Cyborg", "Magnificent",
];

const DESCRIPTORS: &[&str] = &[
    "Abomination", "Arrow", "Banshee", "Blizzard", "Comet", "Cyclone", "Falcon", "Firestorm",
    "Ghost", "Gladiator", "Hurricane", "Jackal", "Kestrel", "Lynx", "Mantis", "Meteor",
    "Nebula", "Nova", "Phantom", "Quasar", "Raven", "Sentinel", "Shadow", "Spectre", "Tempest",
    "Thunder", "Titan", "Vortex", "Warden", "Wraith", "Zenith",
];

const SUFFIXES: &[&str] = &[
    "I", "II", "III", "Man", "Woman", "Girl", "Boy", "Lord", "Knight", "Thing", "Brain",
    "Skull", "Claw", "Fist", "Beast",
];

const POWERS: &[&str] = &[
    "Accelerated Healing",
    "Animal Control",
    "Astral Projection",
    "Biokinesis",
    "Camouflage",
    "Cryokinesis",
    "Danger Sense",
    "Density Control",
    "Duplication",
    "Electrokinesis",
    "Energy Absorption",
    "Enhanced Senses",
    "Flight",
    "Force Fields",
    "Gravity Control",
    "Illusions",
    "Invisibility",
    "Magnetism",
    "Mind Control",
    "Phasing",
    "Precognition",
    "Pyrokinesis",
    "Shapeshifting",
    "Sonic Scream",
    "Super Speed",
    "Super Strength",
    "Technopathy",
    "Telekinesis",
    "Telepathy",
    "Teleportation",
    "Time Manipulation",
    "Weather Control",
];

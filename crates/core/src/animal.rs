//! Animals behind an abstract interface.
//!
//! [`Animal`] has four required methods (sound, movement, eating, habitat).
//! Its provided methods, including the [`daily_routine`](Animal::daily_routine)
//! template, are written against those, so every implementation gets them
//! for free.

/// Energy and hunger, each kept within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    energy: u8,
    hunger: u8,
}

impl Vitals {
    pub const MAX: u8 = 100;

    #[must_use]
    pub const fn energy(&self) -> u8 {
        self.energy
    }

    #[must_use]
    pub const fn hunger(&self) -> u8 {
        self.hunger
    }

    fn gain_energy(&mut self, amount: u8) {
        self.energy = self.energy.saturating_add(amount).min(Self::MAX);
    }

    const fn lose_energy(&mut self, amount: u8) {
        self.energy = self.energy.saturating_sub(amount);
    }

    fn gain_hunger(&mut self, amount: u8) {
        self.hunger = self.hunger.saturating_add(amount).min(Self::MAX);
    }

    const fn lose_hunger(&mut self, amount: u8) {
        self.hunger = self.hunger.saturating_sub(amount);
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            energy: Self::MAX,
            hunger: 0,
        }
    }
}

/// Common animal behaviour.
pub trait Animal {
    fn name(&self) -> &str;

    fn species(&self) -> &str;

    fn age(&self) -> u32;

    fn vitals(&self) -> &Vitals;

    fn vitals_mut(&mut self) -> &mut Vitals;

    /// What the animal says, e.g. `"says 'Woof! Woof!'"`.
    fn make_sound(&self) -> String;

    /// How the animal gets around. May change its state (a bird takes off).
    fn locomotion(&mut self) -> String;

    /// Eat `food`, lowering hunger and restoring energy.
    fn eat(&mut self, food: &str) -> String;

    fn habitat(&self) -> &'static str;

    /// Restore 30 energy.
    fn sleep(&mut self) -> String {
        self.vitals_mut().gain_energy(30);
        format!(
            "{} is sleeping and recovering energy. Energy: {}",
            self.name(),
            self.vitals().energy()
        )
    }

    /// Add 20 hunger and use 10 energy.
    fn get_hungry(&mut self) -> String {
        let vitals = self.vitals_mut();
        vitals.gain_hunger(20);
        vitals.lose_energy(10);
        format!(
            "{} is getting hungry. Hunger: {}, Energy: {}",
            self.name(),
            self.vitals().hunger(),
            self.vitals().energy()
        )
    }

    fn status(&self) -> String {
        format!(
            "Animal Status:\n  Name: {}\n  Species: {}\n  Age: {}\n  Habitat: {}\n  Energy: {}\n  Hunger: {}",
            self.name(),
            self.species(),
            self.age(),
            self.habitat(),
            self.vitals().energy(),
            self.vitals().hunger()
        )
    }

    /// Wake, move, eat, move again, sleep.
    fn daily_routine(&mut self) -> String {
        let name = self.name().to_owned();
        let activities = [
            format!("{name} wakes up and {}", self.make_sound()),
            format!("{name} starts {}", self.locomotion()),
            self.eat("food"),
            self.locomotion(),
            self.sleep(),
        ];
        let mut routine = String::from("Daily Routine:");
        for activity in activities {
            routine.push_str("\n  ");
            routine.push_str(&activity);
        }
        routine
    }
}

/// A dog of some breed.
#[derive(Debug, Clone)]
pub struct Dog {
    name: String,
    breed: String,
    age: u32,
    vitals: Vitals,
}

impl Dog {
    #[must_use]
    pub fn new(name: impl Into<String>, breed: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            age,
            vitals: Vitals::default(),
        }
    }

    #[must_use]
    pub fn breed(&self) -> &str {
        &self.breed
    }

    #[must_use]
    pub fn fetch(&self, item: &str) -> String {
        format!("{} fetches the {item} and brings it back!", self.name)
    }
}

impl Animal for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> &str {
        "Canine"
    }

    fn age(&self) -> u32 {
        self.age
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn make_sound(&self) -> String {
        "says 'Woof! Woof!'".to_owned()
    }

    fn locomotion(&mut self) -> String {
        "running around and wagging tail".to_owned()
    }

    fn eat(&mut self, food: &str) -> String {
        self.vitals.lose_hunger(30);
        self.vitals.gain_energy(20);
        format!("{} is eating {food} enthusiastically", self.name)
    }

    fn habitat(&self) -> &'static str {
        "Domestic environment"
    }
}

/// A bird; flightless birds walk instead.
#[derive(Debug, Clone)]
pub struct Bird {
    name: String,
    species: String,
    age: u32,
    can_fly: bool,
    altitude_ft: u32,
    vitals: Vitals,
}

impl Bird {
    /// Cruising altitude once airborne.
    pub const FLIGHT_ALTITUDE_FT: u32 = 50;

    #[must_use]
    pub fn new(name: impl Into<String>, species: impl Into<String>, age: u32, can_fly: bool) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            age,
            can_fly,
            altitude_ft: 0,
            vitals: Vitals::default(),
        }
    }

    #[must_use]
    pub const fn can_fly(&self) -> bool {
        self.can_fly
    }

    #[must_use]
    pub const fn altitude_ft(&self) -> u32 {
        self.altitude_ft
    }

    #[must_use]
    pub fn build_nest(&self) -> String {
        format!("{} is building a cozy nest in a tree", self.name)
    }
}

impl Animal for Bird {
    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> &str {
        &self.species
    }

    fn age(&self) -> u32 {
        self.age
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn make_sound(&self) -> String {
        "chirps and tweets melodiously".to_owned()
    }

    fn locomotion(&mut self) -> String {
        if self.can_fly {
            self.altitude_ft = Self::FLIGHT_ALTITUDE_FT;
            format!("flying at {} feet high", self.altitude_ft)
        } else {
            "hopping and walking on the ground".to_owned()
        }
    }

    fn eat(&mut self, food: &str) -> String {
        self.vitals.lose_hunger(25);
        self.vitals.gain_energy(15);
        format!("{} is pecking at {food}", self.name)
    }

    fn habitat(&self) -> &'static str {
        "Trees and sky"
    }
}

//! The network: houses, generators and the house → generator assignment.

use std::collections::BTreeMap;

use tracing::debug;

use super::types::{Connect, ConsumptionClass, Generator, House, Upsert};
use crate::error::{Entity, GridError, Result};

/// Default weight of the overload penalty against dispersion.
pub const DEFAULT_PENALTY_FACTOR: f64 = 10.0;

/// An electrical network.
///
/// Houses and generators are keyed by name. The assignment maps a house
/// name to the name of the generator it draws from; a house appears at
/// most once as a key, so a reassignment is an overwrite. Every key of
/// the assignment names an existing house and every value names an
/// existing generator.
///
/// Maps are ordered so that iteration, and therefore a seeded optimizer
/// run, is deterministic.
///
/// # Examples
///
/// ```
/// use gridbalance::network::{ConsumptionClass, Network};
///
/// let mut net = Network::new();
/// net.upsert_generator("G1", 100.0).unwrap();
/// net.upsert_house("M1", ConsumptionClass::Normal).unwrap();
/// net.connect("M1", "G1").unwrap();
/// assert!(net.connection_exists("G1", "M1"));
/// net.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    houses: BTreeMap<String, House>,
    generators: BTreeMap<String, Generator>,
    assignment: BTreeMap<String, String>,
    penalty_factor: f64,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            houses: BTreeMap::new(),
            generators: BTreeMap::new(),
            assignment: BTreeMap::new(),
            penalty_factor: DEFAULT_PENALTY_FACTOR,
        }
    }
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GridError::invalid(format!("{kind} name must not be empty")));
    }
    Ok(())
}

impl Network {
    /// Creates an empty network with the default penalty factor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator, or updates the capacity of an existing one.
    ///
    /// Existing assignments to the generator are kept and see the new
    /// capacity. Fails with `InvalidData` if the name is blank or the
    /// capacity is negative or not finite.
    pub fn upsert_generator(&mut self, name: &str, capacity_kw: f64) -> Result<Upsert<f64>> {
        check_name("generator", name)?;
        if !capacity_kw.is_finite() || capacity_kw < 0.0 {
            return Err(GridError::invalid(format!(
                "generator {name}: capacity must be a non-negative number, got {capacity_kw}"
            )));
        }

        if let Some(generator) = self.generators.get_mut(name) {
            let previous = generator.capacity_kw;
            generator.capacity_kw = capacity_kw;
            debug!(generator = name, previous, capacity_kw, "generator updated");
            Ok(Upsert::Updated { previous })
        } else {
            self.generators.insert(
                name.to_string(),
                Generator {
                    name: name.to_string(),
                    capacity_kw,
                },
            );
            debug!(generator = name, capacity_kw, "generator created");
            Ok(Upsert::Created)
        }
    }

    /// Creates a house, or updates the consumption class of an existing one.
    pub fn upsert_house(
        &mut self,
        name: &str,
        class: ConsumptionClass,
    ) -> Result<Upsert<ConsumptionClass>> {
        check_name("house", name)?;

        if let Some(house) = self.houses.get_mut(name) {
            let previous = house.class;
            house.class = class;
            debug!(house = name, %previous, %class, "house updated");
            Ok(Upsert::Updated { previous })
        } else {
            self.houses.insert(
                name.to_string(),
                House {
                    name: name.to_string(),
                    class,
                },
            );
            debug!(house = name, %class, "house created");
            Ok(Upsert::Created)
        }
    }

    /// Resolves an unordered pair of names into `(house, generator)`.
    ///
    /// On failure, names the side that could not be resolved.
    fn resolve<'a>(&self, a: &'a str, b: &'a str) -> Result<(&'a str, &'a str)> {
        let is_house = |n: &str| self.houses.contains_key(n);
        let is_generator = |n: &str| self.generators.contains_key(n);

        if is_house(a) && is_generator(b) {
            return Ok((a, b));
        }
        if is_house(b) && is_generator(a) {
            return Ok((b, a));
        }

        if is_house(a) {
            Err(GridError::not_found(Entity::Generator, b))
        } else if is_generator(a) {
            Err(GridError::not_found(Entity::House, b))
        } else if is_house(b) {
            Err(GridError::not_found(Entity::Generator, a))
        } else if is_generator(b) {
            Err(GridError::not_found(Entity::House, a))
        } else {
            Err(GridError::not_found(Entity::Element, format!("{a} or {b}")))
        }
    }

    /// Connects a house to a generator; argument order does not matter.
    ///
    /// Overwrites any previous generator of the house.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<Connect> {
        let (house, generator) = self.resolve(a, b)?;
        let previous = self
            .assignment
            .insert(house.to_string(), generator.to_string());
        debug!(house, generator, ?previous, "connected");
        Ok(match previous {
            Some(previous) => Connect::Moved { previous },
            None => Connect::Created,
        })
    }

    /// Removes the connection between a house and a generator.
    ///
    /// Fails with `Logic` if the house is not currently connected to
    /// that generator.
    pub fn disconnect(&mut self, a: &str, b: &str) -> Result<()> {
        let (house, generator) = self.resolve(a, b)?;
        if self.assignment.get(house).map(String::as_str) != Some(generator) {
            return Err(GridError::logic(format!(
                "no connection between house {house} and generator {generator}"
            )));
        }
        self.assignment.remove(house);
        debug!(house, generator, "disconnected");
        Ok(())
    }

    /// Whether the house and generator named by `a` and `b` (in either
    /// order) are currently connected. Never fails.
    pub fn connection_exists(&self, a: &str, b: &str) -> bool {
        match self.resolve(a, b) {
            Ok((house, generator)) => {
                self.assignment.get(house).map(String::as_str) == Some(generator)
            }
            Err(_) => false,
        }
    }

    /// Checks the structural invariants of a complete network.
    ///
    /// Collects every violation into a single `Logic` error: no houses,
    /// no generators, or a house without a connection. Overloaded
    /// generators are not a structural problem and are not reported.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.houses.is_empty() {
            violations.push("network has no houses".to_string());
        }
        if self.generators.is_empty() {
            violations.push("network has no generators".to_string());
        }
        for name in self.houses.keys() {
            if !self.assignment.contains_key(name) {
                violations.push(format!("house {name} has no connection"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(GridError::Logic { violations })
        }
    }

    /// Weight λ of the overload penalty in the cost.
    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// Sets λ. Fails with `InvalidData` if negative or not finite.
    pub fn set_penalty_factor(&mut self, lambda: f64) -> Result<()> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(GridError::invalid(format!(
                "penalty factor must be a non-negative number, got {lambda}"
            )));
        }
        self.penalty_factor = lambda;
        Ok(())
    }

    // ---- Read access ----

    pub fn houses(&self) -> &BTreeMap<String, House> {
        &self.houses
    }

    pub fn generators(&self) -> &BTreeMap<String, Generator> {
        &self.generators
    }

    /// House name → generator name.
    pub fn assignment(&self) -> &BTreeMap<String, String> {
        &self.assignment
    }

    pub fn house(&self, name: &str) -> Option<&House> {
        self.houses.get(name)
    }

    pub fn generator(&self, name: &str) -> Option<&Generator> {
        self.generators.get(name)
    }

    /// The generator a house currently draws from.
    pub fn generator_of(&self, house: &str) -> Option<&Generator> {
        self.assignment
            .get(house)
            .and_then(|g| self.generators.get(g))
    }

    /// Houses currently assigned to `generator`, in name order.
    pub fn houses_on<'a>(&'a self, generator: &'a str) -> impl Iterator<Item = &'a House> + 'a {
        self.assignment
            .iter()
            .filter(move |(_, g)| g.as_str() == generator)
            .filter_map(move |(h, _)| self.houses.get(h))
    }

    // ---- Optimizer primitives ----
    //
    // Callers pass names taken from `houses()` / `generators()`, so the
    // assignment invariants hold without re-resolving.

    /// Sets the generator of `house`, returning the previous one.
    pub(crate) fn assign(&mut self, house: &str, generator: &str) -> Option<String> {
        debug_assert!(self.houses.contains_key(house));
        debug_assert!(self.generators.contains_key(generator));
        self.assignment
            .insert(house.to_string(), generator.to_string())
    }

    /// Restores `house` to `previous`, removing the entry if it had none.
    pub(crate) fn restore(&mut self, house: &str, previous: Option<String>) {
        match previous {
            Some(generator) => {
                self.assignment.insert(house.to_string(), generator);
            }
            None => {
                self.assignment.remove(house);
            }
        }
    }

    pub(crate) fn clear_assignment(&mut self) {
        self.assignment.clear();
    }

    pub(crate) fn replace_assignment(&mut self, assignment: BTreeMap<String, String>) {
        self.assignment = assignment;
    }
}

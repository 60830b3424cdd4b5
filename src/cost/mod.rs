//! Cost evaluation over a [`Network`].
//!
//! The objective minimized by the optimizer is
//!
//! ```text
//! cost = dispersion + λ · overload
//! dispersion = Σ |u_i − ū|
//! overload   = Σ max(u_i − 1, 0)
//! ```
//!
//! where `u_i = load_i / capacity_i` is the utilization of generator `i`
//! and `ū` their mean. A generator with zero capacity has no defined
//! utilization; every function that needs one fails with `Logic`.
//!
//! All functions are pure reads of the network.

use std::collections::BTreeMap;

use crate::error::{Entity, GridError, Result};
use crate::network::{Generator, Network};

/// Total demand in kW of the houses assigned to `generator`.
pub fn load(net: &Network, generator: &str) -> Result<f64> {
    if net.generator(generator).is_none() {
        return Err(GridError::not_found(Entity::Generator, generator));
    }
    Ok(net.houses_on(generator).map(|h| h.demand_kw()).sum())
}

/// Load of every generator in one pass over the assignment.
///
/// Generators with no houses appear with a load of 0.
pub fn loads(net: &Network) -> BTreeMap<&str, f64> {
    let mut loads: BTreeMap<&str, f64> = net
        .generators()
        .keys()
        .map(|name| (name.as_str(), 0.0))
        .collect();
    for (house, generator) in net.assignment() {
        if let (Some(h), Some(slot)) = (net.house(house), loads.get_mut(generator.as_str())) {
            *slot += h.demand_kw();
        }
    }
    loads
}

fn ratio(generator: &Generator, load_kw: f64) -> Result<f64> {
    if generator.capacity_kw() == 0.0 {
        return Err(GridError::logic(format!(
            "generator {} has zero capacity, utilization is undefined",
            generator.name()
        )));
    }
    Ok(load_kw / generator.capacity_kw())
}

/// `load / capacity` of `generator`; 1.0 means fully used.
pub fn utilization(net: &Network, generator: &str) -> Result<f64> {
    let g = net
        .generator(generator)
        .ok_or_else(|| GridError::not_found(Entity::Generator, generator))?;
    ratio(g, load(net, generator)?)
}

/// Utilization of every generator, in generator-name order.
pub fn utilizations(net: &Network) -> Result<Vec<f64>> {
    let loads = loads(net);
    net.generators()
        .values()
        .map(|g| ratio(g, loads.get(g.name()).copied().unwrap_or(0.0)))
        .collect()
}

fn dispersion_of(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    rates.iter().map(|u| (u - mean).abs()).sum()
}

fn overload_of(rates: &[f64]) -> f64 {
    rates.iter().map(|u| (u - 1.0).max(0.0)).sum()
}

/// Sum of absolute deviations of utilization from the mean; 0 with no
/// generators.
pub fn dispersion(net: &Network) -> Result<f64> {
    Ok(dispersion_of(&utilizations(net)?))
}

/// Sum over generators of the utilization in excess of 1.
pub fn overload_penalty(net: &Network) -> Result<f64> {
    Ok(overload_of(&utilizations(net)?))
}

/// `dispersion + λ · overload_penalty`, λ being the network's penalty factor.
pub fn cost(net: &Network) -> Result<f64> {
    let rates = utilizations(net)?;
    Ok(dispersion_of(&rates) + net.penalty_factor() * overload_of(&rates))
}

/// Per-generator figures for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorLoad {
    pub name: String,
    pub capacity_kw: f64,
    pub load_kw: f64,
    pub utilization: f64,
}

impl GeneratorLoad {
    pub fn is_overloaded(&self) -> bool {
        self.utilization > 1.0
    }
}

/// Snapshot of every cost figure of a network.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub generators: Vec<GeneratorLoad>,
    pub dispersion: f64,
    pub overload_penalty: f64,
    pub penalty_factor: f64,
    pub cost: f64,
}

/// Evaluates all cost figures at once. Fails like [`cost`].
pub fn summarize(net: &Network) -> Result<CostSummary> {
    let loads = loads(net);
    let mut generators = Vec::with_capacity(net.generators().len());
    for g in net.generators().values() {
        let load_kw = loads.get(g.name()).copied().unwrap_or(0.0);
        generators.push(GeneratorLoad {
            name: g.name().to_string(),
            capacity_kw: g.capacity_kw(),
            load_kw,
            utilization: ratio(g, load_kw)?,
        });
    }
    let rates: Vec<f64> = generators.iter().map(|g| g.utilization).collect();
    let dispersion = dispersion_of(&rates);
    let overload_penalty = overload_of(&rates);
    Ok(CostSummary {
        generators,
        dispersion,
        overload_penalty,
        penalty_factor: net.penalty_factor(),
        cost: dispersion + net.penalty_factor() * overload_penalty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::network::ConsumptionClass;
    use proptest::prelude::*;

    fn single_overloaded() -> Network {
        let mut net = Network::new();
        net.upsert_generator("G1", 10.0).unwrap();
        net.upsert_house("M1", ConsumptionClass::High).unwrap();
        net.connect("M1", "G1").unwrap();
        net
    }

    fn unbalanced_pair() -> Network {
        let mut net = Network::new();
        net.upsert_generator("G1", 100.0).unwrap();
        net.upsert_generator("G2", 100.0).unwrap();
        net.upsert_house("A", ConsumptionClass::Normal).unwrap();
        net.upsert_house("B", ConsumptionClass::High).unwrap();
        net.upsert_house("C", ConsumptionClass::High).unwrap();
        net.connect("A", "G1").unwrap();
        net.connect("B", "G2").unwrap();
        net.connect("C", "G2").unwrap();
        net
    }

    #[test]
    fn test_single_overloaded_generator() {
        let net = single_overloaded();
        assert!((overload_penalty(&net).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(dispersion(&net).unwrap(), 0.0);
        assert!((cost(&net).unwrap() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_dispersion_of_unbalanced_pair() {
        let net = unbalanced_pair();
        assert!((utilization(&net, "G1").unwrap() - 0.2).abs() < 1e-12);
        assert!((utilization(&net, "G2").unwrap() - 0.8).abs() < 1e-12);
        assert!((dispersion(&net).unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(overload_penalty(&net).unwrap(), 0.0);
    }

    #[test]
    fn test_load_sums_assigned_demand() {
        let mut net = unbalanced_pair();
        net.upsert_house("D", ConsumptionClass::Low).unwrap();
        net.connect("D", "G1").unwrap();
        assert_eq!(load(&net, "G1").unwrap(), 30.0);
        assert_eq!(load(&net, "G2").unwrap(), 80.0);
        assert_eq!(loads(&net)["G1"], 30.0);
    }

    #[test]
    fn test_load_unknown_generator() {
        let net = unbalanced_pair();
        assert_eq!(load(&net, "G9").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_idle_generator_has_zero_load() {
        let mut net = Network::new();
        net.upsert_generator("G1", 50.0).unwrap();
        assert_eq!(load(&net, "G1").unwrap(), 0.0);
        assert_eq!(utilization(&net, "G1").unwrap(), 0.0);
    }

    #[test]
    fn test_zero_capacity_is_logic_error() {
        let mut net = unbalanced_pair();
        net.upsert_generator("G1", 0.0).unwrap();
        assert_eq!(utilization(&net, "G1").unwrap_err().kind(), ErrorKind::Logic);
        assert!(utilization(&net, "G2").is_ok());
        assert_eq!(dispersion(&net).unwrap_err().kind(), ErrorKind::Logic);
        assert_eq!(overload_penalty(&net).unwrap_err().kind(), ErrorKind::Logic);
        assert_eq!(cost(&net).unwrap_err().kind(), ErrorKind::Logic);
        assert_eq!(summarize(&net).unwrap_err().kind(), ErrorKind::Logic);
    }

    #[test]
    fn test_no_generators() {
        let mut net = Network::new();
        net.upsert_house("M1", ConsumptionClass::Low).unwrap();
        assert_eq!(dispersion(&net).unwrap(), 0.0);
        assert_eq!(overload_penalty(&net).unwrap(), 0.0);
        assert_eq!(cost(&net).unwrap(), 0.0);
    }

    #[test]
    fn test_penalty_factor_scales_overload() {
        let mut net = single_overloaded();
        net.set_penalty_factor(50.0).unwrap();
        assert!((cost(&net).unwrap() - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_matches_free_functions() {
        let net = unbalanced_pair();
        let s = summarize(&net).unwrap();
        assert_eq!(s.generators.len(), 2);
        assert_eq!(s.generators[1].name, "G2");
        assert_eq!(s.generators[1].load_kw, 80.0);
        assert!(!s.generators[1].is_overloaded());
        assert_eq!(s.dispersion, dispersion(&net).unwrap());
        assert_eq!(s.cost, cost(&net).unwrap());

        let s = summarize(&single_overloaded()).unwrap();
        assert!(s.generators[0].is_overloaded());
    }

    // ---- Properties over random networks ----

    fn arb_network() -> impl Strategy<Value = Network> {
        (
            prop::collection::vec(1u32..200, 1..6),
            prop::collection::vec((0usize..3, any::<prop::sample::Index>()), 0..20),
            0.0f64..100.0,
        )
            .prop_map(|(caps, houses, lambda)| {
                let mut net = Network::new();
                net.set_penalty_factor(lambda).unwrap();
                for (i, cap) in caps.iter().enumerate() {
                    net.upsert_generator(&format!("G{i}"), f64::from(*cap)).unwrap();
                }
                for (i, (class, target)) in houses.iter().enumerate() {
                    let name = format!("M{i}");
                    net.upsert_house(&name, ConsumptionClass::ALL[*class]).unwrap();
                    let g = format!("G{}", target.index(caps.len()));
                    net.connect(&name, &g).unwrap();
                }
                net
            })
    }

    proptest! {
        #[test]
        fn prop_cost_components_non_negative(net in arb_network()) {
            prop_assert!(dispersion(&net).unwrap() >= 0.0);
            prop_assert!(overload_penalty(&net).unwrap() >= 0.0);
        }

        #[test]
        fn prop_cost_is_weighted_sum(net in arb_network()) {
            let expected = dispersion(&net).unwrap()
                + net.penalty_factor() * overload_penalty(&net).unwrap();
            prop_assert_eq!(cost(&net).unwrap(), expected);
        }

        #[test]
        fn prop_loads_cover_all_demand(net in arb_network()) {
            let total: f64 = loads(&net).values().sum();
            let demand: f64 = net.houses().values().map(|h| h.demand_kw()).sum();
            prop_assert!((total - demand).abs() < 1e-9);
        }

        #[test]
        fn prop_upsert_generator_is_idempotent(
            net in arb_network(),
            index in 0usize..8,
            capacity in 0u32..1000,
        ) {
            // Indices past the last generator name a new one.
            let name = format!("G{index}");
            let mut once = net.clone();
            once.upsert_generator(&name, f64::from(capacity)).unwrap();
            let mut twice = net;
            twice.upsert_generator(&name, f64::from(capacity)).unwrap();
            twice.upsert_generator(&name, f64::from(capacity)).unwrap();
            prop_assert_eq!(once.snapshot(), twice.snapshot());
        }
    }
}

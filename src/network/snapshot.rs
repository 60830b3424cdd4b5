//! Enumerable, owned copy of a network for serializers.

use super::model::Network;
use super::types::ConsumptionClass;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorRecord {
    pub name: String,
    pub capacity_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseRecord {
    pub name: String,
    pub class: ConsumptionClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionRecord {
    pub house: String,
    pub generator: String,
}

/// Everything needed to rebuild an equivalent [`Network`] through its
/// public mutation operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSnapshot {
    pub penalty_factor: f64,
    pub generators: Vec<GeneratorRecord>,
    pub houses: Vec<HouseRecord>,
    pub connections: Vec<ConnectionRecord>,
}

impl Network {
    /// Takes an owned snapshot, entries in name order.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            penalty_factor: self.penalty_factor(),
            generators: self
                .generators()
                .values()
                .map(|g| GeneratorRecord {
                    name: g.name().to_string(),
                    capacity_kw: g.capacity_kw(),
                })
                .collect(),
            houses: self
                .houses()
                .values()
                .map(|h| HouseRecord {
                    name: h.name().to_string(),
                    class: h.class(),
                })
                .collect(),
            connections: self
                .assignment()
                .iter()
                .map(|(house, generator)| ConnectionRecord {
                    house: house.clone(),
                    generator: generator.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a network: generators, then houses, then connections.
    ///
    /// Every record goes through the same validation as an interactive
    /// edit, so a hand-built snapshot with a bad entry is rejected.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Network> {
        let mut net = Network::new();
        net.set_penalty_factor(snapshot.penalty_factor)?;
        for g in &snapshot.generators {
            net.upsert_generator(&g.name, g.capacity_kw)?;
        }
        for h in &snapshot.houses {
            net.upsert_house(&h.name, h.class)?;
        }
        for c in &snapshot.connections {
            net.connect(&c.house, &c.generator)?;
        }
        Ok(net)
    }
}

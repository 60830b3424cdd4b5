//! Network file writer.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{GridError, Result};
use crate::network::Network;

/// Largest capacity the integer field of the format can hold.
const MAX_CAPACITY: f64 = i64::MAX as f64;

/// Characters that would break a statement if they appeared in a name.
const RESERVED: [char; 4] = ['(', ')', ',', '.'];

fn check_name(name: &str) -> Result<()> {
    if name.contains(&RESERVED[..]) || name.contains('\n') || name.trim() != name {
        return Err(GridError::invalid(format!(
            "name '{name}' cannot be written to a network file"
        )));
    }
    Ok(())
}

/// Renders `net` in the network file format: generators, houses, then
/// connections, each in name order.
///
/// Fails with `InvalidData` for a capacity with a fractional part or
/// beyond the `i64` range, or a name the parser could not read back. The penalty factor is not part
/// of the format.
pub fn write_network(net: &Network) -> Result<String> {
    let mut out = String::new();

    for g in net.generators().values() {
        check_name(g.name())?;
        let capacity = g.capacity_kw();
        if capacity.fract() != 0.0 {
            return Err(GridError::invalid(format!(
                "generator {}: capacity {capacity} is not an integer",
                g.name()
            )));
        }
        if capacity >= MAX_CAPACITY {
            return Err(GridError::invalid(format!(
                "generator {}: capacity {capacity} is too large for a network file",
                g.name()
            )));
        }
        out.push_str(&format!("generator({},{}).\n", g.name(), capacity as i64));
    }
    for h in net.houses().values() {
        check_name(h.name())?;
        out.push_str(&format!("house({},{}).\n", h.name(), h.class()));
    }
    for (house, generator) in net.assignment() {
        out.push_str(&format!("connection({generator},{house}).\n"));
    }

    Ok(out)
}

/// Writes `net` to `path`, replacing any existing file.
pub fn save_network(net: &Network, path: impl AsRef<Path>) -> Result<()> {
    let text = write_network(net)?;
    fs::write(path.as_ref(), text)?;
    info!(path = %path.as_ref().display(), "network saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::format::parse_network;
    use crate::network::ConsumptionClass;

    #[test]
    fn test_write_sections_in_order() {
        let mut net = Network::new();
        net.upsert_generator("G2", 30.0).unwrap();
        net.upsert_generator("G1", 100.0).unwrap();
        net.upsert_house("M1", ConsumptionClass::Low).unwrap();
        net.connect("M1", "G2").unwrap();

        let text = write_network(&net).unwrap();
        assert_eq!(
            text,
            "generator(G1,100).\ngenerator(G2,30).\nhouse(M1,LOW).\nconnection(G2,M1).\n"
        );
    }

    #[test]
    fn test_written_text_parses_back() {
        let mut net = Network::new();
        net.upsert_generator("Plant", 75.0).unwrap();
        net.upsert_house("Home", ConsumptionClass::High).unwrap();
        net.upsert_house("Flat", ConsumptionClass::Normal).unwrap();
        net.connect("Home", "Plant").unwrap();

        let back = parse_network(&write_network(&net).unwrap()).unwrap();
        assert_eq!(back.snapshot(), net.snapshot());
    }

    #[test]
    fn test_fractional_capacity_rejected() {
        let mut net = Network::new();
        net.upsert_generator("G1", 12.5).unwrap();
        assert_eq!(
            write_network(&net).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }

    #[test]
    fn test_capacity_beyond_integer_range_rejected() {
        let mut net = Network::new();
        net.upsert_generator("G1", 1e20).unwrap();
        assert_eq!(
            write_network(&net).unwrap_err().kind(),
            ErrorKind::InvalidData
        );

        let mut net = Network::new();
        net.upsert_generator("G1", 9.0e18).unwrap();
        let back = parse_network(&write_network(&net).unwrap()).unwrap();
        assert_eq!(back.generator("G1").unwrap().capacity_kw(), 9.0e18);
    }

    #[test]
    fn test_reserved_characters_rejected() {
        let mut net = Network::new();
        net.upsert_house("a,b", ConsumptionClass::Low).unwrap();
        assert_eq!(
            write_network(&net).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }
}

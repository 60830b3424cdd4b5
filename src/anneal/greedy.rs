//! Greedy starting assignment.

use crate::cost;
use crate::error::Result;
use crate::network::Network;

/// Replaces the assignment with a greedy one.
///
/// Houses are taken by descending demand (ties by name) and each goes to
/// the generator whose utilization is lowest before adding it (ties by
/// generator name). Fails with `Logic` on the first zero-capacity
/// generator; the assignment is then partially built and the caller is
/// expected to restore it.
pub fn greedy_assign(net: &mut Network) -> Result<()> {
    net.clear_assignment();

    let mut order: Vec<(String, f64)> = net
        .houses()
        .values()
        .map(|h| (h.name().to_string(), h.demand_kw()))
        .collect();
    // Stable sort keeps name order among equal demands.
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let generators: Vec<String> = net.generators().keys().cloned().collect();

    for (house, _) in &order {
        let mut best: Option<(&str, f64)> = None;
        for g in &generators {
            let rate = cost::utilization(net, g)?;
            if best.is_none_or(|(_, r)| rate < r) {
                best = Some((g.as_str(), rate));
            }
        }
        if let Some((g, _)) = best {
            net.assign(house, g);
        }
    }
    Ok(())
}

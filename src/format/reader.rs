//! Network file parser.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{GridError, Result};
use crate::network::{ConsumptionClass, Network};

/// File sections, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Generators,
    Houses,
    Connections,
}

fn syntax(line: usize, detail: impl Into<String>) -> GridError {
    GridError::Syntax {
        line,
        detail: detail.into(),
    }
}

/// Splits `keyword(a, b)` into its two trimmed arguments.
fn arguments<'a>(body: &'a str, keyword: &str, usage: &str, line: usize) -> Result<[&'a str; 2]> {
    let rest = body[keyword.len()..].trim_start();
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| syntax(line, format!("missing or misplaced parentheses, expected {usage}")))?;

    let args: Vec<&str> = inner.split(',').map(str::trim).collect();
    match args.as_slice() {
        [a, b] => Ok([*a, *b]),
        _ => Err(syntax(
            line,
            format!("{keyword} takes 2 arguments, got {}: expected {usage}", args.len()),
        )),
    }
}

/// Parses a network description.
///
/// ```text
/// generator(G1,100).
/// house(M1,NORMAL).
/// connection(G1,M1).
/// ```
///
/// One statement per line, each ending with `.`; blank lines are
/// ignored. Generators come first, then houses, then connections.
/// Files from the older format, with `generateur`, `maison` and
/// `connexion` statements, are read as well.
pub fn parse_network(text: &str) -> Result<Network> {
    let mut net = Network::new();
    let mut section = Section::Generators;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let stmt = raw.trim();
        if stmt.is_empty() {
            continue;
        }
        let body = stmt
            .strip_suffix('.')
            .ok_or_else(|| syntax(line, "statement must end with '.'"))?
            .trim();

        let keyword = body
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        match keyword {
            "generator" | "generateur" => {
                if section > Section::Generators {
                    return Err(GridError::Ordering {
                        line,
                        element: "generator".into(),
                        reason: "generators must be declared before houses and connections".into(),
                    });
                }
                let [name, capacity] =
                    arguments(body, keyword, "generator(name,capacity)", line)?;
                let capacity: i64 = capacity.parse().map_err(|_| {
                    GridError::invalid(format!(
                        "generator {name}: capacity '{capacity}' is not an integer"
                    ))
                    .at_line(line)
                })?;
                net.upsert_generator(name, capacity as f64)
                    .map_err(|e| e.at_line(line))?;
            }
            "house" | "maison" => {
                if section > Section::Houses {
                    return Err(GridError::Ordering {
                        line,
                        element: "house".into(),
                        reason: "houses must be declared before connections".into(),
                    });
                }
                section = Section::Houses;
                let [name, class] = arguments(body, keyword, "house(name,LOW|NORMAL|HIGH)", line)?;
                let class: ConsumptionClass = class.parse().map_err(|e: GridError| e.at_line(line))?;
                net.upsert_house(name, class).map_err(|e| e.at_line(line))?;
            }
            "connection" | "connexion" => {
                section = Section::Connections;
                let [a, b] = arguments(body, keyword, "connection(name,name)", line)?;
                net.connect(a, b).map_err(|e| e.at_line(line))?;
            }
            other => {
                return Err(syntax(line, format!("unknown keyword '{other}'")));
            }
        }
    }

    debug!(
        generators = net.generators().len(),
        houses = net.houses().len(),
        connections = net.assignment().len(),
        "network parsed"
    );
    Ok(net)
}

/// Reads and parses a network file.
pub fn read_network(path: impl AsRef<Path>) -> Result<Network> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_network(&text)
}

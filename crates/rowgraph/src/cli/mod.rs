//! CLI command implementations.

mod display;

pub mod build;
pub mod filter;
pub mod impact;
pub mod paths;
pub mod reachable;

use rowgraph::{EntityId, Error};

/// Largest `--max-length`/`--max-depth` the CLI accepts.
const MAX_BOUND: usize = 20;

/// Parse a path length or depth bound in `1..=20`.
pub fn parse_bound(value: &str) -> Result<usize, String> {
    let bound: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (1..=MAX_BOUND).contains(&bound) {
        Ok(bound)
    } else {
        Err(format!("must be between 1 and {MAX_BOUND}, got {bound}"))
    }
}

/// Turn a comma-split argument into entity ids, dropping blanks.
fn entity_ids(flag: &str, raw: &[String]) -> Result<Vec<EntityId>, Error> {
    let ids: Vec<EntityId> = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(EntityId::from)
        .collect();
    if ids.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{flag} needs at least one entity id"
        )));
    }
    Ok(ids)
}

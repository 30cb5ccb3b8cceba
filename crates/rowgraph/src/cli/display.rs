//! Common display utilities for CLI commands.

use colored::Colorize;
use rowgraph::{Dataset, EntityId, Error};
use serde::Serialize;

const MAX_DISPLAY_ITEMS: usize = 10;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display a list of entities with their labels, truncated after
/// `MAX_DISPLAY_ITEMS`. If empty, shows `empty_message`.
pub fn print_entities(dataset: &Dataset, ids: &[EntityId], empty_message: &str) {
    if ids.is_empty() {
        println!("    {}", empty_message.dimmed());
        return;
    }

    for id in ids.iter().take(MAX_DISPLAY_ITEMS) {
        match dataset.entity(id.as_str()) {
            Some(entity) if entity.label != id.as_str() => println!(
                "    {} {} {}",
                "•".dimmed(),
                id,
                format!("({})", entity.label).dimmed()
            ),
            _ => println!("    {} {id}", "•".dimmed()),
        }
    }

    if ids.len() > MAX_DISPLAY_ITEMS {
        println!(
            "    {} ... and {} more",
            "•".dimmed(),
            ids.len() - MAX_DISPLAY_ITEMS
        );
    }
}

/// Join a route of entity ids with arrows.
pub fn format_route(nodes: &[EntityId]) -> String {
    join_ids(nodes, " -> ")
}

/// Join entity ids with commas.
pub fn format_list(ids: &[EntityId]) -> String {
    join_ids(ids, ", ")
}

fn join_ids(ids: &[EntityId], separator: &str) -> String {
    ids.iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// One-line size summary of a dataset.
pub fn print_dataset_summary(title: &str, dataset: &Dataset) {
    println!(
        "{}: {} entities, {} relationships",
        title.white().bold(),
        dataset.entities.len().to_string().green(),
        dataset.relationships.len().to_string().green()
    );
}

/// Write `dataset` to `out` when given; otherwise print it as JSON or a
/// summary.
pub fn emit_dataset(
    title: &str,
    dataset: &Dataset,
    out: Option<&std::path::Path>,
    json: bool,
) -> Result<(), Error> {
    if let Some(path) = out {
        dataset.save(path)?;
        if !json {
            print_dataset_summary(title, dataset);
            println!("{} {}", "Wrote".dimmed(), path.display());
        }
        return Ok(());
    }

    if json {
        print_json(dataset)
    } else {
        print_dataset_summary(title, dataset);
        let ids: Vec<EntityId> = dataset.entities.iter().map(|e| e.id.clone()).collect();
        print_entities(dataset, &ids, "(no entities)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_is_joined_with_arrows() {
        let nodes = vec![EntityId::from("a"), EntityId::from("b"), EntityId::from("c")];

        assert_eq!(format_route(&nodes), "a -> b -> c");
        assert_eq!(format_list(&nodes), "a, b, c");
    }
}

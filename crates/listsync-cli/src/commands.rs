use std::fmt::Debug;

use anyhow::{bail, Context};
use colored::Colorize;
use listsync_diff::{compute_diff, DiffResult, EditOp, ListModel, Slot};
use serde::Serialize;

use crate::cli::*;
use crate::config::CliConfig;
use crate::demo;
use crate::json::{load_items, JsonItems};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, cli.format),
        Command::Demo(args) => cmd_demo(args, &config, cli.format),
    }
}

fn cmd_diff(args: DiffArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let old = load_items(&args.old)?;
    let new = load_items(&args.new)?;
    let callback = JsonItems::new(&old, &new, config.key(args.key.as_deref()));
    let options = config.diff_options(args.detect_moves);

    let result = compute_diff(old.len(), new.len(), &callback, &options)
        .with_context(|| format!("diffing {} against {}", args.old.display(), args.new.display()))?;
    replay(&result, &old, &new)?;
    print_ops(&result, format)
}

fn cmd_demo(args: DemoArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let old = demo::original_list();
    let new = demo::edited_list();
    let callback = demo::artist_callbacks(&old, &new);
    let options = config.diff_options(args.detect_moves);

    let result = compute_diff(old.len(), new.len(), &callback, &options)?;
    let items = replay(&result, &old, &new)?;
    print_ops(&result, format)?;

    if format == OutputFormat::Text {
        println!();
        for artist in &items {
            println!("  {:<12} {}", artist.name, artist.status.to_string().magenta());
        }
    }
    Ok(())
}

/// Dispatch onto a model of `old` and check the kept items line up with `new`.
fn replay<T, P>(result: &DiffResult<P>, old: &[T], new: &[T]) -> anyhow::Result<Vec<T>>
where
    T: Clone + PartialEq + Debug,
    P: PartialEq,
{
    let mut model = ListModel::new(old.iter().cloned());
    result.dispatch(&mut model)?;
    if model.len() != new.len() {
        bail!("replay produced {} items, expected {}", model.len(), new.len());
    }
    let inserted = (0..new.len())
        .filter(|&i| matches!(result.new_position_to_old(i), Ok(None)))
        .count();
    if model.pending() != inserted {
        bail!("replay left {} placeholders, expected {}", model.pending(), inserted);
    }
    for (index, (slot, expected)) in model.slots().iter().zip(new).enumerate() {
        if let Slot::Kept(item) = slot {
            if item != expected {
                bail!("replay kept {:?} at {}, expected {:?}", item, index, expected);
            }
        }
    }
    Ok(model.into_items(new)?)
}

fn print_ops<P>(result: &DiffResult<P>, format: OutputFormat) -> anyhow::Result<()>
where
    P: Clone + PartialEq + Serialize,
{
    let ops = result.operations();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&ops)?);
        return Ok(());
    }

    if ops.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    for op in &ops {
        match op {
            EditOp::Insert { index, count } => {
                println!("  {} insert {} at {}", "+".green().bold(), count, index)
            }
            EditOp::Remove { index, count } => {
                println!("  {} remove {} at {}", "-".red().bold(), count, index)
            }
            EditOp::Move { from, to } => {
                println!("  {} move {} -> {}", "~".yellow().bold(), from, to)
            }
            EditOp::Update { index, count, payload } => {
                let detail = match payload {
                    Some(p) => serde_json::to_string(p)?,
                    None => String::new(),
                };
                println!("  {} update {} at {} {}", "*".cyan().bold(), count, index, detail.dimmed())
            }
        }
    }
    println!("{} {}", "✓".green().bold(), summary(result, &ops));
    Ok(())
}

fn summary<P>(result: &DiffResult<P>, ops: &[EditOp<P>]) -> String {
    let structural = ops.iter().filter(|op| op.is_structural()).count();
    format!(
        "{} operation(s), {} structural, {} update(s): {} old -> {} new items{}",
        ops.len(),
        structural,
        ops.len() - structural,
        result.old_size(),
        result.new_size(),
        if result.detects_moves() { ", moves detected" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use listsync_diff::DiffOptions;
    use serde_json::{json, Value};

    #[test]
    fn replay_rebuilds_the_new_list() {
        let old: Vec<Value> = vec![json!({"id": 1}), json!({"id": 2, "v": 1}), json!({"id": 3})];
        let new: Vec<Value> = vec![json!({"id": 3}), json!({"id": 2, "v": 2}), json!({"id": 4})];
        let callback = JsonItems::new(&old, &new, Some("id"));
        let opts = DiffOptions::new().detect_moves(true);
        let result = compute_diff(old.len(), new.len(), &callback, &opts).unwrap();

        assert_eq!(replay(&result, &old, &new).unwrap(), new);
    }

    #[test]
    fn summary_splits_structural_edits_from_updates() {
        let old: Vec<Value> = vec![json!({"id": 1}), json!({"id": 2, "v": 1}), json!({"id": 3})];
        let new: Vec<Value> = vec![json!({"id": 3}), json!({"id": 2, "v": 2}), json!({"id": 1})];
        let callback = JsonItems::new(&old, &new, Some("id"));
        let opts = DiffOptions::new().detect_moves(true);
        let result = compute_diff(old.len(), new.len(), &callback, &opts).unwrap();
        let ops = result.operations();
        let updates = ops.iter().filter(|op| matches!(op, EditOp::Update { .. })).count();

        assert_eq!(updates, 1);
        assert_eq!(
            summary(&result, &ops),
            format!(
                "{} operation(s), {} structural, 1 update(s): 3 old -> 3 new items, moves detected",
                ops.len(),
                ops.len() - 1
            )
        );
    }

    #[test]
    fn replay_counts_inserted_placeholders() {
        let old: Vec<Value> = vec![json!({"id": 1})];
        let new: Vec<Value> = vec![json!({"id": 0}), json!({"id": 1}), json!({"id": 2})];
        let callback = JsonItems::new(&old, &new, Some("id"));
        let result = compute_diff(old.len(), new.len(), &callback, &DiffOptions::new()).unwrap();

        assert_eq!(replay(&result, &old, &new).unwrap(), new);
    }
}

// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::api::LedgerClient;
use crate::models::{Priority, TodoItem, TodoPatch};
use crate::utils::{confirm, maybe_print_json, parse_date, pretty_table, today_string};

pub fn handle(client: &LedgerClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, sub)?,
        Some(("add", sub)) => add(client, sub)?,
        Some(("toggle", sub)) => toggle(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        Some(("clear-completed", _)) => clear_completed(client)?,
        _ => {}
    }
    Ok(())
}

fn list(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let status = sub.get_one::<String>("status").unwrap();
    let priority = sub
        .get_one::<String>("priority")
        .map(|p| p.parse::<Priority>())
        .transpose()?;
    let search = sub.get_one::<String>("search").map(|s| s.to_lowercase());

    let items = client.list_todos().context("Fetch tasks from ledger API")?;
    let total = items.len();
    let active = items.iter().filter(|t| !t.completed).count();

    let mut rows: Vec<&TodoItem> = items
        .iter()
        .filter(|t| match status.as_str() {
            "active" => !t.completed,
            "completed" => t.completed,
            _ => true,
        })
        .filter(|t| priority.is_none_or(|p| t.priority == p))
        .filter(|t| {
            search.as_deref().is_none_or(|needle| {
                t.title.to_lowercase().contains(needle)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            })
        })
        .collect();
    // Active before completed, then high priority first within each group.
    rows.sort_by_key(|t| (t.completed, t.priority));

    if maybe_print_json(sub.get_flag("json"), false, &rows)? {
        return Ok(());
    }

    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                (if t.completed { "x" } else { " " }).to_string(),
                t.priority.to_string(),
                t.title.clone(),
                t.due_date.clone().unwrap_or_default(),
                t.category.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Done", "Priority", "Title", "Due", "Category"], data)
    );
    println!("{active} active, {} completed.", total - active);
    Ok(())
}

fn add(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let due_date = sub
        .get_one::<String>("due")
        .map(|d| parse_date(d).map(|d| d.to_string()))
        .transpose()?;

    let item = TodoItem {
        id: Uuid::new_v4().to_string(),
        title: sub.get_one::<String>("title").unwrap().clone(),
        description: sub.get_one::<String>("description").cloned(),
        completed: false,
        priority: sub.get_one::<String>("priority").unwrap().parse()?,
        due_date,
        category: sub.get_one::<String>("category").cloned(),
        created_at: Some(today_string()),
    };

    client.add_todo(&item).context("Create task")?;
    println!("Added task '{}' ({})", item.title, item.id);
    Ok(())
}

fn find_todo(client: &LedgerClient, id: &str) -> Result<TodoItem> {
    client
        .list_todos()
        .context("Fetch tasks from ledger API")?
        .into_iter()
        .find(|t| t.id == id)
        .with_context(|| format!("Task '{}' not found", id))
}

fn toggle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let current = find_todo(client, id)?;

    let patch = TodoPatch {
        completed: Some(!current.completed),
        ..TodoPatch::default()
    };
    client.patch_todo(id, &patch).context("Update task")?;
    println!(
        "Task '{}' is now {}.",
        current.title,
        if current.completed { "active" } else { "completed" }
    );
    Ok(())
}

fn edit(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    let patch = TodoPatch {
        title: sub.get_one::<String>("title").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        completed: None,
        priority: sub
            .get_one::<String>("priority")
            .map(|p| p.parse())
            .transpose()?,
        due_date: sub
            .get_one::<String>("due")
            .map(|d| parse_date(d).map(|d| d.to_string()))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
    };

    client.patch_todo(id, &patch).context("Update task")?;
    println!("Updated task {}", id);
    Ok(())
}

fn rm(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    if !sub.get_flag("yes") && !confirm("Are you sure you want to delete this item?")? {
        println!("Aborted.");
        return Ok(());
    }

    client.delete_todo(id).context("Delete task")?;
    println!("Deleted task {}", id);
    Ok(())
}

fn clear_completed(client: &LedgerClient) -> Result<()> {
    let items = client.list_todos().context("Fetch tasks from ledger API")?;
    let before = items.len();
    let kept: Vec<TodoItem> = items.into_iter().filter(|t| !t.completed).collect();
    let removed = before - kept.len();

    if removed == 0 {
        println!("No completed tasks to clear.");
        return Ok(());
    }

    client.put_todos(&kept).context("Save task list")?;
    println!("Cleared {removed} completed task(s).");
    Ok(())
}

//! Taskman CLI - personal task tracking from the terminal.

use clap::Parser;
use colored::*;
use eyre::{Context, Report, Result, eyre};
use log::info;
use std::fs;
use taskman::{Config, Priority, Store, Task, TaskFilter, TaskUpdate};

mod cli;

use cli::{Cli, Command};

fn setup_logging(config: &Config) -> Result<()> {
    let log_file = config.log_file();
    if let Some(log_dir) = log_file.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn format_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.name().red(),
        Priority::Medium => priority.name().yellow(),
        Priority::Low => priority.name().blue(),
    }
}

fn print_task(number: usize, task: &Task) {
    let check = if task.completed { "✓".green() } else { " ".normal() };
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", task.tags.join(", "))
    };
    let due = task.due_date_text().unwrap_or_default();

    let title = if task.completed {
        task.title.dimmed()
    } else {
        task.title.normal()
    };

    println!(
        "{:>3} [{}] {:<6} {:<10} {}{}",
        number.to_string().cyan(),
        check,
        format_priority(task.priority),
        due,
        title,
        tags.dimmed()
    );
}

/// Convert a 1-based CLI number to a store index.
fn to_index(number: usize) -> Result<usize> {
    number.checked_sub(1).ok_or_else(|| not_found(number))
}

fn not_found(number: usize) -> Report {
    eyre!("No task number {}", number)
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let path = config.data_file(cli.file.as_deref());
    info!("Using task file: {}", path.display());

    let mut store = Store::open(&path);
    let report = store.load_report();
    if report.unreadable {
        eprintln!(
            "{} Could not read {}, starting with an empty list (the file is moved aside on save)",
            "!".yellow(),
            path.display()
        );
    } else if report.skipped > 0 {
        eprintln!("{} Skipped {} malformed task record(s)", "!".yellow(), report.skipped);
    }

    match cli.command {
        Command::Add {
            title,
            due,
            priority,
            tags,
        } => {
            let tags = tags.unwrap_or_default();
            let task = store
                .add_task(&title, due.as_deref(), priority, tags.as_slice())
                .context("Failed to add task")?;

            println!("{} Added: {} {}", "✓".green(), store.len().to_string().cyan(), task.title);
        }

        Command::List {
            done,
            pending,
            search,
            sort,
        } => {
            let mut filter = TaskFilter::new();
            if done {
                filter = filter.completed(true);
            } else if pending {
                filter = filter.completed(false);
            }
            if let Some(query) = search {
                filter = filter.search(query);
            }
            if sort {
                filter = filter.sorted();
            }

            let tasks = store.get_tasks_indexed(&filter);
            if tasks.is_empty() {
                println!("{}", "No tasks found".dimmed());
            } else {
                for (index, task) in tasks {
                    print_task(index + 1, task);
                }
            }
        }

        Command::Done { index } => {
            let position = to_index(index)?;
            if !store.complete_task(position) {
                return Err(not_found(index));
            }
            println!("{} Completed: {}", "✓".green(), store.all()[position].title);
        }

        Command::Undo { index } => {
            let update = TaskUpdate::new().completed(false);
            let position = to_index(index)?;
            if !store.update_task(position, &update).context("Failed to update task")? {
                return Err(not_found(index));
            }
            println!("{} Reopened: {}", "→".blue(), store.all()[position].title);
        }

        Command::Edit {
            index,
            title,
            priority,
            due,
            tags,
        } => {
            let update = TaskUpdate {
                title,
                priority,
                due_date: due,
                completed: None,
                tags,
            };
            let position = to_index(index)?;
            if !store.update_task(position, &update).context("Failed to update task")? {
                return Err(not_found(index));
            }
            println!("{} Updated: {}", "✓".green(), store.all()[position]);
        }

        Command::Rm { index } => {
            let position = to_index(index)?;
            let title = store.all().get(position).map(|t| t.title.clone());
            if !store.delete_task(position) {
                return Err(not_found(index));
            }
            println!("{} Deleted: {}", "✓".green(), title.unwrap_or_default());
        }

        Command::Clear => {
            let removed = store.clear_completed();
            if removed == 0 {
                println!("{}", "No completed tasks".dimmed());
            } else {
                println!("{} Cleared {} completed task(s)", "✓".green(), removed);
            }
        }

        Command::Path => println!("{}", store.path().display()),
    }

    if store.is_dirty() {
        store.save().context("Changes applied but not saved")?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::discover(cli.config.as_deref()).context("Failed to load config")?;
    setup_logging(&config).context("Failed to setup logging")?;
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli, &config) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

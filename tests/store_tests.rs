//! Integration tests for store operations: add, query, sort, delete, clear.

mod common;

use common::TestEnv;
use taskman::{Priority, TaskFilter, TaskUpdate};

// =============================================================================
// Add
// =============================================================================

#[test]
fn test_add_then_get_returns_task() {
    let mut env = TestEnv::new();

    let task = env.add_scheduled("Finish project", Some("2024-06-05"), Priority::High);

    let tasks = env.store.get_tasks(&TaskFilter::new());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], &task);
    assert_eq!(tasks[0].title, "Finish project");
    assert_eq!(tasks[0].due_date_text().as_deref(), Some("2024-06-05"));
    assert_eq!(tasks[0].priority, Priority::High);
    assert!(!tasks[0].completed);
}

#[test]
fn test_add_appends_in_insertion_order() {
    let mut env = TestEnv::new();

    env.add("A");
    env.add("B");
    env.add("C");

    assert_eq!(env.all_titles(), vec!["A", "B", "C"]);
}

#[test]
fn test_builder_adds_through_store() {
    let mut env = TestEnv::new();

    env.store
        .build("Water plants")
        .priority(Priority::Low)
        .tag("home")
        .create()
        .unwrap();

    env.reopen();
    assert_eq!(env.store.all()[0].tags, vec!["home"]);
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sort_law_example() {
    let mut env = TestEnv::new();

    env.add_scheduled("Buy groceries", Some("2024-06-10"), Priority::Low);
    env.add_scheduled("Finish project", Some("2024-06-05"), Priority::High);
    env.add_scheduled("Call mom", None, Priority::Medium);

    assert_eq!(
        env.titles(&TaskFilter::new().sorted()),
        vec!["Finish project", "Buy groceries", "Call mom"]
    );
}

#[test]
fn test_sort_does_not_reorder_storage() {
    let mut env = TestEnv::new();

    env.add_scheduled("Later", Some("2024-07-01"), Priority::Low);
    env.add_scheduled("Sooner", Some("2024-06-01"), Priority::Low);

    let _ = env.store.get_tasks(&TaskFilter::new().sorted());
    assert_eq!(env.all_titles(), vec!["Later", "Sooner"]);
}

#[test]
fn test_sort_undated_by_priority_then_stable() {
    let mut env = TestEnv::new();

    env.add_scheduled("low", None, Priority::Low);
    env.add_scheduled("high-1", None, Priority::High);
    env.add_scheduled("medium", None, Priority::Medium);
    env.add_scheduled("high-2", None, Priority::High);

    assert_eq!(
        env.titles(&TaskFilter::new().sorted()),
        vec!["high-1", "high-2", "medium", "low"]
    );
}

#[test]
fn test_sort_same_date_by_priority() {
    let mut env = TestEnv::new();

    env.add_scheduled("low", Some("2024-06-05"), Priority::Low);
    env.add_scheduled("high", Some("2024-06-05"), Priority::High);
    env.add_scheduled("earlier", Some("2024-06-04"), Priority::Low);

    assert_eq!(
        env.titles(&TaskFilter::new().sorted()),
        vec!["earlier", "high", "low"]
    );
}

// =============================================================================
// Filtering and search
// =============================================================================

#[test]
fn test_search_matches_title_substring() {
    let mut env = TestEnv::new();

    env.add_scheduled("Finish project", Some("2024-06-05"), Priority::High);
    env.add_scheduled("Buy milk", Some("2024-06-10"), Priority::Low);

    assert_eq!(
        env.titles(&TaskFilter::new().search("proj")),
        vec!["Finish project"]
    );
}

#[test]
fn test_search_matches_tag_and_priority() {
    let mut env = TestEnv::new();

    env.add_tagged("Email landlord", &["Home"]);
    env.add_scheduled("Deploy", None, Priority::High);
    env.add("Read book");

    assert_eq!(env.titles(&TaskFilter::new().search("home")), vec!["Email landlord"]);
    assert_eq!(env.titles(&TaskFilter::new().search("HIGH")), vec!["Deploy"]);
}

#[test]
fn test_search_matches_due_date_text() {
    let mut env = TestEnv::new();

    env.add_scheduled("June", Some("2024-06-05"), Priority::Medium);
    env.add_scheduled("July", Some("2024-07-05"), Priority::Medium);

    assert_eq!(env.titles(&TaskFilter::new().search("2024-07")), vec!["July"]);
}

#[test]
fn test_filter_completed_and_search_compose() {
    let mut env = TestEnv::new();

    env.add("Write report");
    env.add("Write tests");
    env.add("Review PR");
    env.complete(1);

    assert_eq!(
        env.titles(&TaskFilter::new().completed(false).search("write")),
        vec!["Write report"]
    );
    assert_eq!(
        env.titles(&TaskFilter::new().completed(true).search("write")),
        vec!["Write tests"]
    );
}

#[test]
fn test_indexed_view_maps_back_to_storage() {
    let mut env = TestEnv::new();

    env.add_scheduled("Later", Some("2024-07-01"), Priority::Low);
    env.add_scheduled("Sooner", Some("2024-06-01"), Priority::Low);

    let view = env.store.get_tasks_indexed(&TaskFilter::new().sorted());
    let (index, task) = view[0];
    assert_eq!(task.title, "Sooner");

    assert!(env.store.delete_task(index));
    assert_eq!(env.all_titles(), vec!["Later"]);
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_persists() {
    let mut env = TestEnv::new();
    env.add("Draft");

    let update = TaskUpdate::new().title("Final").priority("HIGH").due_date("2024-06-30");
    assert_eq!(env.store.update_task(0, &update), Ok(true));

    env.reopen();
    let task = &env.store.all()[0];
    assert_eq!(task.title, "Final");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date_text().as_deref(), Some("2024-06-30"));
}

#[test]
fn test_update_ignores_unset_fields() {
    let mut env = TestEnv::new();
    env.add_scheduled("Keep", Some("2024-06-05"), Priority::Low);

    env.store.update_task(0, &TaskUpdate::new().completed(true)).unwrap();

    let task = &env.store.all()[0];
    assert_eq!(task.title, "Keep");
    assert_eq!(task.priority, Priority::Low);
    assert!(task.due_date.is_some());
    assert!(task.completed);
}

// =============================================================================
// Delete and clear
// =============================================================================

#[test]
fn test_delete_middle_task() {
    let mut env = TestEnv::new();
    env.add("A");
    env.add("B");
    env.add("C");

    assert!(env.store.delete_task(1));
    assert_eq!(env.all_titles(), vec!["A", "C"]);

    env.reopen();
    assert_eq!(env.all_titles(), vec!["A", "C"]);
}

#[test]
fn test_clear_completed_two_of_five() {
    let mut env = TestEnv::new();
    for title in ["one", "two", "three", "four", "five"] {
        env.add(title);
    }
    env.complete(1);
    env.complete(3);

    assert_eq!(env.store.clear_completed(), 2);
    assert_eq!(env.all_titles(), vec!["one", "three", "five"]);

    env.reopen();
    assert_eq!(env.all_titles(), vec!["one", "three", "five"]);
}

#[test]
fn test_clear_completed_with_none_done() {
    let mut env = TestEnv::new();
    env.add("one");
    let before = env.file_content();

    assert_eq!(env.store.clear_completed(), 0);
    assert_eq!(env.file_content(), before);
    assert_eq!(env.store.len(), 1);
}

#[test]
fn test_returned_references_are_live() {
    let mut env = TestEnv::new();
    env.add("Original");

    if let Some(task) = env.store.task_mut(0) {
        task.mark_completed();
    }
    assert_eq!(env.titles(&TaskFilter::new().completed(true)), vec!["Original"]);

    // Not persisted until an explicit save
    env.store.save().unwrap();
    env.reopen();
    assert!(env.store.all()[0].completed);
}

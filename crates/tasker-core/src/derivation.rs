//! Pure projections over the task collection.
//!
//! Nothing here is stored. Stats, the category list and the filtered/sorted
//! view are recomputed from the collection whenever they are read, and every
//! function is deterministic and side-effect free.

use std::cmp::Ordering;

use crate::models::{Priority, SortOption, Task, TaskFilter, TaskStats, ALL_CATEGORIES};

/// Distinct categories in first-seen order, prefixed with "All".
pub fn categories(tasks: &[Task]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for task in tasks {
        if !categories.contains(&task.category) {
            categories.push(task.category.clone());
        }
    }
    categories
}

/// Aggregate counters over the whole collection.
pub fn stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let high_priority = tasks
        .iter()
        .filter(|t| t.priority == Priority::High && !t.completed)
        .count();

    TaskStats {
        total,
        completed,
        pending: total - completed,
        high_priority,
    }
}

/// Whether a task passes all three filter criteria.
pub fn matches(task: &Task, filter: &TaskFilter) -> bool {
    filter.status.accepts(task.completed)
        && matches_search(task, &filter.search)
        && (filter.category == ALL_CATEGORIES || task.category == filter.category)
}

fn matches_search(task: &Task, query: &str) -> bool {
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query)
        || task
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
}

/// Total order used by the view for the given sort option.
pub fn compare(a: &Task, b: &Task, sort: SortOption) -> Ordering {
    let newest_first = || b.created_at.cmp(&a.created_at);
    match sort {
        SortOption::CreatedAt => newest_first(),
        SortOption::DueDate => match (a.due_date, b.due_date) {
            (None, None) => newest_first(),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        },
        SortOption::Priority => b
            .priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(newest_first),
    }
}

/// Filtered and sorted view over the collection.
pub fn view<'a>(tasks: &'a [Task], filter: &TaskFilter, sort: SortOption) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| matches(t, filter)).collect();
    visible.sort_by(|a, b| compare(a, b, sort));
    visible
}

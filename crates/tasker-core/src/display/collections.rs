//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::Timestamp;

use super::models::TaskLine;
use crate::models::Task;

/// Newtype wrapper for displaying a task list, one line per task.
///
/// # Examples
///
/// ```rust
/// use tasker_core::display::Tasks;
///
/// let tasks = Tasks(vec![]);
/// assert_eq!(tasks.to_string(), "No tasks found.\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        let now = Timestamp::now();
        for task in &self.0 {
            writeln!(f, "{}", TaskLine::new(task, now))?;
        }
        Ok(())
    }
}

/// The category list, "All" first.
#[derive(Debug, Clone, Default)]
pub struct Categories(pub Vec<String>);

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in &self.0 {
            writeln!(f, "- {category}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn task(title: &str) -> Task {
        Task {
            id: format!("{title}-0000-0000"),
            title: title.to_string(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            category: "General".to_string(),
            created_at: Timestamp::from_millisecond(1_717_200_000_000).unwrap(),
            due_date: None,
            sub_tasks: vec![],
        }
    }

    #[test]
    fn test_tasks_display_one_line_each() {
        let tasks = Tasks(vec![task("alpha"), task("beta")]);
        let output = tasks.to_string();
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("**alpha**"));
        assert!(output.contains("**beta**"));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].title, "beta");
    }

    #[test]
    fn test_categories_display() {
        let categories = Categories(vec!["All".to_string(), "Work".to_string()]);
        assert_eq!(categories.to_string(), "- All\n- Work\n");
    }
}

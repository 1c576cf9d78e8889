//! Display implementations for domain models.
//!
//! Everything here renders markdown. Deadline wording depends on the current
//! time, so the time-dependent renderers ([`TaskCard`], [`TaskLine`]) take an
//! explicit `now`; the plain `Display` impls on the models use the wall
//! clock.

use std::fmt;

use jiff::Timestamp;

use super::datetime::{short_id, DueDate, LocalDateTime};
use crate::models::{Deadline, Priority, SubTask, Task, TaskStats, Urgency};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

fn write_due(f: &mut fmt::Formatter<'_>, deadline: &Deadline) -> fmt::Result {
    write!(f, "{}", DueDate(&deadline.due))?;
    if !deadline.label.is_empty() {
        write!(f, " ({})", deadline.label)?;
    }
    Ok(())
}

/// Full markdown view of one task, relative to `now`.
pub struct TaskCard<'a> {
    pub task: &'a Task,
    pub now: Timestamp,
}

impl<'a> TaskCard<'a> {
    pub fn new(task: &'a Task, now: Timestamp) -> Self {
        Self { task, now }
    }
}

impl<'a> fmt::Display for TaskCard<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        writeln!(f, "# {}", task.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", task.id)?;
        writeln!(
            f,
            "- Status: {}",
            if task.completed { "completed" } else { "pending" }
        )?;
        writeln!(f, "- Priority: {}", task.priority)?;
        writeln!(f, "- Category: {}", task.category)?;
        writeln!(f, "- Created: {}", LocalDateTime(&task.created_at))?;

        if let Some(deadline) = task.deadline(self.now) {
            write!(f, "- Due: ")?;
            write_due(f, &deadline)?;
            writeln!(f)?;

            match deadline.urgency {
                Some(Urgency::Overdue) => {
                    writeln!(f)?;
                    writeln!(
                        f,
                        "> **Immediate action required**: This task was due {}. Complete it as soon as possible.",
                        DueDate(&deadline.due)
                    )?;
                }
                Some(Urgency::Approaching) => {
                    writeln!(f)?;
                    writeln!(
                        f,
                        "> **Upcoming deadline**: This task is approaching its deadline within the next 24 hours."
                    )?;
                }
                _ => {}
            }
        }

        if let Some(desc) = &task.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if task.sub_tasks.is_empty() {
            writeln!(f, "\nNo sub-tasks.")?;
        } else {
            writeln!(
                f,
                "\n## Sub-tasks ({}/{}, {}%)",
                task.completed_sub_tasks(),
                task.sub_tasks.len(),
                task.progress_percent()
            )?;
            writeln!(f)?;
            for sub_task in &task.sub_tasks {
                writeln!(f, "{}", SubTaskLine::new(sub_task, self.now))?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TaskCard::new(self, Timestamp::now()))
    }
}

/// One-line markdown list item for a task.
pub struct TaskLine<'a> {
    pub task: &'a Task,
    pub now: Timestamp,
}

impl<'a> TaskLine<'a> {
    pub fn new(task: &'a Task, now: Timestamp) -> Self {
        Self { task, now }
    }
}

impl<'a> fmt::Display for TaskLine<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        let title = if task.completed {
            format!("~~{}~~", task.title)
        } else {
            format!("**{}**", task.title)
        };
        write!(
            f,
            "- {} {title} `{}` {} {}",
            checkbox(task.completed),
            short_id(&task.id),
            task.priority.marker(),
            task.category
        )?;

        if let Some(deadline) = task.deadline(self.now) {
            write!(f, " | due ")?;
            write_due(f, &deadline)?;
            if deadline.is_overdue() {
                write!(f, " *overdue*")?;
            }
        }

        if !task.sub_tasks.is_empty() {
            write!(
                f,
                " | {}/{} sub-tasks",
                task.completed_sub_tasks(),
                task.sub_tasks.len()
            )?;
        }
        Ok(())
    }
}

/// One-line markdown list item for a sub-task.
pub struct SubTaskLine<'a> {
    pub sub_task: &'a SubTask,
    pub now: Timestamp,
}

impl<'a> SubTaskLine<'a> {
    pub fn new(sub_task: &'a SubTask, now: Timestamp) -> Self {
        Self { sub_task, now }
    }
}

impl<'a> fmt::Display for SubTaskLine<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub_task = self.sub_task;
        write!(
            f,
            "- {} {} `{}`",
            checkbox(sub_task.completed),
            sub_task.text,
            short_id(&sub_task.id)
        )?;
        if let Some(priority) = sub_task.priority {
            write!(f, " ({priority})")?;
        }
        if let Some(deadline) = sub_task.deadline(self.now) {
            write!(f, " due ")?;
            write_due(f, &deadline)?;
        }
        Ok(())
    }
}

impl fmt::Display for SubTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SubTaskLine::new(self, Timestamp::now()))
    }
}

impl fmt::Display for TaskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Statistics")?;
        writeln!(f)?;
        writeln!(f, "- Total: {}", self.total)?;
        writeln!(f, "- Completed: {}", self.completed)?;
        writeln!(f, "- Pending: {}", self.pending)?;
        writeln!(f, "- High priority: {}", self.high_priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW_MS: i64 = 1_717_200_000_000;
    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn at(ms: i64) -> Timestamp {
        Timestamp::from_millisecond(ms).unwrap()
    }

    fn task(due_ms: Option<i64>) -> Task {
        Task {
            id: "0123456789abcdef".to_string(),
            title: "Plan trip".to_string(),
            description: Some("Summer holiday".to_string()),
            completed: false,
            priority: Priority::High,
            category: "Travel".to_string(),
            created_at: at(NOW_MS - HOUR_MS),
            due_date: due_ms.map(at),
            sub_tasks: vec![
                SubTask {
                    id: "aaaaaaaa-1".to_string(),
                    text: "Book flight".to_string(),
                    completed: true,
                    priority: Some(Priority::High),
                    due_date: None,
                },
                SubTask {
                    id: "bbbbbbbb-2".to_string(),
                    text: "Pack".to_string(),
                    completed: false,
                    priority: None,
                    due_date: None,
                },
            ],
        }
    }

    #[test]
    fn test_card_shows_overdue_callout() {
        let task = task(Some(NOW_MS - 3 * 24 * HOUR_MS));
        let output = TaskCard::new(&task, at(NOW_MS)).to_string();
        assert!(output.contains("# Plan trip"));
        assert!(output.contains("Overdue by 3 days"));
        assert!(output.contains("Complete it as soon as possible."));
        assert!(output.contains("## Sub-tasks (1/2, 50%)"));
        assert!(output.contains("- [x] Book flight `aaaaaaaa` (high)"));
    }

    #[test]
    fn test_card_shows_approaching_callout() {
        let task = task(Some(NOW_MS + 2 * HOUR_MS));
        let output = TaskCard::new(&task, at(NOW_MS)).to_string();
        assert!(output.contains("Due today"));
        assert!(output.contains("within the next 24 hours"));
    }

    #[test]
    fn test_completed_task_has_no_callout() {
        let mut task = task(Some(NOW_MS - 3 * 24 * HOUR_MS));
        task.completed = true;
        let output = TaskCard::new(&task, at(NOW_MS)).to_string();
        assert!(!output.contains("Complete it as soon as possible"));
        assert!(!output.contains("Overdue by"));
    }

    #[test]
    fn test_task_line() {
        let task = task(Some(NOW_MS - 3 * 24 * HOUR_MS));
        let line = TaskLine::new(&task, at(NOW_MS)).to_string();
        assert!(line.starts_with("- [ ] **Plan trip** `01234567` !!! Travel"));
        assert!(line.contains("*overdue*"));
        assert!(line.ends_with("1/2 sub-tasks"));
    }

    #[test]
    fn test_stats_display() {
        let stats = TaskStats {
            total: 3,
            completed: 1,
            pending: 2,
            high_priority: 1,
        };
        let output = stats.to_string();
        assert!(output.contains("- Pending: 2"));
        assert!(output.contains("- High priority: 1"));
    }
}

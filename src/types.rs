use thiserror::Error;

pub const DONE_MARKER: &str = " [DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    pub fn parse_line(line: &str) -> Self {
        match line.strip_suffix(DONE_MARKER) {
            Some(text) => Self {
                text: text.to_string(),
                done: true,
            },
            None => Self {
                text: line.to_string(),
                done: false,
            },
        }
    }

    pub fn to_line(&self) -> String {
        if self.done {
            format!("{}{DONE_MARKER}", self.text)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    Completed,
    AlreadyComplete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task number {0} is out of range")]
    OutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_splits_marker_from_text() {
        let task = Task::parse_line("Walk dog [DONE]");
        assert_eq!(task.text, "Walk dog");
        assert!(task.done);

        let task = Task::parse_line("Walk dog");
        assert_eq!(task.text, "Walk dog");
        assert!(!task.done);
    }

    #[test]
    fn parse_line_strips_one_marker_only() {
        let task = Task::parse_line("Walk dog [DONE] [DONE]");
        assert_eq!(task.text, "Walk dog [DONE]");
        assert!(task.done);
    }

    #[test]
    fn to_line_round_trips_completed_task() {
        let task = Task::parse_line("Buy milk [DONE]");
        assert_eq!(task.to_line(), "Buy milk [DONE]");
    }
}

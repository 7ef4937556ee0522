use crate::types::{CompleteOutcome, StoreError, Task};
use crate::utils::ensure_dir;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, text: impl Into<String>) {
        self.tasks.push(Task::new(text));
    }

    pub fn list_all(&self) -> Option<impl Iterator<Item = (usize, &Task)> + '_> {
        if self.tasks.is_empty() {
            return None;
        }
        Some(
            self.tasks
                .iter()
                .enumerate()
                .map(|(index, task)| (index + 1, task)),
        )
    }

    pub fn complete(&mut self, position: i64) -> Result<CompleteOutcome, StoreError> {
        let index = self.index_of(position)?;
        let task = &mut self.tasks[index];
        if task.done {
            Ok(CompleteOutcome::AlreadyComplete)
        } else {
            task.done = true;
            Ok(CompleteOutcome::Completed)
        }
    }

    pub fn delete(&mut self, position: i64) -> Result<String, StoreError> {
        let index = self.index_of(position)?;
        let removed = self.tasks.remove(index);
        Ok(removed.text)
    }

    pub fn load_from(&mut self, reader: impl BufRead) -> io::Result<()> {
        let mut tasks = Vec::new();
        for line in reader.lines() {
            tasks.push(Task::parse_line(&line?));
        }
        self.tasks = tasks;
        Ok(())
    }

    pub fn save_to(&self, mut writer: impl Write) -> io::Result<()> {
        for task in &self.tasks {
            writer.write_all(task.to_line().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    pub fn load_path(&mut self, path: &Path) -> io::Result<()> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.tasks.clear();
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        self.tasks = raw.lines().map(Task::parse_line).collect();
        Ok(())
    }

    pub fn save_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let mut buffer = String::new();
        for task in &self.tasks {
            buffer.push_str(&task.to_line());
            buffer.push('\n');
        }
        fs::write(path, buffer)
    }

    fn index_of(&self, position: i64) -> Result<usize, StoreError> {
        if position < 1 || position as usize > self.tasks.len() {
            return Err(StoreError::OutOfRange(position));
        }
        Ok(position as usize - 1)
    }
}

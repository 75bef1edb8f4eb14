use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schedule::StoreError;
use crate::storage::{KeyValueStorage, TASKS_KEY, read_json_or_default, write_json};
use crate::validation::{ValidationError, validate_task_text};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Task {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

pub struct TaskList<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskList<S> {
    pub fn load(storage: S) -> Self {
        let tasks = read_json_or_default(&storage, TASKS_KEY);
        Self { storage, tasks }
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, text: &str) -> Result<&Task, ValidationError> {
        let text = validate_task_text(text)?;
        let task = Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
        };
        info!(id = %task.id, "adding task");
        self.tasks.push(task);
        self.persist();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn toggle(&mut self, id: Uuid) -> Result<&Task, StoreError> {
        let index = self.position(id)?;
        self.tasks[index].completed = !self.tasks[index].completed;
        self.persist();
        Ok(&self.tasks[index])
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        info!(id = %removed.id, "deleted task");
        self.persist();
        Ok(removed)
    }

    fn position(&self, id: Uuid) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn persist(&self) {
        write_json(&self.storage, TASKS_KEY, &self.tasks);
    }
}

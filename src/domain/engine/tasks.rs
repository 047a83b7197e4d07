use crate::domain::engine::PomodoroEngine;
use crate::domain::entity::{RecordId, Task};
use crate::domain::repository::StoreKey;

impl PomodoroEngine {
    /// Append a task. Blank text is ignored.
    ///
    /// Returns the id of the new task.
    pub fn add_task(&mut self, text: &str) -> Option<RecordId> {
        let task = match Task::try_new(text, self.clock.now()) {
            Ok(task) => task,
            Err(err) => {
                tracing::debug!(%err, "ignoring task");
                return None;
            }
        };

        let id = task.id().clone();
        self.tasks.push(task);
        self.save_tasks();
        Some(id)
    }

    /// Flip the completion flag of the task with `id`.
    pub fn toggle_task(&mut self, id: &RecordId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.toggle();
        }
        self.save_tasks();
    }

    pub fn delete_task(&mut self, id: &RecordId) {
        self.tasks.retain(|task| task.id() != id);
        self.save_tasks();
    }

    /// Drop every completed task, keeping the order of the others.
    pub fn clear_completed_tasks(&mut self) {
        self.tasks.retain(|task| !task.is_completed());
        self.save_tasks();
    }

    /// Replace the scratchpad wholesale.
    pub fn update_notes(&mut self, text: String) {
        self.notes = text;
        self.persisted.save(StoreKey::Notes, &self.notes);
    }

    fn save_tasks(&self) {
        self.persisted.save(StoreKey::Tasks, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::engine::testing::*;
    use crate::domain::entity::{RecordId, Task};
    use crate::domain::repository::StoreKey;

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(Task::text).collect()
    }

    #[test]
    fn add_task_trims_and_ignores_blank() {
        let Fixture {
            mut engine, store, ..
        } = fixture();

        assert_eq!(engine.add_task(""), None);
        assert_eq!(engine.add_task("   "), None);
        assert!(engine.tasks().is_empty());
        assert_eq!(store.get(StoreKey::Tasks), None);

        let id = engine.add_task(" hi ").unwrap();
        assert_eq!(texts(engine.tasks()), vec!["hi"]);
        assert_eq!(engine.tasks()[0].id(), &id);
        assert!(!engine.tasks()[0].is_completed());

        engine.add_task("second");
        assert_eq!(texts(engine.tasks()), vec!["hi", "second"]);

        let stored: Vec<Task> = serde_json::from_str(&store.get(StoreKey::Tasks).unwrap()).unwrap();
        assert_eq!(stored, engine.tasks());
    }

    #[test]
    fn toggle_task() {
        let Fixture { mut engine, .. } = fixture();
        let a = engine.add_task("a").unwrap();
        let b = engine.add_task("b").unwrap();

        engine.toggle_task(&b);
        assert!(!engine.tasks()[0].is_completed());
        assert!(engine.tasks()[1].is_completed());

        engine.toggle_task(&b);
        assert!(!engine.tasks()[1].is_completed());

        engine.toggle_task(&RecordId::from("missing"));
        assert_eq!(texts(engine.tasks()), vec!["a", "b"]);
        assert!(engine.tasks().iter().all(|task| !task.is_completed()));

        engine.toggle_task(&a);
        assert!(engine.tasks()[0].is_completed());
    }

    #[test]
    fn delete_task() {
        let Fixture {
            mut engine, store, ..
        } = fixture();
        let a = engine.add_task("a").unwrap();
        engine.add_task("b");

        engine.delete_task(&RecordId::from("missing"));
        assert_eq!(texts(engine.tasks()), vec!["a", "b"]);

        engine.delete_task(&a);
        assert_eq!(texts(engine.tasks()), vec!["b"]);

        let stored: Vec<Task> = serde_json::from_str(&store.get(StoreKey::Tasks).unwrap()).unwrap();
        assert_eq!(texts(&stored), vec!["b"]);
    }

    #[test]
    fn clear_completed_tasks_keeps_order() {
        let Fixture { mut engine, .. } = fixture();
        let ids: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .filter_map(|text| engine.add_task(text))
            .collect();
        engine.toggle_task(&ids[1]);
        engine.toggle_task(&ids[3]);

        engine.clear_completed_tasks();
        assert_eq!(texts(engine.tasks()), vec!["a", "c", "e"]);
    }

    #[test]
    fn update_notes() {
        let Fixture {
            mut engine, store, ..
        } = fixture();

        engine.update_notes("call back\nbuy coffee".into());
        assert_eq!(engine.notes(), "call back\nbuy coffee");
        assert_eq!(
            store.get(StoreKey::Notes).as_deref(),
            Some(r#""call back\nbuy coffee""#)
        );

        engine.update_notes(String::new());
        assert_eq!(engine.notes(), "");
        assert_eq!(store.get(StoreKey::Notes).as_deref(), Some(r#""""#));
    }

    #[test]
    fn tasks_survive_reload() {
        let Fixture {
            mut engine, store, ..
        } = fixture();
        engine.add_task("persist me");
        engine.update_notes("and me".into());

        let Fixture { engine: reloaded, .. } = fixture_with(store);
        assert_eq!(texts(reloaded.tasks()), vec!["persist me"]);
        assert_eq!(reloaded.notes(), "and me");
    }
}

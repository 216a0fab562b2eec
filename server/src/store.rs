//! In-memory todo store.
//!
//! One mutex guards the record list and the id counter together, so every
//! operation is a single critical section: scan, mutate, clone the result,
//! release. Nothing awaits while the lock is held.

use chrono::Utc;
use parking_lot::Mutex;

use crate::model::{Todo, TodoInput};

#[derive(Debug)]
struct State {
    /// Insertion order.
    todos: Vec<Todo>,
    /// Never decremented; ids are not reused after deletion.
    next_id: u64,
}

#[derive(Debug)]
pub struct Store {
    state: Mutex<State>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Snapshot of every record in insertion order.
    pub fn list_all(&self) -> Vec<Todo> {
        self.state.lock().todos.clone()
    }

    pub fn get(&self, id: u64) -> Option<Todo> {
        let state = self.state.lock();
        state.todos.iter().find(|todo| todo.id == id).cloned()
    }

    pub fn create(&self, input: TodoInput) -> Todo {
        let mut state = self.state.lock();
        let todo = Todo {
            id: state.next_id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: Utc::now(),
        };
        state.next_id += 1;
        state.todos.push(todo.clone());
        todo
    }

    /// Replace every mutable field of `id`. `created_at` is reset to now.
    /// Returns `None` without creating anything when `id` is unknown.
    pub fn update(&self, id: u64, input: TodoInput) -> Option<Todo> {
        let mut state = self.state.lock();
        let todo = state.todos.iter_mut().find(|todo| todo.id == id)?;
        todo.title = input.title;
        todo.description = input.description;
        todo.completed = input.completed;
        todo.created_at = Utc::now();
        Some(todo.clone())
    }

    pub fn delete(&self, id: u64) -> bool {
        let mut state = self.state.lock();
        let before = state.todos.len();
        state.todos.retain(|todo| todo.id != id);
        state.todos.len() < before
    }

    pub fn len(&self) -> usize {
        self.state.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn input(title: &str) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: None,
            completed: false,
        }
    }

    #[test]
    fn ids_start_at_one_and_are_never_reused() {
        let store = Store::new();
        assert_eq!(store.create(input("a")).id, 1);
        assert_eq!(store.create(input("b")).id, 2);
        assert!(store.delete(2));
        assert!(store.delete(1));
        assert!(store.is_empty());
        assert_eq!(store.create(input("c")).id, 3);
    }

    #[test]
    fn get_returns_what_create_stored() {
        let store = Store::new();
        let created = store.create(TodoInput {
            title: "A".to_string(),
            description: Some("d".to_string()),
            completed: false,
        });
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert!(store.get(created.id + 1).is_none());
    }

    #[test]
    fn update_replaces_all_fields_and_resets_timestamp() {
        let store = Store::new();
        let created = store.create(TodoInput {
            title: "A".to_string(),
            description: Some("d".to_string()),
            completed: true,
        });
        let updated = store.update(created.id, input("B")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "B");
        assert!(updated.description.is_none());
        assert!(!updated.completed);
        assert!(updated.created_at >= created.created_at);
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn update_unknown_id_creates_nothing() {
        let store = Store::new();
        assert!(store.update(42, input("ghost")).is_none());
        assert!(store.is_empty());
        assert_eq!(store.create(input("real")).id, 1);
    }

    #[test]
    fn delete_is_terminal_and_preserves_order() {
        let store = Store::new();
        for title in ["a", "b", "c", "d"] {
            store.create(input(title));
        }
        assert!(store.delete(2));
        assert!(!store.delete(2));
        assert!(store.get(2).is_none());

        let ids: Vec<u64> = store.list_all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn snapshot_is_independent_of_store() {
        let store = Store::new();
        store.create(input("a"));

        let mut snapshot = store.list_all();
        snapshot[0].title = "mutated".to_string();
        snapshot.clear();
        assert_eq!(store.get(1).unwrap().title, "a");

        let snapshot = store.list_all();
        store.create(input("b"));
        store.update(1, input("changed"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "a");
    }

    #[test]
    fn concurrent_creates_get_distinct_contiguous_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let store = Arc::new(Store::new());
        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        store.create(input(&format!("{t}-{i}")));
                    }
                });
            }
        });

        let todos = store.list_all();
        assert_eq!(todos.len(), THREADS * PER_THREAD);
        let ids: HashSet<u64> = todos.iter().map(|t| t.id).collect();
        let expected: HashSet<u64> = (1..=(THREADS * PER_THREAD) as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn concurrent_mixed_operations_stay_consistent() {
        let store = Arc::new(Store::new());
        for i in 0..100 {
            store.create(input(&i.to_string()));
        }

        std::thread::scope(|scope| {
            let deleter = Arc::clone(&store);
            scope.spawn(move || {
                for id in (2..=100).step_by(2) {
                    assert!(deleter.delete(id));
                }
            });
            let creator = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..50 {
                    creator.create(input(&format!("new-{i}")));
                }
            });
            let reader = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..50 {
                    let ids: Vec<u64> = reader.list_all().iter().map(|t| t.id).collect();
                    assert!(ids.windows(2).all(|w| w[0] < w[1]));
                }
            });
        });

        let ids: Vec<u64> = store.list_all().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.create(input("last")).id, 151);
    }
}

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::controller::ActionController;

/// Per-row controllers for a list of action controls.
///
/// Rows keep their controller across re-renders; a row that disappears
/// after a refetch has its controller torn down so a late result cannot
/// land on whichever row takes its place.
#[derive(Debug)]
pub struct ControllerArena<K> {
    controllers: HashMap<K, ActionController>,
}

impl<K> Default for ControllerArena<K> {
    fn default() -> Self {
        Self {
            controllers: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> ControllerArena<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller for `key`, created on first use.
    pub fn controller(&mut self, key: &K) -> ActionController {
        self.controllers.entry(key.clone()).or_default().clone()
    }

    pub fn get(&self, key: &K) -> Option<&ActionController> {
        self.controllers.get(key)
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.controllers.get(key).is_some_and(ActionController::is_busy)
    }

    pub fn any_busy(&self) -> bool {
        self.controllers.values().any(ActionController::is_busy)
    }

    /// Keeps controllers whose key is in `keys` and tears down the rest.
    pub fn retain<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let live: HashSet<&K> = keys.into_iter().collect();
        self.controllers.retain(|key, controller| {
            let keep = live.contains(key);
            if !keep {
                controller.teardown();
            }
            keep
        });
    }

    /// Tears down every controller; called when the owning view closes.
    pub fn teardown_all(&mut self) {
        for (_, controller) in self.controllers.drain() {
            controller.teardown();
        }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

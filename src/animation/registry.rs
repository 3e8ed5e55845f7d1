use std::fmt;

use crate::scene::SceneGraph;

/// A per-frame callback: receives the current time and the scene to mutate
pub type AnimationFn = Box<dyn FnMut(f32, &mut SceneGraph)>;

/// Handle returned by [`AnimationRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

pub struct AnimationEntry {
    id: AnimationId,
    callback: AnimationFn,
}

impl AnimationEntry {
    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn invoke(&mut self, time: f32, graph: &mut SceneGraph) {
        (self.callback)(time, graph)
    }
}

impl fmt::Debug for AnimationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEntry").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Ordered list of per-frame callbacks
///
/// Entries run in registration order and are never skipped. Handles are never
/// reused, even across [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    entries: Vec<AnimationEntry>,
    next_id: u64,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback and returns its handle
    pub fn register<F>(&mut self, callback: F) -> AnimationId
    where
        F: FnMut(f32, &mut SceneGraph) + 'static,
    {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.entries.push(AnimationEntry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Current entries in registration order
    pub fn list_all(&self) -> &[AnimationEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.entries.iter().map(AnimationEntry::id)
    }

    /// Calls every entry once, in registration order
    pub fn invoke_all(&mut self, time: f32, graph: &mut SceneGraph) {
        for entry in &mut self.entries {
            entry.invoke(time, graph);
        }
    }

    /// Removes the most recently added entry with this handle
    ///
    /// Returns `false` if no entry matched.
    pub fn unregister(&mut self, id: AnimationId) -> bool {
        match self.entries.iter().rposition(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every entry
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

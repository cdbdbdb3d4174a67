use crate::host::{Builder, Config};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Typed values extensions prepare once per build and read from node handlers.
#[derive(Default)]
pub struct BuildState {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

impl BuildState {
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        self.entries
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }
}

/// What a build-start hook gets to see and change.
pub struct BuildStart<'a> {
    pub config: &'a Config,
    pub builder: &'a Builder,
    pub state: &'a mut BuildState,
    pub(crate) script_files: &'a mut Vec<String>,
}

impl BuildStart<'_> {
    /// Adds a script every generated HTML page loads.
    pub fn add_script_file(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.script_files.contains(&path) {
            self.script_files.push(path);
        }
    }
}

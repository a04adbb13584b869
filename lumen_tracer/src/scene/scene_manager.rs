//! Central scene manager for the engine.
//!
//! Owns the named scenes. Each scene is shared as `Arc<Mutex<Scene>>` so it
//! can be populated and finalized from any thread holding a handle.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::config::AccelConfig;
use crate::error::{Error, Result};
use super::scene::Scene;

pub struct SceneManager {
    /// Scenes by name
    scenes: FxHashMap<String, Arc<Mutex<Scene>>>,
}

impl SceneManager {
    /// Create a new empty scene manager
    pub fn new() -> Self {
        Self {
            scenes: FxHashMap::default(),
        }
    }

    /// Create a scene with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` if a scene with this name already exists.
    pub fn create_scene(&mut self, name: &str) -> Result<Arc<Mutex<Scene>>> {
        self.create_scene_with_config(name, AccelConfig::default())
    }

    /// Create a scene with an explicit configuration
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if a scene with this name already exists
    /// - `InitializationFailed` if `config` does not validate
    pub fn create_scene_with_config(
        &mut self,
        name: &str,
        config: AccelConfig,
    ) -> Result<Arc<Mutex<Scene>>> {
        if self.scenes.contains_key(name) {
            crate::engine_error!("lumen::SceneManager", "Scene '{}' already exists", name);
            return Err(Error::InvalidResource(format!("Scene '{}' already exists", name)));
        }

        let scene = Arc::new(Mutex::new(Scene::new(config)?));
        self.scenes.insert(name.to_string(), Arc::clone(&scene));

        crate::engine_debug!("lumen::SceneManager", "Scene '{}' created", name);

        Ok(scene)
    }

    /// Get a scene by name
    pub fn scene(&self, name: &str) -> Option<Arc<Mutex<Scene>>> {
        self.scenes.get(name).cloned()
    }

    /// Remove a scene, returning it if it existed
    ///
    /// Outstanding handles keep the scene (and its uploaded buffers) alive.
    pub fn remove_scene(&mut self, name: &str) -> Option<Arc<Mutex<Scene>>> {
        self.scenes.remove(name)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Names of all scenes (unordered)
    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.keys().map(String::as_str).collect()
    }

    /// Remove all scenes
    pub fn clear(&mut self) {
        self.scenes.clear();
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

use super::ChartPluginInfo;

/// Registry of chart plugins keyed by plugin id, in registration order.
pub struct ChartPluginManager<P: ?Sized> {
    plugins: IndexMap<String, Arc<P>>,
}

impl<P: ?Sized + ChartPluginInfo> ChartPluginManager<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: IndexMap::new(),
        }
    }

    /// Registers `plugin`; ids must be unique.
    pub fn register(&mut self, plugin: Arc<P>) -> RenderResult<()> {
        let id = plugin.id().to_owned();
        if self.plugins.contains_key(&id) {
            return Err(RenderError::DuplicatePlugin(id));
        }
        debug!(chart_plugin_id = %id, "register chart plugin");
        self.plugins.insert(id, plugin);
        Ok(())
    }

    /// Removes a plugin, returning it if it was registered.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<P>> {
        let removed = self.plugins.shift_remove(id);
        if removed.is_some() {
            debug!(chart_plugin_id = id, "unregister chart plugin");
        }
        removed
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<P>> {
        self.plugins.get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<P: ?Sized + ChartPluginInfo> Default for ChartPluginManager<P> {
    fn default() -> Self {
        Self::new()
    }
}

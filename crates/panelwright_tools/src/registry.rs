//! Name-indexed tool lookup.

use panelwright_interface::{ComicTool, ToolDefinition};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of tools addressable by function-call name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ComicTool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name.
    pub fn register(&mut self, tool: Arc<dyn ComicTool>) {
        self.tools.insert(tool.definition().name, tool);
    }

    /// Tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ComicTool>> {
        self.tools.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Declarations of every tool, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|tool| tool.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Dispatch a function call. Unknown names produce a failure record.
    #[tracing::instrument(skip(self, args))]
    pub async fn call(&self, name: &str, args: Value) -> Value {
        match self.get(name) {
            Some(tool) => tool.call(args).await,
            None => {
                tracing::warn!("Unknown tool");
                json!({
                    "success": false,
                    "message": format!("Unknown tool: {}", name),
                    "error": format!("Unknown tool: {}", name),
                })
            }
        }
    }
}

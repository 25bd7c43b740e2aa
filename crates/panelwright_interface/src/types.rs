//! Supporting types for tool declarations.

use serde::{Deserialize, Serialize};

/// Declaration of a tool as advertised to a model.
///
/// # Examples
///
/// ```
/// use panelwright_interface::ToolDefinition;
/// use serde_json::json;
///
/// let definition = ToolDefinition {
///     name: "generate_comic_image".to_string(),
///     description: "Draw one comic panel".to_string(),
///     parameters: json!({"type": "object"}),
/// };
/// assert_eq!(serde_json::to_value(&definition).unwrap()["name"], "generate_comic_image");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name used in function calls
    pub name: String,
    /// What the tool does
    pub description: String,
    /// JSON schema of the arguments
    pub parameters: serde_json::Value,
}

//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a conversation.
///
/// # Examples
///
/// ```
/// use panelwright_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// The parent chatting with the agent
    User,
    /// The model
    Assistant,
}

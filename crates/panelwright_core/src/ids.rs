//! Identifier generation for sessions, users and comics.

fn random_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// A new session id: `session_{millis}_{9 random chars}`.
///
/// # Examples
///
/// ```
/// let id = panelwright_core::generate_session_id();
/// assert!(id.starts_with("session_"));
/// assert_eq!(id.rsplit('_').next().unwrap().len(), 9);
/// ```
pub fn generate_session_id() -> String {
    format!(
        "session_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        random_suffix()
    )
}

/// A new anonymous user id: `user_{9 random chars}`.
pub fn generate_user_id() -> String {
    format!("user_{}", random_suffix())
}

/// A new comic id: `comic_{millis}`.
pub fn generate_comic_id() -> String {
    format!("comic_{}", chrono::Utc::now().timestamp_millis())
}

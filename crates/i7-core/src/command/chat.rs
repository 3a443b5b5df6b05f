use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Sender of a chat command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub name: String,
    pub is_mod: bool,
    /// The operator's own account
    pub is_me: bool,
    pub is_broadcaster: bool,
}

impl ChatUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether paid commands are free for this user
    pub fn can_override_cost(&self, allow_mod_override: bool) -> bool {
        self.is_broadcaster || self.is_me || (allow_mod_override && self.is_mod)
    }
}

/// One parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub user: ChatUser,
    pub channel: String,
    pub arguments: Vec<String>,
}

impl CommandRequest {
    pub fn new(user: ChatUser, channel: impl Into<String>, arguments: &[&str]) -> Self {
        Self {
            user,
            channel: channel.into(),
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Where command replies go
pub trait ChatOutput {
    fn send_message(&self, channel: &str, message: &str);
}

impl<T: ChatOutput + ?Sized> ChatOutput for &T {
    fn send_message(&self, channel: &str, message: &str) {
        (**self).send_message(channel, message)
    }
}

impl<T: ChatOutput + ?Sized> ChatOutput for Arc<T> {
    fn send_message(&self, channel: &str, message: &str) {
        (**self).send_message(channel, message)
    }
}

/// Writes replies to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOutput;

impl ChatOutput for LogOutput {
    fn send_message(&self, channel: &str, message: &str) {
        info!("[{}] {}", channel, message);
    }
}

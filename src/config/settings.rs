use serde::Deserialize;

use crate::classifier::sender::DEFAULT_SENDER_FRAGMENTS;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub classifier: ClassifierSettings,
    pub logging: LoggingSettings,
}

/// Address the WebSocket host binds to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Sender fragments that mark a message as a bank notification.
///
/// Matching is case-insensitive substring containment on the sender.
#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierSettings {
    pub sender_fragments: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub classifier: Option<PartialClassifierSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialClassifierSettings {
    pub sender_fragments: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            classifier: ClassifierSettings {
                sender_fragments: DEFAULT_SENDER_FRAGMENTS
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

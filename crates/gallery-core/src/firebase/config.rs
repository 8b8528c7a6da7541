//! Firebase Project Settings

use serde::{Deserialize, Serialize};

const STORAGE_ENDPOINT: &str = "https://firebasestorage.googleapis.com";
const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";

/// The subset of the web app config the REST clients need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub storage_bucket: String,
    #[serde(default = "default_database")]
    pub database_id: String,
    /// Overrides for the local emulator suite
    #[serde(default)]
    pub storage_endpoint: Option<String>,
    #[serde(default)]
    pub firestore_endpoint: Option<String>,
}

fn default_database() -> String {
    "(default)".to_string()
}

impl FirebaseConfig {
    pub fn storage_endpoint(&self) -> &str {
        self.storage_endpoint
            .as_deref()
            .unwrap_or(STORAGE_ENDPOINT)
            .trim_end_matches('/')
    }

    pub fn firestore_endpoint(&self) -> &str {
        self.firestore_endpoint
            .as_deref()
            .unwrap_or(FIRESTORE_ENDPOINT)
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_config_shape() {
        let config: FirebaseConfig = serde_json::from_str(
            r#"{"apiKey":"k","projectId":"demo","storageBucket":"demo.appspot.com","authDomain":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(config.database_id, "(default)");
        assert_eq!(config.storage_endpoint(), "https://firebasestorage.googleapis.com");
    }

    #[test]
    fn test_emulator_endpoint_override() {
        let config: FirebaseConfig = serde_json::from_str(
            r#"{"apiKey":"k","projectId":"demo","storageBucket":"b","firestoreEndpoint":"http://localhost:8080/"}"#,
        )
        .unwrap();
        assert_eq!(config.firestore_endpoint(), "http://localhost:8080");
    }
}

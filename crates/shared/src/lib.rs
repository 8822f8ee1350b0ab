pub mod coaching;
pub mod error;
pub mod project;
pub mod view;

pub use coaching::{Feedback, FeedbackRecord};
pub use error::{GatewayError, ValidationError};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use view::View;

pub mod settings {
    use serde::{Deserialize, Serialize};

    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
    pub const DEFAULT_PERSONA: &str = "Doctor Strange";

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
    pub struct ProviderAuth {
        pub api_key: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct OracleSettings {
        pub model: String, // e.g., "gemini-3-flash-preview"
        #[serde(default)]
        pub auth: ProviderAuth,
        /// Overrides the public generative-language endpoint (proxies, tests)
        #[serde(default)]
        pub base_url: Option<String>,
        /// No local timeout unless set; the transport default applies
        #[serde(default)]
        pub request_timeout_secs: Option<u64>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AppSettings {
        pub oracle: OracleSettings,
        #[serde(default = "default_persona")]
        pub persona_name: String,
    }

    fn default_persona() -> String {
        DEFAULT_PERSONA.to_string()
    }

    impl Default for OracleSettings {
        fn default() -> Self {
            Self {
                model: DEFAULT_MODEL.into(),
                auth: ProviderAuth::default(),
                base_url: None,
                request_timeout_secs: None,
            }
        }
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                oracle: OracleSettings::default(),
                persona_name: default_persona(),
            }
        }
    }
}

pub mod agent_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        User,
        Assistant,
    }

    /// One entry of the coaching transcript
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub role: Role,
        pub text: String,
    }

    impl ChatMessage {
        pub fn user(text: impl Into<String>) -> Self {
            Self {
                role: Role::User,
                text: text.into(),
            }
        }

        pub fn assistant(text: impl Into<String>) -> Self {
            Self {
                role: Role::Assistant,
                text: text.into(),
            }
        }

        pub fn is_user(&self) -> bool {
            self.role == Role::User
        }
    }
}

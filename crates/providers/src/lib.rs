pub mod gateway;
pub mod gemini;
pub mod oracle;
pub mod prompts;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use gateway::AiGateway;
pub use gemini::GeminiClient;
pub use oracle::{Oracle, OracleRequest};

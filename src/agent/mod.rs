pub mod definitions;
mod runner;

pub use definitions::{AgentDefinition, FLASHCARD_AGENT, QUIZ_AGENT, ROOT_AGENT};
pub use runner::{AgentEvent, EventContent, MaterialKind, Part, Runner};

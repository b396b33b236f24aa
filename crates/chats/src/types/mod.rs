//! Chat request bodies, summaries and errors.

pub mod conversation;
pub mod errors;
pub mod requests;

pub use conversation::{aggregate_conversations, ConversationSummary};
pub use errors::{ChatError, ChatResult};
pub use requests::{MarkReadRequest, SendMessageRequest};

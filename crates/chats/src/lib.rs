//! # Nutri Chats Crate
//!
//! Chat logic between users and nutritionists: the canonical pair key that
//! names both conversations and relay rooms, conversation summaries with
//! unread counts, and the message service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nutri_chats::MessageService;
//!
//! let service = MessageService::new(messages, users);
//! let summaries = service.conversations(&user_id).await?;
//! ```

pub mod services;
pub mod types;
pub mod utils;

pub use services::MessageService;
pub use types::{
    aggregate_conversations, ChatError, ChatResult, ConversationSummary, MarkReadRequest,
    SendMessageRequest,
};
pub use utils::canonical_pair_key;

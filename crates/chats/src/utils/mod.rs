//! Internal helpers shared by the chat services and the relay.

pub mod pairing;

pub use pairing::canonical_pair_key;

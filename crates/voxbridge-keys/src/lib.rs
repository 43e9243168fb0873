//! Voice-AI credential selection.
//!
//! Credentials are discovered once at startup as named slots
//! (`ULTRAVOX_API_KEY_1`, `ULTRAVOX_API_KEY_2`, ...) and held in an
//! immutable [`KeyPool`]. Each outbound request draws one slot uniformly at
//! random, which spreads load across provider accounts without any shared
//! cursor.
//!
//! # Usage
//!
//! ```rust
//! use voxbridge_keys::KeyPool;
//!
//! let pool = KeyPool::discover([
//!     ("ULTRAVOX_API_KEY_1", "key-one"),
//!     ("ULTRAVOX_API_KEY_2", "key-two"),
//!     ("HOME", "/root"),
//! ]);
//! assert_eq!(pool.len(), 2);
//!
//! let chosen = pool.select_key_info().unwrap();
//! assert!(chosen.key_name.starts_with("ULTRAVOX_API_KEY_"));
//! ```

mod error;
mod pool;

pub use error::KeyError;
pub use pool::{pick, slot_id, CredentialSlot, KeyPool, SelectedKey, SLOT_PREFIX};

use crate::error::KeyError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Name prefix shared by every credential slot, e.g. `ULTRAVOX_API_KEY_3`.
pub const SLOT_PREFIX: &str = "ULTRAVOX_API_KEY_";

/// One configured voice-AI credential.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSlot {
    name: String,
    secret: String,
}

impl CredentialSlot {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// The configuration name of the slot.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The numeric id encoded in the slot name, if any.
    pub fn id(&self) -> Option<&str> {
        slot_id(&self.name)
    }
}

impl fmt::Debug for CredentialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSlot")
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Extracts the id from a slot name of the form `ULTRAVOX_API_KEY_<digits>`.
///
/// Only the leading run of ASCII digits after the prefix is taken, so
/// `ULTRAVOX_API_KEY_12b` yields `12`. Returns `None` when the prefix is
/// missing or no digit follows it.
pub fn slot_id(name: &str) -> Option<&str> {
    let rest = name.strip_prefix(SLOT_PREFIX)?;
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}

/// A credential chosen for one outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedKey {
    pub api_key: String,
    pub key_name: String,
}

impl fmt::Debug for SelectedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedKey")
            .field("api_key", &"[REDACTED]")
            .field("key_name", &self.key_name)
            .finish()
    }
}

/// Picks one slot uniformly at random from `slots`.
///
/// # Errors
///
/// Returns [`KeyError::NoCredentialsConfigured`] for an empty list and
/// [`KeyError::UndefinedSlotValue`] if the chosen slot has an empty secret.
pub fn pick<'a, R: Rng + ?Sized>(
    slots: &'a [CredentialSlot],
    rng: &mut R,
) -> Result<&'a CredentialSlot, KeyError> {
    let slot = slots.choose(rng).ok_or_else(|| {
        tracing::error!("no voice-AI API keys found in configuration");
        KeyError::NoCredentialsConfigured
    })?;

    if slot.secret.is_empty() {
        tracing::error!(slot = %slot.name, "selected API key is undefined");
        return Err(KeyError::UndefinedSlotValue(slot.name.clone()));
    }

    Ok(slot)
}

/// The immutable set of credentials loaded at startup.
///
/// Every selection is an independent uniform draw; there is no cursor to
/// share, so a pool can be read from any number of tasks at once.
#[derive(Debug, Clone, Default)]
pub struct KeyPool {
    slots: Vec<CredentialSlot>,
}

impl KeyPool {
    pub fn new(slots: Vec<CredentialSlot>) -> Self {
        Self { slots }
    }

    /// Collects every `ULTRAVOX_API_KEY_*` entry from `vars`.
    ///
    /// Slots are ordered by name so the pool is the same regardless of the
    /// iteration order of the source. A later duplicate name replaces an
    /// earlier one.
    pub fn discover<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut found = std::collections::BTreeMap::new();
        for (name, value) in vars {
            let name = name.into();
            if name.starts_with(SLOT_PREFIX) {
                found.insert(name, value.into());
            }
        }
        Self {
            slots: found
                .into_iter()
                .map(|(name, secret)| CredentialSlot::new(name, secret))
                .collect(),
        }
    }

    pub fn slots(&self) -> &[CredentialSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the secret of a randomly chosen slot.
    pub fn select_key(&self) -> Result<String, KeyError> {
        pick(&self.slots, &mut rand::thread_rng()).map(|slot| slot.secret.clone())
    }

    /// Returns the secret and slot name of a randomly chosen slot.
    pub fn select_key_info(&self) -> Result<SelectedKey, KeyError> {
        pick(&self.slots, &mut rand::thread_rng()).map(|slot| SelectedKey {
            api_key: slot.secret.clone(),
            key_name: slot.name.clone(),
        })
    }
}

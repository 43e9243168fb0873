use std::collections::HashMap;

/// Name prefix of per-slot corpus overrides, e.g. `ULTRAVOX_CORPUS_ID_3`.
pub const CORPUS_OVERRIDE_PREFIX: &str = "ULTRAVOX_CORPUS_ID_";

/// Corpus served by each credential slot when no override is configured.
const DEFAULT_CORPUS_IDS: [(&str, &str); 5] = [
    ("1", "79d9879b-c52a-4842-b717-1261058a6a89"),
    ("2", "9a6a4d53-458f-401d-9f85-534f8c5f5efa"),
    ("3", "e8f3884b-7b58-4fd4-8a46-f49d140e7fc3"),
    ("4", "b836266d-9c04-4ecc-b57d-290126715eee"),
    ("5", "cca23fbd-7216-47cf-8d76-d271fcac19a0"),
];

/// Maps a credential slot id to the corpus its sessions should query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMapping {
    overrides: HashMap<String, String>,
    defaults: HashMap<String, String>,
}

impl Default for ResourceMapping {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl ResourceMapping {
    /// Builds a mapping over the built-in table with the given overrides.
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self::with_defaults(
            DEFAULT_CORPUS_IDS
                .iter()
                .map(|(id, corpus)| (id.to_string(), corpus.to_string()))
                .collect(),
            overrides,
        )
    }

    /// Builds a mapping over an explicit default table.
    pub fn with_defaults(
        defaults: HashMap<String, String>,
        overrides: HashMap<String, String>,
    ) -> Self {
        Self {
            overrides,
            defaults,
        }
    }

    /// Resolves the corpus for `slot_id`.
    ///
    /// An override wins over the built-in table. Empty strings in either
    /// table count as absent.
    pub fn resolve(&self, slot_id: &str) -> Option<&str> {
        fn non_empty(value: &String) -> Option<&str> {
            (!value.is_empty()).then_some(value.as_str())
        }
        self.overrides
            .get(slot_id)
            .and_then(non_empty)
            .or_else(|| self.defaults.get(slot_id).and_then(non_empty))
    }
}

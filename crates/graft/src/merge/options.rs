/// Policy knobs for a merge call.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// When set, client-supplied primary keys never redirect a merge onto an
    /// existing row outside the target collection; unmatched rows always
    /// become new objects. Defaults to `true`.
    pub tamper_protection: bool,

    /// When set, collection members absent from the payload are deleted from
    /// the store instead of merely unlinked. Defaults to `false`.
    pub force_delete: bool,

    /// What to do with payload keys that name no field on the target model.
    /// Defaults to [`UnknownKeys::Discard`].
    pub unknown_keys: UnknownKeys,
}

/// Handling of payload keys unknown to the target model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Silently drop the key. Tolerates payloads that carry keys for form
    /// widgets unrelated to this entity.
    #[default]
    Discard,

    /// Raise an unknown field error.
    Reject,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            tamper_protection: true,
            force_delete: false,
            unknown_keys: UnknownKeys::default(),
        }
    }
}

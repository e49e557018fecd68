//! Persisted watch settings abstraction.

/// User-tunable settings that should survive reboot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct PersistedSettings {
    /// Swap ink and paper across the whole face.
    pub inverted: bool,
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

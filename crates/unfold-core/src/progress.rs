//! Persisted unfold progress, one small record per route.

/// Retention horizon for persisted progress records.
pub const PROGRESS_RETENTION_DAYS: u32 = 30;

/// Durable slot for the last reached section index per route key.
///
/// Backends are best-effort: the app treats a failed or empty `load` as
/// index 0 and a failed `save` as a dropped write, never as an error the
/// user sees. Loaded indices may reference a document structure that no
/// longer matches and are clamped by the caller.
pub trait ProgressStore {
    type Error;

    fn load(&mut self, route_key: &str) -> Result<Option<u16>, Self::Error>;

    fn save(&mut self, route_key: &str, section_index: u16) -> Result<(), Self::Error>;
}

/// No-persistence store used when the host offers no durable slot.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullProgressStore;

impl NullProgressStore {
    pub const fn new() -> Self {
        Self
    }
}

impl ProgressStore for NullProgressStore {
    type Error = core::convert::Infallible;

    fn load(&mut self, _route_key: &str) -> Result<Option<u16>, Self::Error> {
        Ok(None)
    }

    fn save(&mut self, _route_key: &str, _section_index: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}

//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the full catalog (index plus per-entry detail fan-out).
    LoadCatalog { limit: usize },
    /// Fetch abilities and moves for one entry. `generation` is echoed back
    /// so stale results can be dropped at commit time.
    LoadDetail { name: String, generation: u64 },
}

// Support utilities for WASM bindings
use serde::de::DeserializeOwned;

/// Parse JSON config over defaults.
///
/// Empty input and "{}" give `T::default()`; anything else must parse, so a
/// typo in the UI surfaces as an error instead of silently using defaults.
pub fn parse_with_defaults<T: DeserializeOwned + Default>(
    config_json: &str,
) -> Result<T, serde_json::Error> {
    let trimmed = config_json.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        Ok(T::default())
    } else {
        serde_json::from_str::<T>(trimmed)
    }
}

/// Map a uniform [0, 1) float onto a non-zero noise seed.
pub fn seed_from_unit(random: f64) -> u64 {
    ((random.clamp(0.0, 1.0) * u32::MAX as f64) as u64).max(1)
}

/// Completion handles for transmissions that may still be sounding, keyed
/// by the output-clock time at which each one ends.
#[derive(Debug)]
pub struct PendingCompletions<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for PendingCompletions<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> PendingCompletions<T> {
    /// Track `handle` until `ends_at`, dropping entries already finished at `now`.
    pub fn track(&mut self, ends_at: f64, now: f64, handle: T) {
        self.entries.retain(|(end, _)| *end > now);
        self.entries.push((ends_at, handle));
    }

    /// Hand back every tracked handle, oldest first, and forget them.
    pub fn take_all(&mut self) -> Vec<T> {
        self.entries.drain(..).map(|(_, handle)| handle).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

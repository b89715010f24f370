use crate::model::{UnitSystem, WeatherSnapshot};

/// Owns what the UI layer needs between searches: the active snapshot, the
/// unit preference, and a search-generation counter.
///
/// The generation counter makes overlapping searches explicit: each search
/// takes a generation from [`AppState::begin_search`] and may only install
/// its result through [`AppState::commit`]. A response from a superseded
/// search is discarded, so the latest request always wins. A failed search
/// simply never commits, leaving the prior snapshot active.
#[derive(Debug, Default)]
pub struct AppState {
    snapshot: Option<WeatherSnapshot>,
    units: UnitSystem,
    generation: u64,
}

impl AppState {
    pub fn new(units: UnitSystem) -> Self {
        Self { snapshot: None, units, generation: 0 }
    }

    /// Start a new search, superseding any still in flight.
    pub fn begin_search(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install a search result, replacing the snapshot wholesale.
    ///
    /// Returns `false` (and changes nothing) when `generation` is no longer
    /// the latest.
    pub fn commit(&mut self, generation: u64, snapshot: WeatherSnapshot) -> bool {
        if generation != self.generation {
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Flip the unit preference. The snapshot is untouched; callers
    /// re-present it in the new units.
    pub fn toggle_units(&mut self) -> UnitSystem {
        self.units = self.units.toggle();
        self.units
    }
}

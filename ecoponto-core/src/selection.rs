//! Region/locality cascade with stale-response protection.

use crate::model::{Locality, RegionCode};
use crate::ports::PortError;

/// Token identifying one outgoing locality fetch.
///
/// Returned by [`CascadeState::set_region`] and handed back to
/// [`CascadeState::apply_localities`] together with the response, so that
/// responses belonging to an earlier region choice can be told apart from
/// the current one no matter in which order they arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityRequest {
    /// Region the fetch was issued for.
    pub region: RegionCode,
    generation: u64,
}

/// Dependent region → locality selection.
///
/// Changing the region clears the locality selection and its option list in
/// the same step; the list is repopulated only by the response matching the
/// most recent request token (last request wins).
#[derive(Debug, Default)]
pub struct CascadeState {
    region: Option<RegionCode>,
    locality: Option<String>,
    localities: Vec<Locality>,
    generation: u64,
}

impl CascadeState {
    /// Create an empty cascade with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected region, if any.
    #[must_use]
    pub fn region(&self) -> Option<&RegionCode> {
        self.region.as_ref()
    }

    /// Currently selected locality, if any.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    /// Localities available for the selected region. Empty while no region
    /// is selected, while a fetch is pending, or after a failed fetch.
    #[must_use]
    pub fn available_localities(&self) -> &[Locality] {
        &self.localities
    }

    /// Both halves of the selection, when both are set.
    #[must_use]
    pub fn selection(&self) -> Option<(RegionCode, String)> {
        match (&self.region, &self.locality) {
            (Some(region), Some(locality)) => Some((region.clone(), locality.clone())),
            _ => None,
        }
    }

    /// Select a region, or clear the selection with `None`.
    ///
    /// The locality selection and the option list are cleared synchronously
    /// in the same call. When a real region was chosen, the returned request
    /// token must be used to fetch that region's localities and later passed
    /// to [`Self::apply_localities`].
    pub fn set_region(&mut self, region: Option<RegionCode>) -> Option<LocalityRequest> {
        self.generation = self.generation.wrapping_add(1);
        self.locality = None;
        self.localities.clear();
        self.region = region;

        self.region.as_ref().map(|region| LocalityRequest {
            region: region.clone(),
            generation: self.generation,
        })
    }

    /// Apply the outcome of a locality fetch.
    ///
    /// The response is applied only when `request` is still the most recent
    /// one; stale responses are discarded so the visible list always belongs
    /// to the visible region. A failed fetch leaves the list empty. Returns
    /// whether the response was applied.
    pub fn apply_localities(
        &mut self,
        request: &LocalityRequest,
        outcome: Result<Vec<Locality>, PortError>,
    ) -> bool {
        if request.generation != self.generation {
            return false;
        }

        self.localities = outcome.unwrap_or_default();
        true
    }

    /// Select a locality, or clear it with `None`.
    ///
    /// Only values drawn from the current option list are accepted; anything
    /// else is a no-op. Returns whether the selection changed.
    pub fn set_locality(&mut self, locality: Option<String>) -> bool {
        match locality {
            None => {
                self.locality = None;
                true
            }
            Some(name) => {
                if self.localities.iter().any(|entry| entry.name == name) {
                    self.locality = Some(name);
                    true
                } else {
                    false
                }
            }
        }
    }
}

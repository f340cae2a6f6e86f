//! Map coordinate capture: geolocation seed vs explicit selection.

use crate::model::{Coordinate, DEFAULT_ORIGIN};

/// Chosen map coordinate for a new collection point.
///
/// The *initial* value arrives asynchronously from the geolocation
/// collaborator and only centers the map; the *selected* value is set by an
/// explicit user action and is the one submitted. A selection is never
/// overwritten by a late initial resolution.
#[derive(Debug, Default)]
pub struct PositionCapture {
    initial: Option<Coordinate>,
    selected: Option<Coordinate>,
}

impl PositionCapture {
    /// Create a capture with neither seed nor selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the map center from the device position.
    ///
    /// Ignored once an explicit selection exists.
    pub fn seed_initial(&mut self, coordinate: Coordinate) {
        if self.selected.is_none() {
            self.initial = Some(coordinate);
        }
    }

    /// Record an explicit map selection. Always overwrites.
    pub fn select(&mut self, coordinate: Coordinate) {
        self.selected = Some(coordinate);
    }

    /// The explicitly selected coordinate, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    /// The geolocation seed, if one arrived.
    #[must_use]
    pub fn initial(&self) -> Option<Coordinate> {
        self.initial
    }

    /// Coordinate used at submission time.
    ///
    /// Falls back to [`DEFAULT_ORIGIN`] when the map was never touched;
    /// registration at the origin is allowed.
    #[must_use]
    pub fn submission_coordinate(&self) -> Coordinate {
        self.selected.unwrap_or(DEFAULT_ORIGIN)
    }

    /// Where the map should center: the selection, else the seed, else the
    /// default origin.
    #[must_use]
    pub fn view_center(&self) -> Coordinate {
        self.selected.or(self.initial).unwrap_or(DEFAULT_ORIGIN)
    }
}

use std::sync::Arc;

use ecoponto_core::{
    model::{Coordinate, PointSummary, RegionCode},
    registration::{ContactFields, RegistrationPipeline},
    selection::{CascadeState, LocalityRequest},
    service::EcopontoService,
    CategorySelection, DetailComposer, PositionCapture,
};

/// Degrees moved per map cursor step.
pub(crate) const MAP_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    RegionSelect,
    LocalitySelect,
    PointList,
    Register,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegisterFocus {
    Name,
    Email,
    Whatsapp,
    Categories,
    Map,
}

impl RegisterFocus {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Whatsapp,
            Self::Whatsapp => Self::Categories,
            Self::Categories => Self::Map,
            Self::Map => Self::Name,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<EcopontoService>,
    pub pipeline: RegistrationPipeline,
    pub composer: DetailComposer,

    pub screen: Screen,

    pub regions: Vec<RegionCode>,
    pub region_list_index: usize,

    pub cascade: CascadeState,
    pub locality_list_index: usize,

    pub points: Vec<PointSummary>,
    pub point_list_index: usize,

    pub fields: ContactFields,
    pub categories: CategorySelection,
    pub category_list_index: usize,
    pub position: PositionCapture,
    pub map_cursor: Coordinate,
    pub focus: RegisterFocus,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<EcopontoService>) -> Self {
        let registry = service.registry();
        let position = PositionCapture::new();
        let map_cursor = position.view_center();

        Self {
            service,
            pipeline: RegistrationPipeline::new(Arc::clone(&registry)),
            composer: DetailComposer::new(registry),
            screen: Screen::RegionSelect,
            regions: Vec::new(),
            region_list_index: 0,
            cascade: CascadeState::new(),
            locality_list_index: 0,
            points: Vec::new(),
            point_list_index: 0,
            fields: ContactFields::default(),
            categories: CategorySelection::default(),
            category_list_index: 0,
            position,
            map_cursor,
            focus: RegisterFocus::Name,
            is_loading: false,
            error_message: None,
            info_message: None,
        }
    }

    /// Seed the map with the device position and center the cursor on it
    /// unless the user already picked a point.
    pub(crate) fn seed_position(&mut self, coordinate: Coordinate) {
        self.position.seed_initial(coordinate);
        if self.position.selected().is_none() {
            self.map_cursor = self.position.view_center();
        }
    }

    pub(crate) fn select_current_region(&mut self) -> Option<LocalityRequest> {
        let region = self.regions.get(self.region_list_index)?.clone();
        let request = self.cascade.set_region(Some(region));
        self.locality_list_index = 0;
        self.screen = Screen::LocalitySelect;
        request
    }

    /// Pick the highlighted locality; true when the selection was accepted.
    pub(crate) fn select_current_locality(&mut self) -> bool {
        let Some(name) = self
            .cascade
            .available_localities()
            .get(self.locality_list_index)
            .map(|locality| locality.name.clone())
        else {
            return false;
        };

        let accepted = self.cascade.set_locality(Some(name));
        if accepted {
            self.screen = Screen::PointList;
            self.point_list_index = 0;
        }
        accepted
    }

    pub(crate) fn current_point(&self) -> Option<&PointSummary> {
        self.points.get(self.point_list_index)
    }

    pub(crate) fn nudge_map(&mut self, latitude_delta: f64, longitude_delta: f64) {
        self.map_cursor = Coordinate {
            latitude: self.map_cursor.latitude + latitude_delta,
            longitude: self.map_cursor.longitude + longitude_delta,
        };
    }

    /// Discard the form state after a successful submission. The category
    /// universe and the geolocation seed survive; everything the user typed
    /// or picked does not.
    pub(crate) fn reset_registration(&mut self) {
        self.fields = ContactFields::default();

        let selected: Vec<_> = self.categories.selected_ids().to_vec();
        for id in selected {
            self.categories.toggle(id);
        }

        let mut position = PositionCapture::new();
        if let Some(seed) = self.position.initial() {
            position.seed_initial(seed);
        }
        self.position = position;
        self.map_cursor = self.position.view_center();
        self.focus = RegisterFocus::Name;
    }
}

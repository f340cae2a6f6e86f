//! Validation and submission of new collection points.

use std::sync::Arc;

use crate::categories::CategorySelection;
use crate::model::PointRegistration;
use crate::ports::{PortError, RegistryPort};
use crate::position::PositionCapture;
use crate::selection::CascadeState;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
/// First failing field group found while assembling a registration.
pub enum ValidationError {
    /// Name, e-mail or WhatsApp is empty.
    #[error("Fill in name, e-mail and WhatsApp")]
    MissingContact,
    /// Region or locality is not selected.
    #[error("Select a state and a city")]
    MissingLocation,
    /// No collection category selected.
    #[error("Select at least one collection item")]
    NoCategorySelected,
}

#[derive(thiserror::Error, Debug)]
/// Outcome of a failed submission attempt.
pub enum SubmitError {
    /// The record never left the client; correct the input and resubmit.
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    /// The backend write failed; the form state is untouched, so the same
    /// submission can be retried as-is.
    #[error("Submission failed: {0}")]
    Backend(#[source] PortError),
}

/// Free-text contact fields of the registration form.
#[derive(Debug, Clone, Default)]
pub struct ContactFields {
    /// Name of the registering entity.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
    /// Contact WhatsApp number.
    pub whatsapp: String,
}

/// Assembles registration records from the flow state and performs the
/// single backend write.
pub struct RegistrationPipeline {
    registry: Arc<dyn RegistryPort>,
}

impl RegistrationPipeline {
    /// Create a pipeline writing through the given registry.
    #[must_use]
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    /// Assemble a registration record from the current flow state.
    ///
    /// Pure; performs no I/O. Checks contact fields first, then the
    /// region/locality pair, then the category selection, and reports the
    /// first group that fails. The coordinate is taken as-is — submitting
    /// at the default origin is allowed.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ValidationError`].
    pub fn assemble(
        fields: &ContactFields,
        cascade: &CascadeState,
        categories: &CategorySelection,
        position: &PositionCapture,
    ) -> Result<PointRegistration, ValidationError> {
        if fields.name.trim().is_empty()
            || fields.email.trim().is_empty()
            || fields.whatsapp.trim().is_empty()
        {
            return Err(ValidationError::MissingContact);
        }

        let Some((region, locality)) = cascade.selection() else {
            return Err(ValidationError::MissingLocation);
        };

        if categories.is_empty() {
            return Err(ValidationError::NoCategorySelected);
        }

        Ok(PointRegistration {
            name: fields.name.trim().to_owned(),
            email: fields.email.trim().to_owned(),
            whatsapp: fields.whatsapp.trim().to_owned(),
            region,
            locality,
            coordinate: position.submission_coordinate(),
            categories: categories.selected_ids().to_vec(),
        })
    }

    /// Validate, assemble, and submit a new collection point.
    ///
    /// Exactly one backend write happens per successful validation pass;
    /// a rejected record triggers no network call at all. No retry is
    /// attempted here — the caller keeps its state and may submit again.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] before any network activity, or
    /// [`SubmitError::Backend`] when the write fails.
    pub async fn submit(
        &self,
        fields: &ContactFields,
        cascade: &CascadeState,
        categories: &CategorySelection,
        position: &PositionCapture,
    ) -> Result<(), SubmitError> {
        let registration = Self::assemble(fields, cascade, categories, position)?;

        self.registry
            .register_point(&registration)
            .await
            .map_err(SubmitError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::{
        Category, CategoryId, Coordinate, Locality, PointDetail, PointId, PointQuery,
        PointSummary, RegionCode, DEFAULT_ORIGIN,
    };

    /// Registry fake recording every write.
    #[derive(Default)]
    struct RecordingRegistry {
        written: Mutex<Vec<PointRegistration>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl RegistryPort for RecordingRegistry {
        async fn register_point(&self, registration: &PointRegistration) -> Result<(), PortError> {
            if self.fail_writes {
                return Err(PortError::Internal("backend down".into()));
            }
            self.written
                .lock()
                .expect("registry lock")
                .push(registration.clone());
            Ok(())
        }

        async fn point_detail(&self, _point: &PointId) -> Result<PointDetail, PortError> {
            Err(PortError::PointNotFound)
        }

        async fn search_points(&self, _query: &PointQuery) -> Result<Vec<PointSummary>, PortError> {
            Ok(Vec::new())
        }
    }

    fn catalog() -> Vec<Category> {
        [1, 2, 3]
            .into_iter()
            .map(|id| Category {
                id: CategoryId(id),
                name: format!("categoria {id}"),
                image_url: String::new(),
            })
            .collect()
    }

    fn populated_state() -> (ContactFields, CascadeState, CategorySelection, PositionCapture) {
        let fields = ContactFields {
            name: "Eco Ponto".into(),
            email: "a@a.com".into(),
            whatsapp: "11999999999".into(),
        };

        let mut cascade = CascadeState::new();
        let request = cascade
            .set_region(Some(RegionCode("SP".into())))
            .expect("request token");
        cascade.apply_localities(
            &request,
            Ok(vec![Locality {
                name: "São Paulo".into(),
            }]),
        );
        cascade.set_locality(Some("São Paulo".into()));

        let mut categories = CategorySelection::new(catalog());
        categories.toggle(CategoryId(1));
        categories.toggle(CategoryId(3));

        let mut position = PositionCapture::new();
        position.select(Coordinate {
            latitude: -23.5,
            longitude: -46.6,
        });

        (fields, cascade, categories, position)
    }

    #[tokio::test]
    async fn valid_submission_writes_exactly_once() {
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (fields, cascade, categories, position) = populated_state();

        pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect("submission succeeds");

        let written = registry.written.lock().expect("registry lock");
        assert_eq!(written.len(), 1, "exactly one backend write");

        let record = written.first().expect("one record");
        assert_eq!(record.name, "Eco Ponto");
        assert_eq!(record.email, "a@a.com");
        assert_eq!(record.whatsapp, "11999999999");
        assert_eq!(record.region, RegionCode("SP".into()));
        assert_eq!(record.locality, "São Paulo");
        assert_eq!(
            record.coordinate,
            Coordinate {
                latitude: -23.5,
                longitude: -46.6,
            }
        );
        assert_eq!(record.categories, [CategoryId(1), CategoryId(3)]);
    }

    #[tokio::test]
    async fn empty_contact_field_rejects_without_network() {
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (mut fields, cascade, categories, position) = populated_state();
        fields.email.clear();

        let err = pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect_err("validation must fail");

        assert!(matches!(
            err,
            SubmitError::Rejected(ValidationError::MissingContact)
        ));
        assert!(
            registry.written.lock().expect("registry lock").is_empty(),
            "no network call on validation failure"
        );
    }

    #[tokio::test]
    async fn missing_locality_is_reported_after_contact() {
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (fields, mut cascade, categories, position) = populated_state();
        cascade.set_locality(None);

        let err = pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect_err("validation must fail");

        assert!(matches!(
            err,
            SubmitError::Rejected(ValidationError::MissingLocation)
        ));
    }

    #[tokio::test]
    async fn empty_category_set_is_rejected_last() {
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (fields, cascade, mut categories, position) = populated_state();
        categories.toggle(CategoryId(1));
        categories.toggle(CategoryId(3));

        let err = pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect_err("validation must fail");

        assert!(matches!(
            err,
            SubmitError::Rejected(ValidationError::NoCategorySelected)
        ));
    }

    #[tokio::test]
    async fn untouched_map_submits_the_default_origin() {
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (fields, cascade, categories, _position) = populated_state();

        pipeline
            .submit(&fields, &cascade, &categories, &PositionCapture::new())
            .await
            .expect("origin submission is allowed");

        let written = registry.written.lock().expect("registry lock");
        assert_eq!(
            written.first().expect("one record").coordinate,
            DEFAULT_ORIGIN
        );
    }

    #[tokio::test]
    async fn backend_failure_is_reported_and_retryable() {
        let registry = Arc::new(RecordingRegistry {
            fail_writes: true,
            ..RecordingRegistry::default()
        });
        let pipeline = RegistrationPipeline::new(Arc::clone(&registry) as Arc<dyn RegistryPort>);
        let (fields, cascade, categories, position) = populated_state();

        let err = pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect_err("backend failure surfaces");
        assert!(matches!(err, SubmitError::Backend(_)));

        // The caller still holds the same state and may simply submit again.
        let err = pipeline
            .submit(&fields, &cascade, &categories, &position)
            .await
            .expect_err("still failing");
        assert!(matches!(err, SubmitError::Backend(_)));
    }
}

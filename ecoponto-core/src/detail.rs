//! Point detail state machine and contact-intent composition.

use std::sync::Arc;

use crate::model::{PointDetail, PointId};
use crate::ports::{PortError, RegistryPort};

/// Subject line of the composed e-mail intent.
pub const MAIL_SUBJECT: &str = "Interesse na Coleta de Resíduos";

/// Message body embedded in the WhatsApp deep link.
const WHATSAPP_TEXT: &str = "Enviado pelo app Ecoponto";

#[derive(Debug, Default)]
/// Lifecycle of one detail fetch.
///
/// `Loaded` and `Empty` are terminal for a given identifier; a new load
/// restarts the machine from `Loading` regardless of the prior state.
pub enum DetailState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Point and items are available.
    Loaded(PointDetail),
    /// The fetch settled without a point; render a neutral state.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Arguments for the external e-mail composer.
pub struct EmailIntent {
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Pre-filled subject.
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Deep-link URI for the external messaging handler.
pub struct MessagingIntent {
    /// Complete `whatsapp://` URI.
    pub uri: String,
}

/// Fetches one point plus its items and composes contact intents over the
/// loaded record.
pub struct DetailComposer {
    registry: Arc<dyn RegistryPort>,
    state: DetailState,
}

impl DetailComposer {
    /// Create an idle composer reading through the given registry.
    #[must_use]
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self {
            registry,
            state: DetailState::Idle,
        }
    }

    /// Current position in the detail lifecycle.
    #[must_use]
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded detail, when the machine is in `Loaded`.
    #[must_use]
    pub fn detail(&self) -> Option<&PointDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// Fetch the detail for one point, replacing whatever was loaded before.
    ///
    /// An unknown identifier is not an error: the machine settles in
    /// `Empty` and the caller renders its neutral state.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`PortError`] for transport failures; the
    /// machine is left in `Empty` in that case as well.
    pub async fn load(&mut self, point: PointId) -> Result<(), PortError> {
        self.state = DetailState::Loading;

        match self.registry.point_detail(&point).await {
            Ok(detail) => {
                self.state = DetailState::Loaded(detail);
                Ok(())
            }
            Err(PortError::PointNotFound) => {
                self.state = DetailState::Empty;
                Ok(())
            }
            Err(err) => {
                self.state = DetailState::Empty;
                Err(err)
            }
        }
    }

    /// Compose the e-mail intent for the loaded point.
    ///
    /// `None` unless a point is loaded.
    #[must_use]
    pub fn compose_email_intent(&self) -> Option<EmailIntent> {
        let detail = self.detail()?;
        Some(EmailIntent {
            recipients: vec![detail.point.email.clone()],
            subject: MAIL_SUBJECT.to_owned(),
        })
    }

    /// Compose the WhatsApp deep link for the loaded point.
    ///
    /// `None` unless a point is loaded.
    #[must_use]
    pub fn compose_messaging_intent(&self) -> Option<MessagingIntent> {
        let detail = self.detail()?;
        Some(MessagingIntent {
            uri: format!(
                "whatsapp://send?phone={}&text={WHATSAPP_TEXT}",
                detail.point.whatsapp
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::model::{
        CollectionPoint, PointItem, PointQuery, PointRegistration, PointSummary, RegionCode,
    };

    /// Registry fake serving a single known point.
    struct SinglePointRegistry {
        known: PointId,
        detail: PointDetail,
    }

    #[async_trait]
    impl RegistryPort for SinglePointRegistry {
        async fn register_point(&self, _registration: &PointRegistration) -> Result<(), PortError> {
            Ok(())
        }

        async fn point_detail(&self, point: &PointId) -> Result<PointDetail, PortError> {
            if *point == self.known {
                Ok(self.detail.clone())
            } else {
                Err(PortError::PointNotFound)
            }
        }

        async fn search_points(&self, _query: &PointQuery) -> Result<Vec<PointSummary>, PortError> {
            Ok(Vec::new())
        }
    }

    fn registry() -> Arc<SinglePointRegistry> {
        Arc::new(SinglePointRegistry {
            known: PointId(7),
            detail: PointDetail {
                point: CollectionPoint {
                    image_url: "http://localhost:3333/uploads/ponto.jpg".into(),
                    name: "Mercado do Bairro".into(),
                    email: "contato@mercado.com".into(),
                    whatsapp: "11988887777".into(),
                    locality: "São Paulo".into(),
                    region: RegionCode("SP".into()),
                },
                items: vec![
                    PointItem {
                        title: "Lâmpadas".into(),
                    },
                    PointItem {
                        title: "Pilhas e Baterias".into(),
                    },
                ],
            },
        })
    }

    #[tokio::test]
    async fn load_reaches_loaded_for_a_known_point() {
        let mut composer = DetailComposer::new(registry());
        assert!(matches!(composer.state(), DetailState::Idle));

        composer.load(PointId(7)).await.expect("load succeeds");

        let detail = composer.detail().expect("detail loaded");
        assert_eq!(detail.point.name, "Mercado do Bairro");
        assert_eq!(detail.items.len(), 2);
    }

    #[tokio::test]
    async fn unknown_point_settles_in_empty_without_error() {
        let mut composer = DetailComposer::new(registry());

        composer.load(PointId(404)).await.expect("not an error");

        assert!(matches!(composer.state(), DetailState::Empty));
        assert!(composer.detail().is_none());
        assert!(composer.compose_email_intent().is_none());
        assert!(composer.compose_messaging_intent().is_none());
    }

    #[tokio::test]
    async fn a_new_load_replaces_a_loaded_point() {
        let mut composer = DetailComposer::new(registry());

        composer.load(PointId(7)).await.expect("load succeeds");
        composer.load(PointId(404)).await.expect("not an error");

        assert!(matches!(composer.state(), DetailState::Empty));
    }

    #[tokio::test]
    async fn email_intent_carries_the_loaded_address_and_a_subject() {
        let mut composer = DetailComposer::new(registry());
        composer.load(PointId(7)).await.expect("load succeeds");

        let intent = composer.compose_email_intent().expect("intent composed");
        assert_eq!(intent.recipients, ["contato@mercado.com"]);
        assert!(!intent.subject.is_empty());
        assert_eq!(intent.subject, MAIL_SUBJECT);
    }

    #[tokio::test]
    async fn messaging_intent_templates_the_loaded_number() {
        let mut composer = DetailComposer::new(registry());
        composer.load(PointId(7)).await.expect("load succeeds");

        let intent = composer.compose_messaging_intent().expect("intent composed");
        assert!(intent.uri.starts_with("whatsapp://send?phone=11988887777"));
        assert!(intent.uri.contains("text="));
    }

    #[test]
    fn intents_are_guarded_before_any_load() {
        let composer = DetailComposer::new(registry());

        assert!(composer.compose_email_intent().is_none());
        assert!(composer.compose_messaging_intent().is_none());
    }
}

//! End-to-end flow against in-memory collaborators: browse the directory,
//! fill the registration state, submit, and read the result back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecoponto_core::{
    CascadeState, CatalogPort, Category, CategoryId, CategorySelection, CollectionPoint,
    ContactFields, Coordinate, DetailComposer, DetailState, DirectoryPort, EcopontoService,
    Locality, PointDetail, PointId, PointItem, PointQuery, PointRegistration, PointSummary,
    PortError, PositionCapture, RegionCode, RegistrationPipeline, RegistryPort,
};

struct FixedDirectory {
    localities: HashMap<String, Vec<Locality>>,
}

#[async_trait]
impl DirectoryPort for FixedDirectory {
    async fn list_regions(&self) -> Result<Vec<RegionCode>, PortError> {
        let mut codes: Vec<String> = self.localities.keys().cloned().collect();
        codes.sort();
        Ok(codes.into_iter().map(RegionCode).collect())
    }

    async fn list_localities(&self, region: &RegionCode) -> Result<Vec<Locality>, PortError> {
        Ok(self.localities.get(&region.0).cloned().unwrap_or_default())
    }
}

struct FixedCatalog;

#[async_trait]
impl CatalogPort for FixedCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
        Ok([(1, "Lâmpadas"), (2, "Pilhas e Baterias"), (3, "Óleo de Cozinha")]
            .into_iter()
            .map(|(id, name)| Category {
                id: CategoryId(id),
                name: name.to_owned(),
                image_url: format!("http://localhost:3333/uploads/{id}.svg"),
            })
            .collect())
    }
}

/// Registry that assigns sequential ids and serves registered points back.
#[derive(Default)]
struct MemoryRegistry {
    points: Mutex<Vec<PointRegistration>>,
}

#[async_trait]
impl RegistryPort for MemoryRegistry {
    async fn register_point(&self, registration: &PointRegistration) -> Result<(), PortError> {
        self.points
            .lock()
            .expect("points lock")
            .push(registration.clone());
        Ok(())
    }

    async fn point_detail(&self, point: &PointId) -> Result<PointDetail, PortError> {
        let points = self.points.lock().expect("points lock");
        let index = usize::try_from(point.0).map_err(|_| PortError::PointNotFound)?;
        let registration = points.get(index).ok_or(PortError::PointNotFound)?;

        Ok(PointDetail {
            point: CollectionPoint {
                image_url: String::new(),
                name: registration.name.clone(),
                email: registration.email.clone(),
                whatsapp: registration.whatsapp.clone(),
                locality: registration.locality.clone(),
                region: registration.region.clone(),
            },
            items: registration
                .categories
                .iter()
                .map(|id| PointItem {
                    title: format!("categoria {}", id.0),
                })
                .collect(),
        })
    }

    async fn search_points(&self, query: &PointQuery) -> Result<Vec<PointSummary>, PortError> {
        let points = self.points.lock().expect("points lock");
        Ok(points
            .iter()
            .enumerate()
            .filter(|(_, registration)| {
                query
                    .region
                    .as_ref()
                    .is_none_or(|region| registration.region == *region)
                    && query
                        .locality
                        .as_ref()
                        .is_none_or(|locality| registration.locality == *locality)
                    && query
                        .categories
                        .iter()
                        .all(|id| registration.categories.contains(id))
            })
            .map(|(index, registration)| PointSummary {
                id: PointId(i64::try_from(index).unwrap_or_default()),
                name: registration.name.clone(),
                image_url: String::new(),
                coordinate: registration.coordinate,
            })
            .collect())
    }
}

fn service() -> EcopontoService {
    let mut localities = HashMap::new();
    localities.insert(
        "SP".to_owned(),
        vec![
            Locality {
                name: "São Paulo".into(),
            },
            Locality {
                name: "Santos".into(),
            },
        ],
    );
    localities.insert(
        "RJ".to_owned(),
        vec![Locality {
            name: "Rio de Janeiro".into(),
        }],
    );

    EcopontoService::new(
        Arc::new(FixedDirectory { localities }),
        Arc::new(FixedCatalog),
        Arc::new(MemoryRegistry::default()),
    )
}

#[tokio::test]
async fn register_then_read_back_through_the_detail_composer() {
    let service = service();

    // Cascade: pick a region, resolve its localities, pick one.
    let mut cascade = CascadeState::new();
    let regions = service.regions().await.expect("regions");
    assert!(regions.contains(&RegionCode("SP".into())));

    let request = cascade
        .set_region(Some(RegionCode("SP".into())))
        .expect("request token");
    let outcome = service.localities(&request.region).await;
    assert!(cascade.apply_localities(&request, outcome));
    assert!(cascade.set_locality(Some("Santos".into())));

    // Categories and map position.
    let mut categories = CategorySelection::new(service.categories().await.expect("catalog"));
    categories.toggle(CategoryId(2));
    categories.toggle(CategoryId(3));

    let mut position = PositionCapture::new();
    position.seed_initial(Coordinate {
        latitude: -23.96,
        longitude: -46.33,
    });
    position.select(Coordinate {
        latitude: -23.93,
        longitude: -46.38,
    });

    // Submit.
    let fields = ContactFields {
        name: "Cooperativa Recicla Santos".into(),
        email: "contato@reciclasantos.org".into(),
        whatsapp: "13991112222".into(),
    };
    let pipeline = RegistrationPipeline::new(service.registry());
    pipeline
        .submit(&fields, &cascade, &categories, &position)
        .await
        .expect("submission succeeds");

    // The point is now searchable under its locality.
    let found = service
        .search_points(&PointQuery {
            region: Some(RegionCode("SP".into())),
            locality: Some("Santos".into()),
            categories: vec![CategoryId(2)],
        })
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    let summary = found.first().expect("one summary");

    // Read side: composer merges the point with its items.
    let mut composer = DetailComposer::new(service.registry());
    composer.load(summary.id).await.expect("load succeeds");

    let detail = composer.detail().expect("detail loaded");
    assert_eq!(detail.point.name, "Cooperativa Recicla Santos");
    assert_eq!(detail.point.locality, "Santos");
    assert_eq!(detail.items.len(), 2);

    let email = composer.compose_email_intent().expect("email intent");
    assert_eq!(email.recipients, ["contato@reciclasantos.org"]);

    let message = composer.compose_messaging_intent().expect("messaging intent");
    assert!(message.uri.contains("13991112222"));
}

#[tokio::test]
async fn browsing_an_unknown_point_renders_the_neutral_state() {
    let service = service();

    let mut composer = DetailComposer::new(service.registry());
    composer.load(PointId(99)).await.expect("not an error");

    assert!(matches!(composer.state(), DetailState::Empty));
    assert!(composer.compose_email_intent().is_none());
}

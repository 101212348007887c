//! Catalog service behaviour over a real products document in a temp directory.

use catalog_store::{
    CatalogError, CatalogService, FilterCriterion, JsonFileStore, Product, ProductInput,
    RecordStore, StoreError,
};
use std::sync::Arc;
use tempfile::TempDir;

fn service() -> (TempDir, CatalogService<JsonFileStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("products.json"));
    (dir, CatalogService::new(store))
}

fn balon_input() -> ProductInput {
    ProductInput {
        name: Some("Balon Blanco".into()),
        image: Some("imagen.png".into()),
        description: Some("Balon de futbol".into()),
        price: Some(10000.0),
        rating: Some(5.0),
        specifications: Some("Tamano 5".into()),
    }
}

fn named(name: &str, price: f64) -> ProductInput {
    ProductInput {
        name: Some(name.into()),
        price: Some(price),
        ..Default::default()
    }
}

/// A store whose medium is always broken.
struct FailingStore;

impl RecordStore for FailingStore {
    fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::storage("disk on fire"))
    }

    fn replace_all(&self, _products: &[Product]) -> Result<(), StoreError> {
        Err(StoreError::storage("disk on fire"))
    }
}

/// Reads from a real document but refuses every write.
struct ReadOnlyStore {
    inner: JsonFileStore,
}

impl RecordStore for ReadOnlyStore {
    fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        self.inner.load_all()
    }

    fn replace_all(&self, _products: &[Product]) -> Result<(), StoreError> {
        Err(StoreError::storage("read-only medium"))
    }
}

fn read_only_catalog(dir: &TempDir, products: &[Product]) -> CatalogService<ReadOnlyStore> {
    let inner = JsonFileStore::new(dir.path().join("products.json"));
    inner.replace_all(products).unwrap();
    CatalogService::new(ReadOnlyStore { inner })
}

#[test]
fn create_assigns_one_on_empty_catalog() {
    let (_dir, catalog) = service();

    let created = catalog.create(Some(balon_input())).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name.as_deref(), Some("Balon Blanco"));
    assert_eq!(catalog.list_all().unwrap(), vec![created]);
}

#[test]
fn create_assigns_max_plus_one() {
    let (_dir, catalog) = service();
    catalog
        .store()
        .replace_all(&[
            Product::from_input(7, named("a", 1.0)),
            Product::from_input(3, named("b", 2.0)),
        ])
        .unwrap();

    let created = catalog.create(Some(named("c", 3.0))).unwrap();
    assert_eq!(created.id, 8);

    let ids: Vec<i64> = catalog.list_all().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![7, 3, 8]);
}

#[test]
fn create_rejects_missing_payload() {
    let (_dir, catalog) = service();
    let err = catalog.create(None).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidInput { .. }));
    assert!(catalog.list_all().unwrap().is_empty());
}

#[test]
fn get_by_id_surfaces_not_found() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();

    assert_eq!(catalog.get_by_id(1).unwrap().price, Some(10000.0));
    assert!(matches!(catalog.get_by_id(2), Err(CatalogError::NotFound { id: 2 })));
}

#[test]
fn update_preserves_id_and_replaces_every_field() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();
    catalog.create(Some(named("Camiseta", 45000.0))).unwrap();

    let updated = catalog.update(1, named("Balon Dorado", 20000.0)).unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name.as_deref(), Some("Balon Dorado"));
    assert!(updated.description.is_none());

    // Re-inserted at the end of the collection.
    let all = catalog.list_all().unwrap();
    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(all[1], updated);
}

#[test]
fn update_of_absent_id_is_not_found_and_changes_nothing() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();
    let before = catalog.list_all().unwrap();

    let err = catalog.update(5, named("x", 1.0)).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { id: 5 }));
    assert_eq!(catalog.list_all().unwrap(), before);
}

#[test]
fn delete_returns_id_and_removes_product() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();
    catalog.create(Some(named("Camiseta", 45000.0))).unwrap();

    assert_eq!(catalog.delete(1).unwrap(), 1);
    let ids: Vec<i64> = catalog.list_all().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn delete_of_absent_id_differs_between_service_and_store() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();
    let before = catalog.list_all().unwrap();

    assert!(matches!(catalog.delete(9), Err(CatalogError::NotFound { id: 9 })));
    assert_eq!(catalog.store().delete_by_id(9).unwrap(), 9);
    assert_eq!(catalog.list_all().unwrap(), before);
}

#[test]
fn identifiers_follow_the_current_maximum_after_deletes() {
    let (_dir, catalog) = service();
    for i in 0..3 {
        catalog.create(Some(named(&format!("p{}", i), 1.0))).unwrap();
    }
    catalog.delete(2).unwrap();
    assert_eq!(catalog.create(Some(named("p3", 1.0))).unwrap().id, 4);
}

#[test]
fn filter_matches_the_reference_examples() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();
    catalog.create(Some(named("Camiseta Roja", 45000.5))).unwrap();

    let by_name = catalog.filter(&[FilterCriterion::new("name", "blanco")]).unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name.as_deref(), Some("Balon Blanco"));

    let upper = catalog.filter(&[FilterCriterion::new("name", "BALON")]).unwrap();
    assert_eq!(upper.len(), 1);

    assert_eq!(catalog.filter(&[FilterCriterion::new("price", "10000")]).unwrap().len(), 1);
    assert!(catalog.filter(&[FilterCriterion::new("price", "10000.5")]).unwrap().is_empty());

    let all = catalog.filter(&[]).unwrap();
    assert_eq!(all, catalog.list_all().unwrap());
}

#[test]
fn filter_rejects_invalid_criteria() {
    let (_dir, catalog) = service();
    catalog.create(Some(balon_input())).unwrap();

    for criteria in [
        vec![FilterCriterion::new("columnaInvalida", "valor")],
        vec![
            FilterCriterion::new("name", "balon"),
            FilterCriterion::new("columnaInvalida", "valor"),
        ],
        vec![FilterCriterion::new("", "valor")],
        vec![FilterCriterion::new("name", "")],
        vec![FilterCriterion::new("rating", "cinco")],
    ] {
        let err = catalog.filter(&criteria).unwrap_err();
        assert!(
            matches!(err, CatalogError::InvalidFilter { .. }),
            "{:?} -> {:?}",
            criteria,
            err
        );
    }
}

#[test]
fn storage_failures_are_translated() {
    let catalog = CatalogService::new(FailingStore);

    assert!(matches!(catalog.list_all(), Err(CatalogError::Retrieval { .. })));
    assert!(matches!(catalog.get_by_id(1), Err(CatalogError::Storage { .. })));
    assert!(matches!(
        catalog.create(Some(ProductInput::default())),
        Err(CatalogError::Storage { .. })
    ));
    assert!(matches!(
        catalog.filter(&[FilterCriterion::new("name", "x")]),
        Err(CatalogError::Storage { .. })
    ));
}

#[test]
fn malformed_document_is_reported_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, "[{\"id\": \"one\"}]").unwrap();
    let catalog = CatalogService::new(JsonFileStore::new(&path));

    assert!(matches!(catalog.list_all(), Err(CatalogError::Retrieval { .. })));
    assert!(matches!(
        catalog.create(Some(balon_input())),
        Err(CatalogError::Storage { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"id\": \"one\"}]");
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let (_dir, catalog) = service();
    let catalog = Arc::new(catalog);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || catalog.create(Some(named(&format!("p{}", i), 1.0))).unwrap().id)
        })
        .collect();

    let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(catalog.list_all().unwrap().len(), 8);
}

#[test]
fn failed_update_write_keeps_the_original_record() {
    let dir = tempfile::tempdir().unwrap();
    let original = vec![
        Product::from_input(1, balon_input()),
        Product::from_input(2, named("Camiseta", 45000.0)),
    ];
    let catalog = read_only_catalog(&dir, &original);

    let err = catalog.update(1, named("Balon Dorado", 20000.0)).unwrap_err();
    assert!(matches!(err, CatalogError::Storage { .. }));

    assert_eq!(catalog.list_all().unwrap(), original);
    assert_eq!(catalog.get_by_id(1).unwrap(), original[0]);
}

#[test]
fn failed_create_write_leaves_the_catalog_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let original = vec![Product::from_input(4, balon_input())];
    let catalog = read_only_catalog(&dir, &original);

    let err = catalog.create(Some(named("Camiseta", 45000.0))).unwrap_err();
    assert!(matches!(err, CatalogError::Storage { .. }));
    assert_eq!(catalog.list_all().unwrap(), original);
}

#[test]
fn create_racing_first_reads_is_never_lost() {
    for _ in 0..50 {
        let (_dir, catalog) = service();

        let created = std::thread::scope(|scope| {
            let readers: Vec<_> = (0..4).map(|_| scope.spawn(|| catalog.list_all())).collect();
            let created = catalog.create(Some(balon_input())).unwrap();
            for reader in readers {
                reader.join().unwrap().unwrap();
            }
            created
        });

        assert_eq!(catalog.list_all().unwrap(), vec![created]);
    }
}

mod common;

use common::{gadgets, input, next_id, test_config, Gadget};
use resource_controller::mock::{create_mock_store, expect_list};
use resource_controller::{
    FilterPatch, FilterState, ListResponse, PaginationMode, ResourceClient, ResourceController,
    ResourceError, StoreActor,
};

/// End-to-end flow with a real store actor behind the controller.
#[tokio::test]
async fn test_store_backed_controller() {
    let (store, client) = StoreActor::new(8, gadgets(), Box::new(next_id));
    tokio::spawn(store.run());

    let (controller, handle) =
        ResourceController::new(client, test_config(0), PaginationMode::Client);
    tokio::spawn(controller.run());

    let snapshot = handle.settled().await.expect("Initial load failed");
    assert_eq!(snapshot.items.len(), 5);

    // Create, then the refetch reflects the canonical entity
    let created = handle
        .create(input("Zeta drill", "drill"))
        .await
        .expect("Failed to create gadget");
    assert_eq!(created.id, 6);
    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.contains(&6));
    assert_eq!(snapshot.stats.count("drill"), 3);

    // Store-side validation is reported on the form
    let result = handle.create(input("  ", "drill")).await;
    assert!(matches!(result, Err(ResourceError::Validation { .. })));
    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.form_errors.contains_key("name"));

    // Filter by kind
    handle
        .update_filters(FilterPatch::new().set("kind", "saw"))
        .await
        .unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.pagination.total, 2);
    assert_eq!(snapshot.stats.total, 2);

    // Delete and verify it is gone
    handle.remove(2).await.expect("Failed to delete gadget");
    let snapshot = handle.settled().await.unwrap();
    assert!(!snapshot.contains(&2));
    assert_eq!(snapshot.pagination.total, 1);

    // Deleting it again reports NotFound
    assert!(matches!(
        handle.remove(2).await,
        Err(ResourceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_paginated_store_with_server_mode() {
    let (store, client) = StoreActor::new(8, gadgets(), Box::new(next_id));
    tokio::spawn(store.paginated().run());

    let mut config = test_config(0);
    config.default_limit = 2;
    let (controller, handle) = ResourceController::new(client, config, PaginationMode::Server);
    tokio::spawn(controller.run());

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.pagination.total, 5);
    assert_eq!(snapshot.pagination.total_pages, 3);

    handle
        .update_filters(FilterPatch::new().sort_by("id", true).page(3))
        .await
        .unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.pagination.page, 3);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].id, 1);

    handle
        .update_filters(FilterPatch::new().set("date_start", "not-a-date"))
        .await
        .unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.is_error());
    assert!(matches!(
        snapshot.error,
        Some(ResourceError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_store_client_normalizes_raw_replies() {
    let (client, mut receiver) = create_mock_store::<Gadget>(4);

    let list_task = tokio::spawn(async move { client.list(&FilterState::new(10)).await });

    let (filters, responder) = expect_list(&mut receiver)
        .await
        .expect("Expected List request");
    assert_eq!(filters.page(), 1);
    responder.send(Ok(ListResponse::Raw(gadgets()))).unwrap();

    let page = list_task.await.unwrap().unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_dropped_store_reports_closed() {
    let (client, receiver) = create_mock_store::<Gadget>(1);
    drop(receiver);

    let result = client.get(&1).await;
    assert_eq!(result, Err(ResourceError::StoreClosed));
}

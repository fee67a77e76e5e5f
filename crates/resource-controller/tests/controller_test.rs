mod common;

use common::{gadget, gadgets, day, input, test_config, Gadget};
use resource_controller::{
    ControllerHandle, DialogMode, FilterPatch, FilterState, MockClient, MutationStatus, Page,
    PaginationMode, QueryStatus, ResourceController, ResourceError,
};
use std::time::Duration;

fn spawn(mock: &MockClient<Gadget>, mode: PaginationMode) -> ControllerHandle<Gadget> {
    let (controller, handle) = ResourceController::new(mock.clone(), test_config(0), mode);
    tokio::spawn(controller.run());
    handle
}

fn searching(text: &str) -> FilterState {
    let mut state = FilterState::new(10);
    state.apply(FilterPatch::new().search(text));
    state
}

#[tokio::test]
async fn test_initial_load() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list()
        .with_filters(FilterState::new(10))
        .return_ok(Page::single(gadgets()));

    let handle = spawn(&mock, PaginationMode::Client);
    let snapshot = handle.settled().await.unwrap();

    assert_eq!(snapshot.status, QueryStatus::Loaded);
    assert!(!snapshot.is_loading());
    assert_eq!(snapshot.items.len(), 5);
    assert_eq!(snapshot.pagination.total, 5);
    assert_eq!(snapshot.pagination.total_pages, 1);
    assert_eq!(snapshot.stats.count("drill"), 2);
    assert_eq!(snapshot.stats.count("saw"), 2);
    mock.verify();
}

#[tokio::test]
async fn test_filter_change_returns_to_first_page() {
    let many: Vec<Gadget> = (1..=25)
        .map(|id| {
            let kind = if id % 5 == 0 { "sander" } else { "drill" };
            gadget(id, &format!("Gadget {id}"), kind, day(1, 1))
        })
        .collect();
    let mock = MockClient::<Gadget>::new();
    for _ in 0..3 {
        mock.expect_list().return_ok(Page::single(many.clone()));
    }

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    handle.update_filters(FilterPatch::new().page(3)).await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.pagination.page, 3);
    assert_eq!(snapshot.items.len(), 5);

    handle
        .update_filters(FilterPatch::new().set("kind", "sander"))
        .await
        .unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.filters.page(), 1);
    assert_eq!(snapshot.pagination.page, 1);
    assert_eq!(snapshot.pagination.total, 5);
    assert_eq!(snapshot.pagination.total_pages, 1);
    assert!(snapshot.items.iter().all(|g| g.kind == "sander"));
    mock.verify();
}

#[tokio::test]
async fn test_stale_list_response_is_discarded() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    let slow = mock
        .expect_list()
        .with_filters(searching("alpha"))
        .gated()
        .return_ok(Page::single(vec![gadget(1, "Alpha drill", "drill", day(1, 10))]));
    mock.expect_list()
        .with_filters(searching("saw"))
        .return_ok(Page::single(gadgets()));

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    handle.update_filters(FilterPatch::new().search("alpha")).await.unwrap();
    handle.update_filters(FilterPatch::new().search("saw")).await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.items.len(), 2);

    // The earlier request resolves last and must not overwrite the newer result.
    slow.release();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.status, QueryStatus::Loaded);
    assert_eq!(snapshot.filters.search(), Some("saw"));
    let names: Vec<&str> = snapshot.items.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Beta saw", "Epsilon saw"]);
    mock.verify();
}

#[tokio::test]
async fn test_create_then_refetch_includes_new_entity() {
    let created = gadget(6, "Zeta drill", "drill", day(5, 1));
    let mut after = gadgets();
    after.push(created.clone());

    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_create().return_ok(created.clone());
    mock.expect_list().return_ok(Page::single(after));

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();
    handle.open_create().await.unwrap();

    let result = handle.create(input("Zeta drill", "drill")).await.unwrap();
    assert_eq!(result, created);

    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.contains(&6));
    assert_eq!(snapshot.stats.count("drill"), 3);
    assert_eq!(snapshot.selection.mode(), DialogMode::None);
    assert_eq!(snapshot.mutations.create, MutationStatus::Succeeded);
    mock.verify();
}

#[tokio::test]
async fn test_update_closes_edit_dialog_and_refetches() {
    let renamed = gadget(2, "Beta saw XL", "saw", day(2, 12));
    let mut after = gadgets();
    after[1] = renamed.clone();

    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_update(2).return_ok(renamed.clone());
    mock.expect_list().return_ok(Page::single(after));

    let handle = spawn(&mock, PaginationMode::Client);
    let snapshot = handle.settled().await.unwrap();
    handle.open_edit(snapshot.items[1].clone()).await.unwrap();

    handle.update(2, input("Beta saw XL", "saw")).await.unwrap();

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.selection.mode(), DialogMode::None);
    assert_eq!(snapshot.items[1].name, "Beta saw XL");
    assert_eq!(snapshot.mutations.update, MutationStatus::Succeeded);
    mock.verify();
}

#[tokio::test]
async fn test_confirm_delete_removes_entity_and_recomputes_stats() {
    let after: Vec<Gadget> = gadgets().into_iter().filter(|g| g.id != 4).collect();

    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_delete(4).return_ok(());
    mock.expect_list().return_ok(Page::single(after));

    let handle = spawn(&mock, PaginationMode::Client);
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.stats.count("sander"), 1);

    handle.open_delete(snapshot.items[3].clone()).await.unwrap();
    assert!(handle.confirm_delete().await.unwrap());

    let snapshot = handle.settled().await.unwrap();
    assert!(!snapshot.contains(&4));
    assert_eq!(snapshot.stats.total, 4);
    assert_eq!(snapshot.stats.count("sander"), 0);
    assert_eq!(snapshot.selection.mode(), DialogMode::None);
    mock.verify();
}

#[tokio::test]
async fn test_failed_delete_closes_confirmation_and_keeps_data() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_delete(1)
        .return_err(ResourceError::Network("timeout".into()));

    let handle = spawn(&mock, PaginationMode::Client);
    let mut notices = handle.notices();
    let snapshot = handle.settled().await.unwrap();
    handle.open_delete(snapshot.items[0].clone()).await.unwrap();

    let result = handle.confirm_delete().await;
    assert!(matches!(result, Err(ResourceError::Network(_))));

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.selection.mode(), DialogMode::None);
    assert!(snapshot.contains(&1));
    assert_eq!(snapshot.items.len(), 5);
    assert!(matches!(
        snapshot.mutations.delete,
        MutationStatus::Failed(ResourceError::Network(_))
    ));

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.resource, "gadget");
    assert_eq!(notice.action, "delete");
    assert!(notice.message.contains("timeout"));
    mock.verify();
}

#[tokio::test]
async fn test_confirm_delete_without_target_does_nothing() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    assert!(!handle.confirm_delete().await.unwrap());
    mock.verify();
}

#[tokio::test]
async fn test_delete_of_missing_id_still_invalidates() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_delete(42)
        .return_err(ResourceError::NotFound("42".into()));
    mock.expect_list().return_ok(Page::single(gadgets()));

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    let result = handle.remove(42).await;
    assert!(matches!(result, Err(ResourceError::NotFound(_))));

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.status, QueryStatus::Loaded);
    assert_eq!(mock.list_calls().len(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_validation_errors_go_to_the_form() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_create()
        .return_err(ResourceError::invalid_field("name", "required"));

    let handle = spawn(&mock, PaginationMode::Client);
    let mut notices = handle.notices();
    handle.settled().await.unwrap();
    handle.open_create().await.unwrap();

    let result = handle.create(input("", "drill")).await;
    assert!(matches!(result, Err(ResourceError::Validation { .. })));

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.form_errors["name"], vec!["required".to_string()]);
    assert_eq!(snapshot.selection.mode(), DialogMode::Create);
    assert_eq!(snapshot.items.len(), 5);
    assert!(notices.try_recv().is_err());

    handle.close_dialog().await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.form_errors.is_empty());
    assert_eq!(snapshot.mutations.create, MutationStatus::Idle);
    mock.verify();
}

#[tokio::test]
async fn test_list_failure_is_retried_then_reported() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list()
        .return_err(ResourceError::Network("connection refused".into()));
    mock.expect_list()
        .return_err(ResourceError::Network("connection refused".into()));
    mock.expect_list().return_ok(Page::single(gadgets()));

    let (controller, handle) =
        ResourceController::new(mock.clone(), test_config(1), PaginationMode::Client);
    tokio::spawn(controller.run());
    let mut notices = handle.notices();

    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.is_error());
    assert!(matches!(snapshot.error, Some(ResourceError::Network(_))));
    assert!(snapshot.items.is_empty());
    assert_eq!(mock.list_calls().len(), 2);
    assert_eq!(notices.recv().await.unwrap().action, "list");

    handle.retry().await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.status, QueryStatus::Loaded);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.items.len(), 5);
    mock.verify();
}

#[tokio::test]
async fn test_rejected_filters_are_not_retried() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list()
        .return_err(ResourceError::invalid_field("date_start", "invalid date"));

    let (controller, handle) =
        ResourceController::new(mock.clone(), test_config(3), PaginationMode::Client);
    tokio::spawn(controller.run());

    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.is_error());
    assert_eq!(mock.list_calls().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_items() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_list()
        .return_err(ResourceError::Network("gateway timeout".into()));

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    handle.update_filters(FilterPatch::new().set("kind", "saw")).await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert!(snapshot.is_error());
    assert_eq!(snapshot.items.len(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_new_dialog_replaces_the_open_one() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));

    let handle = spawn(&mock, PaginationMode::Client);
    let snapshot = handle.settled().await.unwrap();

    handle.open_edit(snapshot.items[0].clone()).await.unwrap();
    assert_eq!(handle.settled().await.unwrap().selection.mode(), DialogMode::Edit);

    handle.open_create().await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.selection.mode(), DialogMode::Create);
    assert!(snapshot.selection.active_entity().is_none());
    mock.verify();
}

#[tokio::test]
async fn test_reset_filters_is_idempotent() {
    let mock = MockClient::<Gadget>::new();
    for _ in 0..3 {
        mock.expect_list().return_ok(Page::single(gadgets()));
    }

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();
    handle.update_filters(FilterPatch::new().search("drill")).await.unwrap();
    handle.settled().await.unwrap();

    handle.reset_filters().await.unwrap();
    let once = handle.settled().await.unwrap();
    handle.reset_filters().await.unwrap();
    let twice = handle.settled().await.unwrap();

    assert_eq!(once.filters, FilterState::new(10));
    assert_eq!(once.filters, twice.filters);
    assert_eq!(once.items, twice.items);
    assert_eq!(mock.list_calls().len(), 3);
    mock.verify();
}

#[tokio::test]
async fn test_server_mode_uses_the_envelope() {
    let page = Page {
        data: vec![gadget(3, "Gamma drill", "drill", day(3, 5))],
        total: 12,
        page: 2,
        limit: 1,
        total_pages: 12,
    };
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::empty(10));
    mock.expect_list().return_ok(page);

    let handle = spawn(&mock, PaginationMode::Server);
    handle.settled().await.unwrap();

    handle
        .update_filters(FilterPatch::new().page(2).limit(1))
        .await
        .unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.pagination.total, 12);
    assert_eq!(snapshot.pagination.page, 2);
    assert_eq!(snapshot.pagination.total_pages, 12);

    let calls = mock.list_calls();
    assert_eq!(calls[1].page(), 2);
    assert_eq!(calls[1].limit(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_server_page_beyond_the_last_is_refetched() {
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::empty(10));
    mock.expect_list().return_ok(Page {
        data: Vec::new(),
        total: 12,
        page: 9,
        limit: 10,
        total_pages: 2,
    });
    mock.expect_list().return_ok(Page {
        data: gadgets()[..2].to_vec(),
        total: 12,
        page: 2,
        limit: 10,
        total_pages: 2,
    });

    let handle = spawn(&mock, PaginationMode::Server);
    handle.settled().await.unwrap();

    handle.update_filters(FilterPatch::new().page(9)).await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.status, QueryStatus::Loaded);
    assert_eq!(snapshot.pagination.page, 2);
    assert_eq!(snapshot.pagination.total_pages, 2);
    assert_eq!(snapshot.filters.page(), 2);
    assert_eq!(snapshot.items.len(), 2);

    let calls = mock.list_calls();
    assert_eq!(calls[1].page(), 9);
    assert_eq!(calls[2].page(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_detail_reads_are_cached_until_update() {
    let renamed = gadget(1, "Alpha drill Pro", "drill", day(1, 10));
    let mock = MockClient::<Gadget>::new();
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_get(1).return_ok(gadgets()[0].clone());
    mock.expect_update(1).return_ok(renamed.clone());
    mock.expect_list().return_ok(Page::single(gadgets()));
    mock.expect_get(1).return_ok(renamed.clone());

    let handle = spawn(&mock, PaginationMode::Client);
    handle.settled().await.unwrap();

    assert_eq!(handle.get(1).await.unwrap().name, "Alpha drill");
    // Served from the cache; a second backend read would be unexpected.
    assert_eq!(handle.get(1).await.unwrap().name, "Alpha drill");

    handle.update(1, input("Alpha drill Pro", "drill")).await.unwrap();
    handle.settled().await.unwrap();
    assert_eq!(handle.get(1).await.unwrap(), renamed);
    mock.verify();
}

#[tokio::test]
async fn test_dropping_the_handle_ignores_late_responses() {
    let mock = MockClient::<Gadget>::new();
    let gate = mock
        .expect_list()
        .gated()
        .return_ok(Page::single(gadgets()));

    let (controller, handle) =
        ResourceController::new(mock.clone(), test_config(0), PaginationMode::Client);
    let task = tokio::spawn(controller.run());
    let snapshots = handle.subscribe();

    drop(handle);
    task.await.expect("controller task panicked");

    gate.release();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(snapshots.borrow().status, QueryStatus::Loading);
    assert!(snapshots.borrow().items.is_empty());
    mock.verify();
}

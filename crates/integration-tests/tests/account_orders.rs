//! Account page: order history, roles and status updates.

#![allow(clippy::unwrap_used)]

use vinsara_core::{OrderId, OrderStatus, PaymentStatus};
use vinsara_integration_tests::{FakeStoreApi, Failure, Op, order};
use vinsara_storefront::account::orders::{BadgeTone, StatusBadge, format_date, product_slug};
use vinsara_storefront::account::{AccountTab, AccountView, PageLink};
use vinsara_storefront::api::UserProfile;
use vinsara_storefront::notify::{Notification, NotificationQueue};
use vinsara_storefront::session::Session;
use vinsara_storefront::storage::{ClientStorage, MemoryStorage, keys};
use vinsara_storefront::views::Route;

fn signed_in() -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.set_item(keys::USER_TOKEN, "tok_5b1e").unwrap();
    storage
}

fn staff() -> UserProfile {
    UserProfile {
        username: Some("ops".to_string()),
        is_staff: true,
        ..UserProfile::default()
    }
}

/// 45 paid orders interleaved with 5 pending ones.
fn mixed_orders() -> Vec<vinsara_storefront::api::Order> {
    (1..=50)
        .map(|id| {
            let payment = if id % 10 == 5 {
                PaymentStatus::Pending
            } else {
                PaymentStatus::Paid
            };
            order(id, payment, 3)
        })
        .collect()
}

#[tokio::test]
async fn test_mount_without_token_redirects_to_login() {
    let api = FakeStoreApi::new().with_orders(mixed_orders());
    let storage = MemoryStorage::new();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();

    let route = account
        .mount(&api, &Session::new(&storage), &notifier)
        .await;

    assert_eq!(route, Some(Route::Login));
    assert!(api.calls().is_empty());
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_customer_pages_through_paid_orders() {
    let api = FakeStoreApi::new().with_orders(mixed_orders());
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();

    assert_eq!(
        account.mount(&api, &Session::new(&storage), &notifier).await,
        None
    );
    assert_eq!(api.calls(), vec![Op::Profile, Op::UserOrders]);
    assert!(!account.is_admin());

    let history = account.orders_mut();
    assert_eq!(history.visible_count(), 45);
    assert!(history.visible().all(|o| o.payment_status.is_paid()));

    let pager = *history.paginator();
    assert_eq!(pager.total_pages(), 3);
    assert!(pager.show_controls());
    assert_eq!(pager.range_label().as_deref(), Some("Showing 1–20 of 45"));
    assert_eq!(history.current_page().len(), 20);

    history.go_to_page(3);
    assert_eq!(history.current_page().len(), 5);
    assert_eq!(
        history.paginator().range_label().as_deref(),
        Some("Showing 41–45 of 45")
    );
    assert_eq!(
        history.paginator().window(),
        vec![
            PageLink::Page { number: 1, current: false },
            PageLink::Page { number: 2, current: false },
            PageLink::Page { number: 3, current: true },
        ]
    );

    history.go_to_page(4);
    assert_eq!(history.paginator().current(), 3);
    history.go_to_page(0);
    assert_eq!(history.paginator().current(), 1);
}

#[tokio::test]
async fn test_refetch_resets_to_first_page() {
    let api = FakeStoreApi::new().with_orders(mixed_orders());
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    account.orders_mut().go_to_page(2);
    account
        .switch_tab(AccountTab::Orders, &api, &notifier)
        .await;
    assert_eq!(account.orders().paginator().current(), 1);
    assert_eq!(api.call_count(Op::UserOrders), 2);
}

#[tokio::test]
async fn test_admin_sees_all_orders_and_updates_status() {
    let api = FakeStoreApi::new()
        .with_profile(staff())
        .with_orders(mixed_orders());
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    assert!(account.is_admin());
    assert_eq!(account.orders().visible_count(), 50);

    account
        .update_order_status(&api, &notifier, OrderId::new(5), OrderStatus::Shipped)
        .await;

    let local = account
        .orders()
        .orders()
        .iter()
        .find(|o| o.id == OrderId::new(5))
        .unwrap();
    assert_eq!(local.order_status, OrderStatus::Shipped);
    let remote = api
        .orders()
        .into_iter()
        .find(|o| o.id == OrderId::new(5))
        .unwrap();
    assert_eq!(remote.order_status, OrderStatus::Shipped);
    assert_eq!(
        notifier.drain(),
        vec![Notification::success("Order status updated")]
    );
}

#[tokio::test]
async fn test_status_update_failure_keeps_local_status() {
    let api = FakeStoreApi::new()
        .with_profile(staff())
        .with_orders(vec![order(1, PaymentStatus::Paid, 1)]);
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    api.fail(Op::UpdateOrderStatus, Failure::Status(500));
    account
        .update_order_status(&api, &notifier, OrderId::new(1), OrderStatus::Delivered)
        .await;

    assert_eq!(
        account.orders().orders()[0].order_status,
        OrderStatus::Processing
    );
    assert_eq!(
        notifier.drain(),
        vec![Notification::error("Failed to update status")]
    );
}

#[tokio::test]
async fn test_customer_cannot_update_status() {
    let api = FakeStoreApi::new().with_orders(vec![order(1, PaymentStatus::Paid, 1)]);
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    account
        .update_order_status(&api, &notifier, OrderId::new(1), OrderStatus::Cancelled)
        .await;

    assert_eq!(api.call_count(Op::UpdateOrderStatus), 0);
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_shows_empty_list() {
    let api = FakeStoreApi::new().with_orders(mixed_orders());
    api.fail(Op::UserOrders, Failure::Status(502));
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    assert_eq!(account.orders().visible_count(), 0);
    assert_eq!(account.orders().paginator().total_pages(), 0);
    assert!(!account.orders().paginator().show_controls());
    assert_eq!(account.orders().paginator().range_label(), None);
    assert_eq!(
        notifier.drain(),
        vec![Notification::error("Could not load orders")]
    );
}

#[tokio::test]
async fn test_unauthorized_fetch_is_silent() {
    let api = FakeStoreApi::new();
    api.fail(Op::Profile, Failure::Unauthorized);
    api.fail(Op::UserOrders, Failure::Unauthorized);
    let storage = signed_in();
    let notifier = NotificationQueue::new();
    let mut account = AccountView::default();
    account.mount(&api, &Session::new(&storage), &notifier).await;

    assert!(!account.is_admin());
    assert!(account.orders().orders().is_empty());
    assert!(notifier.is_empty());
}

#[test]
fn test_orders_decode_from_backend_body() {
    let body = r#"{"count": 1, "results": [{
        "id": 88,
        "total_amount": "4398.00",
        "payment_status": "Paid",
        "order_status": "Delivered",
        "created_at": "2025-03-05T10:15:00Z",
        "shipping_address": "12 MG Road, Hyderabad",
        "phone": "9876543210",
        "items": [{
            "id": 1, "product_id": 7, "product_name": "Ikat Cotton Kurta",
            "variant_label": "L", "price": "2199.00", "quantity": 2
        }]
    }]}"#;
    let api = FakeStoreApi::new().with_orders_json(body).unwrap();
    let orders = api.orders();
    let first = &orders[0];

    assert_eq!(format_date(&first.created_at), "5 Mar 2025");
    assert_eq!(product_slug(&first.items[0]), "ikat-cotton-kurta");
    assert_eq!(StatusBadge::from(&first.order_status).tone, BadgeTone::Green);
    assert_eq!(
        vinsara_storefront::account::orders::order_total(first).display(),
        "₹4,398.00"
    );
}

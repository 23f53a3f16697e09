#![cfg(feature = "sqlite")]

use std::path::PathBuf;
use uuid::Uuid;

use stockroom_repo::sqlite::SqliteStore;
use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::Supplier;
use stockroom_types::domain::user::{Role, User, UserStatus};
use stockroom_types::ports::{
    OrderRepository, ProductRepository, StockDecrement, SupplierRepository, UserRepository,
};

fn temp_db_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push(format!("stockroom-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

#[tokio::test]
async fn product_round_trip_with_optional_fields() {
    let (_dir, url) = temp_db_url();
    let store = SqliteStore::new(&url).await.unwrap();

    let supplier_id = Uuid::new_v4();
    let product = Product::new(
        "Widget".into(),
        "W-1".into(),
        7,
        1250,
        Some("tools".into()),
        Some(supplier_id),
        Some("http://localhost:3000/uploads/widget.png".into()),
    )
    .unwrap();

    store.create_product(product.clone()).await.unwrap();
    let fetched = store.get_product(product.id).await.unwrap().unwrap();
    assert_eq!(fetched.category.as_deref(), Some("tools"));
    assert_eq!(fetched.supplier_id, Some(supplier_id));

    let bare = Product::new("Bolt".into(), "B-1".into(), 2, 10, None, None, None).unwrap();
    store.create_product(bare.clone()).await.unwrap();
    let fetched = store.get_product(bare.id).await.unwrap().unwrap();
    assert!(fetched.category.is_none());
    assert!(fetched.supplier_id.is_none());
    assert!(fetched.image_url.is_none());

    assert_eq!(store.list_products().await.unwrap().len(), 2);
    assert!(store.delete_product(bare.id).await.unwrap());
}

#[tokio::test]
async fn decrement_is_conditional_update() {
    let (_dir, url) = temp_db_url();
    let store = SqliteStore::new(&url).await.unwrap();

    let product = Product::new("Widget".into(), "W-1".into(), 3, 500, None, None, None).unwrap();
    store.create_product(product.clone()).await.unwrap();

    match store.decrement_quantity(product.id, 2).await.unwrap() {
        StockDecrement::Applied(p) => assert_eq!(p.quantity, 1),
        other => panic!("expected Applied, got {other:?}"),
    }
    match store.decrement_quantity(product.id, 2).await.unwrap() {
        StockDecrement::Insufficient(p) => assert_eq!(p.quantity, 1),
        other => panic!("expected Insufficient, got {other:?}"),
    }
    assert!(matches!(
        store.decrement_quantity(Uuid::new_v4(), 1).await.unwrap(),
        StockDecrement::Missing
    ));
}

#[tokio::test]
async fn order_round_trip_preserves_items_and_timestamps() {
    let (_dir, url) = temp_db_url();
    let store = SqliteStore::new(&url).await.unwrap();

    let order = Order::new(
        "ORD-9".into(),
        "Bob".into(),
        vec![
            OrderItem {
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price_cents: 300,
            },
            OrderItem {
                product_id: Uuid::new_v4(),
                quantity: 1,
                unit_price_cents: 150,
            },
        ],
        OrderStatus::Pending,
        750,
    )
    .unwrap();
    store.create_order(order.clone()).await.unwrap();

    let fetched = store.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(fetched.items.len(), 2);
    assert_eq!(fetched.items[0].unit_price_cents, 300);
    assert_eq!(fetched.created_at, order.created_at);

    let mut replaced = fetched.clone();
    replaced
        .overwrite(
            "ORD-9".into(),
            "Bob".into(),
            replaced.items.clone(),
            OrderStatus::Completed,
            750,
        )
        .unwrap();
    let stored = store.update_order(replaced).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Completed);
    assert_eq!(stored.created_at, order.created_at);

    let missing = store
        .update_order(
            Order::new(
                "ORD-X".into(),
                "Nobody".into(),
                vec![OrderItem {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                    unit_price_cents: 1,
                }],
                OrderStatus::Pending,
                1,
            )
            .unwrap(),
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn supplier_and_user_round_trips() {
    let (_dir, url) = temp_db_url();
    let store = SqliteStore::new(&url).await.unwrap();

    let supplier = Supplier::new(
        "Acme".into(),
        "Jo".into(),
        "jo@acme.example".into(),
        "555-0100".into(),
        None,
    )
    .unwrap();
    store.create_supplier(supplier.clone()).await.unwrap();
    let found = store
        .find_supplier_by_email("jo@acme.example")
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, supplier.id);

    let user = User::new(
        "Ana".into(),
        "ana@example.com".into(),
        "hunter2".into(),
        Role::Admin,
    )
    .unwrap();
    store.create_user(user.clone()).await.unwrap();
    let fetched = store.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.role, Role::Admin);
    assert_eq!(fetched.password, "hunter2");

    let flipped = store
        .set_user_status(user.id, UserStatus::Inactive)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(flipped.status, UserStatus::Inactive);

    assert!(store.delete_user(user.id).await.unwrap());
    assert!(store.get_user(user.id).await.unwrap().is_none());
}

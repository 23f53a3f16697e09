#![cfg(feature = "memory")]

use stockroom_repo::memory::InMemoryStore;
use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::{Supplier, SupplierStatus};
use stockroom_types::domain::user::{Role, User, UserStatus};
use stockroom_types::ports::{
    OrderRepository, ProductRepository, StockDecrement, SupplierRepository, UserRepository,
};

fn widget(quantity: i64) -> Product {
    Product::new(
        "Widget".into(),
        "W-1".into(),
        quantity,
        500,
        None,
        None,
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn product_crud_flow() {
    let store = InMemoryStore::new();
    let product = widget(5);

    let created = store.create_product(product.clone()).await.unwrap();
    assert_eq!(created.id, product.id);

    let fetched = store.get_product(product.id).await.unwrap().unwrap();
    assert_eq!(fetched.sku, "W-1");

    let mut changed = fetched.clone();
    changed.quantity = 9;
    let updated = store.update_product(changed).await.unwrap().unwrap();
    assert_eq!(updated.quantity, 9);

    assert_eq!(store.list_products().await.unwrap().len(), 1);

    assert!(store.delete_product(product.id).await.unwrap());
    assert!(store.get_product(product.id).await.unwrap().is_none());
}

#[tokio::test]
async fn decrement_stops_at_floor() {
    let store = InMemoryStore::new();
    let product = store.create_product(widget(3)).await.unwrap();

    match store.decrement_quantity(product.id, 3).await.unwrap() {
        StockDecrement::Applied(p) => assert_eq!(p.quantity, 0),
        other => panic!("expected Applied, got {other:?}"),
    }

    // Quantity is zero now; another decrement must refuse and leave it alone.
    match store.decrement_quantity(product.id, 1).await.unwrap() {
        StockDecrement::Insufficient(p) => assert_eq!(p.quantity, 0),
        other => panic!("expected Insufficient, got {other:?}"),
    }

    let unknown = uuid::Uuid::new_v4();
    assert!(matches!(
        store.decrement_quantity(unknown, 1).await.unwrap(),
        StockDecrement::Missing
    ));
}

#[tokio::test]
async fn supplier_email_lookup() {
    let store = InMemoryStore::new();
    let supplier = Supplier::new(
        "Acme".into(),
        "Jo".into(),
        "jo@acme.example".into(),
        "555-0100".into(),
        Some(SupplierStatus::Inactive),
    )
    .unwrap();
    store.create_supplier(supplier.clone()).await.unwrap();

    // Status does not matter for the lookup.
    let found = store
        .find_supplier_by_email("jo@acme.example")
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, supplier.id);

    let missing = store.find_supplier_by_email("nobody@acme.example").await;
    assert!(missing.unwrap().is_none());
}

#[tokio::test]
async fn order_update_is_full_replace() {
    let store = InMemoryStore::new();
    let item = OrderItem {
        product_id: uuid::Uuid::new_v4(),
        quantity: 2,
        unit_price_cents: 500,
    };
    let order = Order::new(
        "ORD-1".into(),
        "Alice".into(),
        vec![item.clone()],
        OrderStatus::Pending,
        1000,
    )
    .unwrap();
    store.create_order(order.clone()).await.unwrap();

    let mut replaced = order.clone();
    replaced
        .overwrite(
            "ORD-1R".into(),
            "Alice B".into(),
            vec![item],
            OrderStatus::Cancelled,
            1000,
        )
        .unwrap();
    let stored = store.update_order(replaced).await.unwrap().unwrap();
    assert_eq!(stored.order_number, "ORD-1R");
    assert_eq!(stored.status, OrderStatus::Cancelled);

    assert!(store.delete_order(order.id).await.unwrap());
    assert!(!store.delete_order(order.id).await.unwrap());
}

#[tokio::test]
async fn user_status_flip_and_email_lookup() {
    let store = InMemoryStore::new();
    let user = User::new(
        "Ana".into(),
        "ana@example.com".into(),
        "hunter2".into(),
        Role::Employee,
    )
    .unwrap();
    store.create_user(user.clone()).await.unwrap();

    let found = store.find_user_by_email("ana@example.com").await.unwrap();
    assert_eq!(found.unwrap().id, user.id);

    let flipped = store
        .set_user_status(user.id, UserStatus::Inactive)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(flipped.status, UserStatus::Inactive);
    // Role untouched by the status write.
    assert_eq!(flipped.role, Role::Employee);

    let missing = store
        .set_user_status(uuid::Uuid::new_v4(), UserStatus::Active)
        .await
        .unwrap();
    assert!(missing.is_none());
}

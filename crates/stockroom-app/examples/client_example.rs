///  To run :
///  cargo r --example client_example
use stockroom_client::{
    CreateProductRequest, LoginRequest, OrderRequest, StockroomClient, SupplierRequest,
};
use stockroom_hex::auth::TokenSigner;
use stockroom_hex::domain::order::{OrderItem, OrderStatus};
use stockroom_hex::domain::user::{Role, User};
use stockroom_hex::inbound::http::{HttpServer, HttpServerConfig};
use stockroom_hex::ports::UserRepository;
use stockroom_repo::build_store;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // File-backed SQLite so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("stockroom.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let store = build_store(Some(&db_url)).await?;
    let admin = User::new(
        "Administrator".into(),
        "admin@example.com".into(),
        "admin-pass".into(),
        Role::Admin,
    )?;
    store.create_user(admin).await?;

    let server = HttpServer::new(
        store,
        TokenSigner::new("example-secret"),
        HttpServerConfig {
            port: port.to_string(),
            upload_dir: tmp.path().join("uploads"),
            public_url: None,
        },
    )
    .await?;
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // Log in, then talk to the API with the bearer token installed.
    let session = StockroomClient::new(&addr)?
        .login(LoginRequest {
            email: "admin@example.com".into(),
            password: "admin-pass".into(),
        })
        .await?;
    println!("Logged in as {}", session.user.name);

    let client = StockroomClient::builder(&addr)?
        .with_bearer_token(&session.token)?
        .build()?;

    let supplier = client
        .create_supplier(SupplierRequest {
            name: "Acme".into(),
            contact: "Jo Doe".into(),
            email: "jo@acme.example".into(),
            phone: "555-0100".into(),
            status: None,
        })
        .await?;
    println!("Created supplier {}", supplier.name);

    let product = client
        .create_product(CreateProductRequest {
            name: "Widget".into(),
            sku: "W-1".into(),
            quantity: 5,
            price_cents: 500,
            category: Some("tools".into()),
            supplier_id: Some(supplier.id),
            image: None,
        })
        .await?;
    println!("Created product {} (stock {})", product.name, product.quantity);

    let order = client
        .place_order(OrderRequest {
            order_number: "ORD-1".into(),
            customer: "Alice".into(),
            items: vec![OrderItem {
                product_id: product.id,
                quantity: 2,
                unit_price_cents: 500,
            }],
            status: OrderStatus::Pending,
            total_cents: 1000,
        })
        .await?;
    println!("Placed order {} ({:?})", order.order_number, order.status);

    // Completing the order decrements the stock.
    let completed = client
        .correct_order(
            &order.id.to_string(),
            OrderRequest {
                order_number: order.order_number.clone(),
                customer: order.customer.clone(),
                items: order.items.clone(),
                status: OrderStatus::Completed,
                total_cents: order.total_cents,
            },
        )
        .await?;
    println!("Completed order {:?}", completed.status);

    let products = client.list_products().await?;
    println!("Stock after completion: {}", products[0].quantity);
    assert_eq!(products[0].quantity, 3);

    let summary = client.dashboard().await?;
    println!(
        "Dashboard: {} completed, revenue {} cents this month",
        summary.stats.completed_orders, summary.stats.monthly_revenue_cents
    );

    handle.abort();
    Ok(())
}

use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::{Supplier, SupplierStatus};
use stockroom_types::domain::user::{Role, UserStatus, UserView};

#[derive(Clone)]
pub struct StockroomClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct StockroomClient {
    base: Url,
    client: reqwest::Client,
}

impl StockroomClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<StockroomClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(StockroomClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    // --- session ---

    pub async fn login(&self, req: LoginRequest) -> anyhow::Result<LoginResponse> {
        let res = self
            .client
            .post(self.url("users/login")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        self.client
            .post(self.url("users/logout")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // --- products ---

    pub async fn create_product(&self, req: CreateProductRequest) -> anyhow::Result<Product> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", req.name)
            .text("sku", req.sku)
            .text("quantity", req.quantity.to_string())
            .text("price_cents", req.price_cents.to_string());
        if let Some(category) = req.category {
            form = form.text("category", category);
        }
        if let Some(supplier_id) = req.supplier_id {
            form = form.text("supplier_id", supplier_id.to_string());
        }
        if let Some(image) = req.image {
            form = form.part(
                "image",
                reqwest::multipart::Part::bytes(image.bytes).file_name(image.filename),
            );
        }
        let res = self
            .client
            .post(self.url("products")?)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_products(&self) -> anyhow::Result<Vec<ProductDetail>> {
        let res = self
            .client
            .get(self.url("products")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_product(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> anyhow::Result<Product> {
        let res = self
            .client
            .put(self.url(&format!("products/{id}"))?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_product(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("products/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // --- suppliers ---

    pub async fn create_supplier(&self, req: SupplierRequest) -> anyhow::Result<Supplier> {
        let res = self
            .client
            .post(self.url("suppliers")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        let res = self
            .client
            .get(self.url("suppliers")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        req: SupplierRequest,
    ) -> anyhow::Result<Supplier> {
        let res = self
            .client
            .put(self.url(&format!("suppliers/{id}"))?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_supplier(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("suppliers/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // --- orders ---

    pub async fn place_order(&self, req: OrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("orders")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    /// Full overwrite of an existing order; transitioning it into Completed
    /// reconciles stock server-side.
    pub async fn correct_order(&self, id: &str, req: OrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("orders/{id}"))?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<OrderDetail>> {
        let res = self
            .client
            .get(self.url("orders")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_order(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("orders/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // --- employees ---

    pub async fn register_employee(&self, req: RegisterRequest) -> anyhow::Result<UserView> {
        let res = self
            .client
            .post(self.url("users/register")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_employees(&self) -> anyhow::Result<Vec<UserView>> {
        let res = self
            .client
            .get(self.url("users/employees")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_employee(&self, id: &str) -> anyhow::Result<UserView> {
        let res = self
            .client
            .get(self.url(&format!("users/employees/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_employee(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("users/employees/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn set_employee_status(
        &self,
        id: &str,
        status: UserStatus,
    ) -> anyhow::Result<UserView> {
        let res = self
            .client
            .patch(self.url(&format!("users/employees/{id}"))?)
            .json(&StatusRequest { status })
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    // --- dashboard ---

    pub async fn dashboard(&self) -> anyhow::Result<DashboardSummary> {
        let res = self
            .client
            .get(self.url("dashboard")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl StockroomClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Installs the default Authorization header used by every call.
    pub fn with_bearer_token(self, token: &str) -> anyhow::Result<Self> {
        self.with_header("authorization", format!("Bearer {token}"))
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<StockroomClient> {
        if let Some(client) = self.client {
            return Ok(StockroomClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(StockroomClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub category: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub image: Option<ImageUpload>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateProductRequest {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Product as listed by the server, supplier expanded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub category: Option<String>,
    pub supplier: Option<Supplier>,
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SupplierRequest {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SupplierStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderRequest {
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_cents: i64,
}

/// Order as listed by the server, line-item products expanded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderDetail {
    pub id: Uuid,
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItemDetail>,
    pub total_cents: i64,
    pub status: OrderStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderItemDetail {
    pub product_id: Uuid,
    pub product: Option<Product>,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct StatusRequest {
    status: UserStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    pub pending_orders: usize,
    pub total_suppliers: usize,
    pub completed_orders: usize,
    pub monthly_revenue_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SalesPoint {
    pub name: String,
    pub sales_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub sales_trends: Vec<SalesPoint>,
}

// In-memory stand-in for the shopping backend, served over real HTTP.
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use inventory_client::{
    config::ClientConfig,
    models::{Category, Product, Seller},
    state::AppState,
};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin123";

#[derive(Default)]
struct Db {
    products: Vec<Product>,
    categories: Vec<Category>,
    sellers: Vec<Seller>,
    next_id: i64,
}

impl Db {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct Faults {
    // Fail this many upcoming requests, whatever they are.
    next: usize,
    // Fail every request to these routes.
    routes: HashSet<&'static str>,
    // Hold back the next replies of a route, after its data has been read.
    delays: HashMap<&'static str, VecDeque<Duration>>,
}

#[derive(Default)]
pub struct Backend {
    db: Mutex<Db>,
    faults: Mutex<Faults>,
    log: Mutex<Vec<&'static str>>,
    // Answer bad credentials with `200 {"success": false}` instead of `401`.
    soft_login_failures: AtomicBool,
}

impl Backend {
    fn hit(&self, route: &'static str) -> Result<(), StatusCode> {
        self.log.lock().unwrap().push(route);
        let mut faults = self.faults.lock().unwrap();
        if faults.routes.contains(route) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        if faults.next > 0 {
            faults.next -= 1;
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }

    pub fn fail_next(&self, count: usize) {
        self.faults.lock().unwrap().next = count;
    }

    pub fn fail_route(&self, route: &'static str) {
        self.faults.lock().unwrap().routes.insert(route);
    }

    pub fn delay_next(&self, route: &'static str, delay: Duration) {
        let mut faults = self.faults.lock().unwrap();
        faults.delays.entry(route).or_default().push_back(delay);
    }

    async fn stall(&self, route: &'static str) {
        let delay = self
            .faults
            .lock()
            .unwrap()
            .delays
            .get_mut(route)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn soft_login_failures(&self) {
        self.soft_login_failures.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        *self.faults.lock().unwrap() = Faults::default();
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }

    pub fn add_category(&self, name: &str) -> i64 {
        let mut db = self.db.lock().unwrap();
        let id = db.next_id();
        db.categories.push(Category {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Insert directly, bypassing the API and the request log.
    pub fn insert_product(&self, product: Product) {
        let mut db = self.db.lock().unwrap();
        db.next_id = db.next_id.max(product.id);
        db.products.push(product);
    }

    pub fn products(&self) -> Vec<Product> {
        self.db.lock().unwrap().products.clone()
    }

    pub fn insert_seller(&self, seller: Seller) {
        let mut db = self.db.lock().unwrap();
        db.next_id = db.next_id.max(seller.id);
        db.sellers.push(seller);
    }

    pub fn sellers(&self) -> Vec<Seller> {
        self.db.lock().unwrap().sellers.clone()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<Backend>,
}

impl TestServer {
    pub async fn start() -> anyhow::Result<Self> {
        let backend = Arc::new(Backend::default());
        let app = router(Arc::clone(&backend));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url: format!("http://{addr}/api"),
            backend,
        })
    }

    /// Server preloaded with the categories the shop ships with.
    pub async fn with_catalog() -> anyhow::Result<Self> {
        let server = Self::start().await?;
        for name in ["Electronics", "Books", "Food"] {
            server.backend.add_category(name);
        }
        Ok(server)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(self.base_url.clone())
    }

    pub fn state(&self) -> anyhow::Result<AppState> {
        AppState::new(&self.config())
    }
}

pub fn product(id: i64, name: &str, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        category_name: category.to_string(),
        price: 10.0,
        stock: 1,
        image_url: None,
    }
}

type Shared = Arc<Backend>;
type Reply = Result<Json<Value>, StatusCode>;

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route("/api/categories", get(list_categories))
        .route("/api/sellers", get(list_sellers).post(create_seller))
        .route("/api/sellers/{id}", put(update_seller).delete(delete_seller))
        .route("/api/dashboard/stats", get(stats))
        .route("/api/auth/login", post(login))
        .with_state(backend)
}

fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

async fn list_products(State(b): State<Shared>) -> Reply {
    b.hit("products.list")?;
    let body = json!(b.db.lock().unwrap().products);
    b.stall("products.list").await;
    Ok(Json(body))
}

async fn create_product(State(b): State<Shared>, Json(body): Json<Value>) -> Reply {
    b.hit("products.create")?;
    let mut db = b.db.lock().unwrap();
    let category_name = str_field(&body, "categoryName").unwrap_or_default();
    // The real backend resolves the category by name and refuses unknown ones.
    if !db.categories.iter().any(|c| c.name == category_name) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let id = db.next_id();
    let product = Product {
        id,
        name: str_field(&body, "name").unwrap_or_default(),
        category_name,
        price: body.get("price").and_then(Value::as_f64).unwrap_or(0.0),
        stock: body.get("stock").and_then(Value::as_i64).unwrap_or(0) as i32,
        image_url: None,
    };
    db.products.push(product.clone());
    Ok(Json(json!(product)))
}

async fn update_product(
    State(b): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    b.hit("products.update")?;
    let mut db = b.db.lock().unwrap();
    let product = db
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = str_field(&body, "name") {
        product.name = name;
    }
    if let Some(category) = str_field(&body, "categoryName") {
        product.category_name = category;
    }
    if let Some(price) = body.get("price").and_then(Value::as_f64) {
        product.price = price;
    }
    if let Some(stock) = body.get("stock").and_then(Value::as_i64) {
        product.stock = stock as i32;
    }
    Ok(Json(json!(product.clone())))
}

async fn delete_product(State(b): State<Shared>, Path(id): Path<i64>) -> Reply {
    b.hit("products.delete")?;
    let mut db = b.db.lock().unwrap();
    let before = db.products.len();
    db.products.retain(|p| p.id != id);
    if db.products.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!("Product deleted successfully")))
}

async fn list_categories(State(b): State<Shared>) -> Reply {
    b.hit("categories.list")?;
    let body = json!(b.db.lock().unwrap().categories);
    b.stall("categories.list").await;
    Ok(Json(body))
}

async fn list_sellers(State(b): State<Shared>) -> Reply {
    b.hit("sellers.list")?;
    Ok(Json(json!(b.db.lock().unwrap().sellers)))
}

async fn create_seller(State(b): State<Shared>, Json(body): Json<Value>) -> Reply {
    b.hit("sellers.create")?;
    let mut db = b.db.lock().unwrap();
    let id = db.next_id();
    let seller = Seller {
        id,
        name: str_field(&body, "name").unwrap_or_default(),
        email: str_field(&body, "email").unwrap_or_default(),
        password: str_field(&body, "password").unwrap_or_default(),
        phone: str_field(&body, "phone"),
        address: str_field(&body, "address"),
        status_id: body.get("statusId").and_then(Value::as_i64).map(|v| v as i32),
    };
    db.sellers.push(seller.clone());
    Ok(Json(json!(seller)))
}

async fn update_seller(
    State(b): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    b.hit("sellers.update")?;
    let mut db = b.db.lock().unwrap();
    let seller = db
        .sellers
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = str_field(&body, "name") {
        seller.name = name;
    }
    if let Some(email) = str_field(&body, "email") {
        seller.email = email;
    }
    if let Some(password) = str_field(&body, "password") {
        seller.password = password;
    }
    if let Some(phone) = str_field(&body, "phone") {
        seller.phone = Some(phone);
    }
    if let Some(address) = str_field(&body, "address") {
        seller.address = Some(address);
    }
    if let Some(status) = body.get("statusId").and_then(Value::as_i64) {
        seller.status_id = Some(status as i32);
    }
    Ok(Json(json!(seller.clone())))
}

async fn delete_seller(
    State(b): State<Shared>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    b.hit("sellers.delete")?;
    let mut db = b.db.lock().unwrap();
    let before = db.sellers.len();
    db.sellers.retain(|s| s.id != id);
    if db.sellers.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn stats(State(b): State<Shared>) -> Reply {
    b.hit("dashboard.stats")?;
    let db = b.db.lock().unwrap();
    let value: f64 = db.products.iter().map(|p| p.price * f64::from(p.stock)).sum();
    let stock: i64 = db.products.iter().map(|p| i64::from(p.stock)).sum();
    Ok(Json(json!({
        "totalProducts": db.products.len(),
        "totalCategories": db.categories.len(),
        "totalInventoryValue": value,
        "totalStock": stock,
    })))
}

async fn login(State(b): State<Shared>, Json(body): Json<Value>) -> Reply {
    b.hit("auth.login")?;
    let ok = str_field(&body, "username").as_deref() == Some(USERNAME)
        && str_field(&body, "password").as_deref() == Some(PASSWORD);
    if ok {
        Ok(Json(json!({ "success": true, "message": "Login successful" })))
    } else if b.soft_login_failures.load(Ordering::SeqCst) {
        Ok(Json(json!({ "success": false, "message": "Invalid username or password" })))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

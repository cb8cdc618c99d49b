use crate::models::{
    AppUser, Brand, Category, CategoryInput, FooterEntryInput, Product, ProductInput,
    ProductType, UserInput,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository Trait
///
/// The record store behind every controller. Reads return empty results on failure,
/// writes report whether a row was affected; database errors are logged here and never
/// reach the controllers, which only show a generic "could not be saved" message.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Categories ---
    async fn list_categories(&self) -> Vec<Category>;
    // Categories with a positive home order, in home order.
    async fn home_categories(&self, limit: i64) -> Vec<Category>;
    async fn find_category(&self, id: i32) -> Option<Category>;
    async fn insert_category(&self, input: &CategoryInput) -> Option<i32>;
    async fn update_category(&self, id: i32, input: &CategoryInput) -> bool;
    async fn delete_category(&self, id: i32) -> bool;
    // Sets every home order back to 0.
    async fn reset_home_order(&self) -> bool;
    async fn set_home_order(&self, id: i32, home_order: i32) -> bool;

    // --- Products ---
    async fn list_products(&self) -> Vec<Product>;
    // Most recently created first.
    async fn latest_products(&self, limit: i64) -> Vec<Product>;
    async fn find_product(&self, id: i32) -> Option<Product>;
    async fn insert_product(&self, input: &ProductInput) -> Option<i32>;
    async fn update_product(&self, id: i32, input: &ProductInput) -> bool;
    async fn delete_product(&self, id: i32) -> bool;

    // --- Product types ---
    async fn list_types(&self) -> Vec<ProductType>;
    async fn find_type(&self, id: i32) -> Option<ProductType>;
    async fn insert_type(&self, input: &FooterEntryInput) -> Option<i32>;
    async fn update_type(&self, id: i32, input: &FooterEntryInput) -> bool;
    async fn delete_type(&self, id: i32) -> bool;

    // --- Brands ---
    async fn list_brands(&self) -> Vec<Brand>;
    async fn find_brand(&self, id: i32) -> Option<Brand>;
    async fn insert_brand(&self, input: &FooterEntryInput) -> Option<i32>;
    async fn update_brand(&self, id: i32, input: &FooterEntryInput) -> bool;
    async fn delete_brand(&self, id: i32) -> bool;

    // --- Users ---
    async fn list_users(&self) -> Vec<AppUser>;
    async fn find_user(&self, id: i32) -> Option<AppUser>;
    async fn find_user_by_email(&self, email: &str) -> Option<AppUser>;
    // Fails (None / false) when the email is already taken by another account.
    async fn insert_user(&self, input: &UserInput) -> Option<i32>;
    async fn update_user(&self, id: i32, input: &UserInput) -> bool;
    async fn delete_user(&self, id: i32) -> bool;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Schema: `migrations/`.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = "id, name, subtitle, picture, home_order, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, description, picture, price, rate, status, brand_id, category_id, type_id, created_at, updated_at";
const FOOTER_COLUMNS: &str = "id, name, footer_order, created_at, updated_at";
const USER_COLUMNS: &str =
    "id, email, password, firstname, lastname, role, status, created_at, updated_at";

// Maps an execute() result to "did it touch a row", logging failures.
fn affected(result: Result<sqlx::postgres::PgQueryResult, sqlx::Error>, op: &str) -> bool {
    match result {
        Ok(res) => res.rows_affected() > 0,
        Err(e) => {
            tracing::error!("{} error: {:?}", op, e);
            false
        }
    }
}

fn inserted(result: Result<i32, sqlx::Error>, op: &str) -> Option<i32> {
    result
        .map_err(|e| tracing::error!("{} error: {:?}", op, e))
        .ok()
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_categories(&self) -> Vec<Category> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category ORDER BY id");
        sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_categories error: {:?}", e);
                vec![]
            })
    }

    async fn home_categories(&self, limit: i64) -> Vec<Category> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE home_order > 0 ORDER BY home_order ASC LIMIT $1"
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("home_categories error: {:?}", e);
                vec![]
            })
    }

    async fn find_category(&self, id: i32) -> Option<Category> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1");
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_category error: {:?}", e);
                None
            })
    }

    async fn insert_category(&self, input: &CategoryInput) -> Option<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            "INSERT INTO category (name, subtitle, picture, home_order) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.subtitle)
        .bind(&input.picture)
        .bind(input.home_order)
        .fetch_one(&self.pool)
        .await;
        inserted(result, "insert_category")
    }

    async fn update_category(&self, id: i32, input: &CategoryInput) -> bool {
        let result = sqlx::query(
            "UPDATE category SET name = $1, subtitle = $2, picture = $3, home_order = $4, updated_at = NOW() WHERE id = $5",
        )
        .bind(&input.name)
        .bind(&input.subtitle)
        .bind(&input.picture)
        .bind(input.home_order)
        .bind(id)
        .execute(&self.pool)
        .await;
        affected(result, "update_category")
    }

    async fn delete_category(&self, id: i32) -> bool {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        affected(result, "delete_category")
    }

    async fn reset_home_order(&self) -> bool {
        match sqlx::query("UPDATE category SET home_order = 0 WHERE home_order <> 0")
            .execute(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("reset_home_order error: {:?}", e);
                false
            }
        }
    }

    async fn set_home_order(&self, id: i32, home_order: i32) -> bool {
        let result =
            sqlx::query("UPDATE category SET home_order = $1, updated_at = NOW() WHERE id = $2")
                .bind(home_order)
                .bind(id)
                .execute(&self.pool)
                .await;
        affected(result, "set_home_order")
    }

    async fn list_products(&self) -> Vec<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY id");
        sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_products error: {:?}", e);
                vec![]
            })
    }

    async fn latest_products(&self, limit: i64) -> Vec<Product> {
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("latest_products error: {:?}", e);
                vec![]
            })
    }

    async fn find_product(&self, id: i32) -> Option<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_product error: {:?}", e);
                None
            })
    }

    async fn insert_product(&self, input: &ProductInput) -> Option<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO product (name, description, picture, price, rate, status, brand_id, category_id, type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.picture)
        .bind(input.price)
        .bind(input.rate)
        .bind(input.status)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(input.type_id)
        .fetch_one(&self.pool)
        .await;
        inserted(result, "insert_product")
    }

    async fn update_product(&self, id: i32, input: &ProductInput) -> bool {
        let result = sqlx::query(
            r#"
            UPDATE product
            SET name = $1, description = $2, picture = $3, price = $4, rate = $5,
                status = $6, brand_id = $7, category_id = $8, type_id = $9,
                updated_at = NOW()
            WHERE id = $10
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.picture)
        .bind(input.price)
        .bind(input.rate)
        .bind(input.status)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(input.type_id)
        .bind(id)
        .execute(&self.pool)
        .await;
        affected(result, "update_product")
    }

    async fn delete_product(&self, id: i32) -> bool {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        affected(result, "delete_product")
    }

    async fn list_types(&self) -> Vec<ProductType> {
        let sql = format!("SELECT {FOOTER_COLUMNS} FROM product_type ORDER BY id");
        sqlx::query_as::<_, ProductType>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_types error: {:?}", e);
                vec![]
            })
    }

    async fn find_type(&self, id: i32) -> Option<ProductType> {
        let sql = format!("SELECT {FOOTER_COLUMNS} FROM product_type WHERE id = $1");
        sqlx::query_as::<_, ProductType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_type error: {:?}", e);
                None
            })
    }

    async fn insert_type(&self, input: &FooterEntryInput) -> Option<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            "INSERT INTO product_type (name, footer_order) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.footer_order)
        .fetch_one(&self.pool)
        .await;
        inserted(result, "insert_type")
    }

    async fn update_type(&self, id: i32, input: &FooterEntryInput) -> bool {
        let result = sqlx::query(
            "UPDATE product_type SET name = $1, footer_order = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(&input.name)
        .bind(input.footer_order)
        .bind(id)
        .execute(&self.pool)
        .await;
        affected(result, "update_type")
    }

    async fn delete_type(&self, id: i32) -> bool {
        let result = sqlx::query("DELETE FROM product_type WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        affected(result, "delete_type")
    }

    async fn list_brands(&self) -> Vec<Brand> {
        let sql = format!("SELECT {FOOTER_COLUMNS} FROM brand ORDER BY id");
        sqlx::query_as::<_, Brand>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_brands error: {:?}", e);
                vec![]
            })
    }

    async fn find_brand(&self, id: i32) -> Option<Brand> {
        let sql = format!("SELECT {FOOTER_COLUMNS} FROM brand WHERE id = $1");
        sqlx::query_as::<_, Brand>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_brand error: {:?}", e);
                None
            })
    }

    async fn insert_brand(&self, input: &FooterEntryInput) -> Option<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            "INSERT INTO brand (name, footer_order) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.footer_order)
        .fetch_one(&self.pool)
        .await;
        inserted(result, "insert_brand")
    }

    async fn update_brand(&self, id: i32, input: &FooterEntryInput) -> bool {
        let result = sqlx::query(
            "UPDATE brand SET name = $1, footer_order = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(&input.name)
        .bind(input.footer_order)
        .bind(id)
        .execute(&self.pool)
        .await;
        affected(result, "update_brand")
    }

    async fn delete_brand(&self, id: i32) -> bool {
        let result = sqlx::query("DELETE FROM brand WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        affected(result, "delete_brand")
    }

    async fn list_users(&self) -> Vec<AppUser> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user ORDER BY id");
        sqlx::query_as::<_, AppUser>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_users error: {:?}", e);
                vec![]
            })
    }

    async fn find_user(&self, id: i32) -> Option<AppUser> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = $1");
        sqlx::query_as::<_, AppUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_user error: {:?}", e);
                None
            })
    }

    async fn find_user_by_email(&self, email: &str) -> Option<AppUser> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE email = $1");
        sqlx::query_as::<_, AppUser>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_user_by_email error: {:?}", e);
                None
            })
    }

    async fn insert_user(&self, input: &UserInput) -> Option<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO app_user (email, password, firstname, lastname, role, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.firstname)
        .bind(&input.lastname)
        .bind(&input.role)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await;
        inserted(result, "insert_user")
    }

    async fn update_user(&self, id: i32, input: &UserInput) -> bool {
        let result = sqlx::query(
            r#"
            UPDATE app_user
            SET email = $1, password = $2, firstname = $3, lastname = $4,
                role = $5, status = $6, updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.firstname)
        .bind(&input.lastname)
        .bind(&input.role)
        .bind(input.status)
        .bind(id)
        .execute(&self.pool)
        .await;
        affected(result, "update_user")
    }

    async fn delete_user(&self, id: i32) -> bool {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        affected(result, "delete_user")
    }
}

// --- In-process record store ---

/// One auto-increment table.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, build: impl FnOnce(i32) -> T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn update(&mut self, id: i32, apply: impl FnOnce(&mut T)) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) => {
                apply(row);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

struct Tables {
    categories: Table<Category>,
    products: Table<Product>,
    types: Table<ProductType>,
    brands: Table<Brand>,
    users: Table<AppUser>,
}

/// MemoryRepository
///
/// `Repository` held in process memory. Used by the test suites and by local runs
/// started without `DATABASE_URL`; contents are lost on restart.
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                categories: Table::new(),
                products: Table::new(),
                types: Table::new(),
                brands: Table::new(),
                users: Table::new(),
            }),
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_categories(&self) -> Vec<Category> {
        self.tables.read().await.categories.all()
    }

    async fn home_categories(&self, limit: i64) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .tables
            .read()
            .await
            .categories
            .all()
            .into_iter()
            .filter(|category| category.home_order > 0)
            .collect();
        categories.sort_by_key(|category| category.home_order);
        categories.truncate(limit.max(0) as usize);
        categories
    }

    async fn find_category(&self, id: i32) -> Option<Category> {
        self.tables.read().await.categories.get(id)
    }

    async fn insert_category(&self, input: &CategoryInput) -> Option<i32> {
        let mut tables = self.tables.write().await;
        Some(tables.categories.insert(|id| Category {
            id,
            name: input.name.clone(),
            subtitle: input.subtitle.clone(),
            picture: input.picture.clone(),
            home_order: input.home_order,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_category(&self, id: i32, input: &CategoryInput) -> bool {
        let mut tables = self.tables.write().await;
        tables.categories.update(id, |category| {
            category.name = input.name.clone();
            category.subtitle = input.subtitle.clone();
            category.picture = input.picture.clone();
            category.home_order = input.home_order;
            category.updated_at = Some(Utc::now());
        })
    }

    async fn delete_category(&self, id: i32) -> bool {
        self.tables.write().await.categories.remove(id)
    }

    async fn reset_home_order(&self) -> bool {
        let mut tables = self.tables.write().await;
        for category in tables.categories.rows.values_mut() {
            category.home_order = 0;
        }
        true
    }

    async fn set_home_order(&self, id: i32, home_order: i32) -> bool {
        let mut tables = self.tables.write().await;
        tables.categories.update(id, |category| {
            category.home_order = home_order;
            category.updated_at = Some(Utc::now());
        })
    }

    async fn list_products(&self) -> Vec<Product> {
        self.tables.read().await.products.all()
    }

    async fn latest_products(&self, limit: i64) -> Vec<Product> {
        let mut products = self.tables.read().await.products.all();
        // Newest first; ids break ties between rows created in the same instant.
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        products.truncate(limit.max(0) as usize);
        products
    }

    async fn find_product(&self, id: i32) -> Option<Product> {
        self.tables.read().await.products.get(id)
    }

    async fn insert_product(&self, input: &ProductInput) -> Option<i32> {
        let mut tables = self.tables.write().await;
        Some(tables.products.insert(|id| Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            picture: input.picture.clone(),
            price: input.price,
            rate: input.rate,
            status: input.status,
            brand_id: input.brand_id,
            category_id: input.category_id,
            type_id: input.type_id,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_product(&self, id: i32, input: &ProductInput) -> bool {
        let mut tables = self.tables.write().await;
        tables.products.update(id, |product| {
            product.name = input.name.clone();
            product.description = input.description.clone();
            product.picture = input.picture.clone();
            product.price = input.price;
            product.rate = input.rate;
            product.status = input.status;
            product.brand_id = input.brand_id;
            product.category_id = input.category_id;
            product.type_id = input.type_id;
            product.updated_at = Some(Utc::now());
        })
    }

    async fn delete_product(&self, id: i32) -> bool {
        self.tables.write().await.products.remove(id)
    }

    async fn list_types(&self) -> Vec<ProductType> {
        self.tables.read().await.types.all()
    }

    async fn find_type(&self, id: i32) -> Option<ProductType> {
        self.tables.read().await.types.get(id)
    }

    async fn insert_type(&self, input: &FooterEntryInput) -> Option<i32> {
        let mut tables = self.tables.write().await;
        Some(tables.types.insert(|id| ProductType {
            id,
            name: input.name.clone(),
            footer_order: input.footer_order,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_type(&self, id: i32, input: &FooterEntryInput) -> bool {
        let mut tables = self.tables.write().await;
        tables.types.update(id, |product_type| {
            product_type.name = input.name.clone();
            product_type.footer_order = input.footer_order;
            product_type.updated_at = Some(Utc::now());
        })
    }

    async fn delete_type(&self, id: i32) -> bool {
        self.tables.write().await.types.remove(id)
    }

    async fn list_brands(&self) -> Vec<Brand> {
        self.tables.read().await.brands.all()
    }

    async fn find_brand(&self, id: i32) -> Option<Brand> {
        self.tables.read().await.brands.get(id)
    }

    async fn insert_brand(&self, input: &FooterEntryInput) -> Option<i32> {
        let mut tables = self.tables.write().await;
        Some(tables.brands.insert(|id| Brand {
            id,
            name: input.name.clone(),
            footer_order: input.footer_order,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_brand(&self, id: i32, input: &FooterEntryInput) -> bool {
        let mut tables = self.tables.write().await;
        tables.brands.update(id, |brand| {
            brand.name = input.name.clone();
            brand.footer_order = input.footer_order;
            brand.updated_at = Some(Utc::now());
        })
    }

    async fn delete_brand(&self, id: i32) -> bool {
        self.tables.write().await.brands.remove(id)
    }

    async fn list_users(&self) -> Vec<AppUser> {
        self.tables.read().await.users.all()
    }

    async fn find_user(&self, id: i32) -> Option<AppUser> {
        self.tables.read().await.users.get(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Option<AppUser> {
        self.tables
            .read()
            .await
            .users
            .rows
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    async fn insert_user(&self, input: &UserInput) -> Option<i32> {
        let mut tables = self.tables.write().await;
        if tables.users.rows.values().any(|user| user.email == input.email) {
            return None;
        }
        Some(tables.users.insert(|id| AppUser {
            id,
            email: input.email.clone(),
            password: input.password_hash.clone(),
            firstname: input.firstname.clone(),
            lastname: input.lastname.clone(),
            role: input.role.clone(),
            status: input.status,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_user(&self, id: i32, input: &UserInput) -> bool {
        let mut tables = self.tables.write().await;
        let email_taken = tables
            .users
            .rows
            .values()
            .any(|user| user.id != id && user.email == input.email);
        if email_taken {
            return false;
        }
        tables.users.update(id, |user| {
            user.email = input.email.clone();
            user.password = input.password_hash.clone();
            user.firstname = input.firstname.clone();
            user.lastname = input.lastname.clone();
            user.role = input.role.clone();
            user.status = input.status;
            user.updated_at = Some(Utc::now());
        })
    }

    async fn delete_user(&self, id: i32) -> bool {
        self.tables.write().await.users.remove(id)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::roles;

/// Number of category slots on the storefront home page.
pub const HOME_SLOTS: usize = 5;

/// Message appended to the error list when the record store rejects a write.
pub const SAVE_FAILED: &str = "The record could not be saved.";

// --- Records (mapped to database tables) ---

/// Category
///
/// A row of the `category` table. `home_order > 0` places it on the home page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub subtitle: String,
    pub picture: String,
    pub home_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub picture: String,
    pub price: f64,
    pub rate: i32,
    pub status: i32,
    pub brand_id: i32,
    pub category_id: i32,
    pub type_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// ProductType
///
/// A product type ("sneakers", "sandals"...), stored in `product_type`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
    pub footer_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Brand
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub footer_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// AppUser
///
/// A back-office account. `password` holds an argon2 PHC string and is never rendered.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct AppUser {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// --- Validated write payloads ---

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub subtitle: String,
    pub picture: String,
    pub home_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub picture: String,
    pub price: f64,
    pub rate: i32,
    pub status: i32,
    pub brand_id: i32,
    pub category_id: i32,
    pub type_id: i32,
}

/// Shared payload for product types and brands.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterEntryInput {
    pub name: String,
    pub footer_order: i32,
}

/// UserInput
///
/// `password_hash` is already hashed; validation hands back the plaintext in
/// `UserDraft` and the controller hashes it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInput {
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
    pub status: i32,
}

impl UserDraft {
    pub fn into_input(self, password_hash: String) -> UserInput {
        UserInput {
            email: self.email,
            password_hash,
            firstname: self.firstname,
            lastname: self.lastname,
            role: self.role,
            status: self.status,
        }
    }
}

// --- Submitted forms (application/x-www-form-urlencoded) ---
//
// Every field arrives as raw text so a bad value can be echoed back in the re-rendered
// form next to its error message.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        required(&self.email, "Please enter an email", &mut errors);
        required(&self.password, "Please enter a password", &mut errors);
        errors
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    pub subtitle: String,
    pub picture: String,
    pub home_order: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryInput, Vec<String>> {
        let mut errors = Vec::new();
        let name = required(&self.name, "You must enter a name", &mut errors);
        let subtitle = required(&self.subtitle, "You must enter a subtitle", &mut errors);
        let picture = required(&self.picture, "You must enter a picture URL", &mut errors);
        let home_order = optional_int(
            &self.home_order,
            0,
            "The home order must be a whole number",
            &mut errors,
        );

        if errors.is_empty() {
            Ok(CategoryInput {
                name,
                subtitle,
                picture,
                home_order,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            subtitle: category.subtitle.clone(),
            picture: category.picture.clone(),
            home_order: category.home_order.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub picture: String,
    pub price: String,
    pub rate: String,
    pub status: String,
    pub brand_id: String,
    pub category_id: String,
    pub type_id: String,
}

impl ProductForm {
    pub fn validate(&self) -> Result<ProductInput, Vec<String>> {
        let mut errors = Vec::new();
        let name = required(&self.name, "You must enter a name", &mut errors);
        let description = required(&self.description, "You must enter a description", &mut errors);
        let picture = required(&self.picture, "You must enter a picture URL", &mut errors);

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => price,
            _ => {
                errors.push("The price must be a positive number".to_string());
                0.0
            }
        };
        let rate = optional_int(&self.rate, 0, "The rate must be a whole number", &mut errors);
        let status = optional_int(&self.status, 1, "The status must be a whole number", &mut errors);
        let brand_id = required_int(&self.brand_id, "You must choose a brand", &mut errors);
        let category_id = required_int(&self.category_id, "You must choose a category", &mut errors);
        let type_id = required_int(&self.type_id, "You must choose a type", &mut errors);

        if errors.is_empty() {
            Ok(ProductInput {
                name,
                description,
                picture,
                price,
                rate,
                status,
                brand_id,
                category_id,
                type_id,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            picture: product.picture.clone(),
            price: product.price.to_string(),
            rate: product.rate.to_string(),
            status: product.status.to_string(),
            brand_id: product.brand_id.to_string(),
            category_id: product.category_id.to_string(),
            type_id: product.type_id.to_string(),
        }
    }
}

/// FooterEntryForm
///
/// Form shared by product types and brands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterEntryForm {
    pub name: String,
    pub footer_order: String,
}

impl FooterEntryForm {
    pub fn validate(&self) -> Result<FooterEntryInput, Vec<String>> {
        let mut errors = Vec::new();
        let name = required(&self.name, "You must enter a name", &mut errors);
        let footer_order = optional_int(
            &self.footer_order,
            0,
            "The footer order must be a whole number",
            &mut errors,
        );

        if errors.is_empty() {
            Ok(FooterEntryInput { name, footer_order })
        } else {
            Err(errors)
        }
    }

    pub fn from_parts(name: &str, footer_order: i32) -> Self {
        Self {
            name: name.to_string(),
            footer_order: footer_order.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
    pub status: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<UserDraft, Vec<String>> {
        let mut errors = Vec::new();

        let email = self.email.trim().to_string();
        if email.is_empty() {
            errors.push("You must enter an email".to_string());
        } else if !looks_like_email(&email) {
            errors.push("You must enter a valid email".to_string());
        }

        if self.password.is_empty() {
            errors.push("You must enter a password".to_string());
        } else if !self.password.contains('@') {
            errors.push("The password must contain an @".to_string());
        }

        let firstname = required(&self.firstname, "You must enter a first name", &mut errors);
        let lastname = required(&self.lastname, "You must enter a last name", &mut errors);

        let role = self.role.trim().to_string();
        if role.is_empty() {
            errors.push("You must choose a role".to_string());
        } else if !roles::is_known(&role) {
            errors.push("Unknown role".to_string());
        }

        let status = required_int(&self.status, "You must choose a status", &mut errors);

        if errors.is_empty() {
            Ok(UserDraft {
                email,
                password: self.password.clone(),
                firstname,
                lastname,
                role,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&AppUser> for UserForm {
    fn from(user: &AppUser) -> Self {
        Self {
            email: user.email.clone(),
            password: String::new(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            role: user.role.clone(),
            status: user.status.to_string(),
        }
    }
}

/// ManageCategoryForm
///
/// One select per home slot; an empty slot leaves that position unassigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManageCategoryForm {
    pub slot1: String,
    pub slot2: String,
    pub slot3: String,
    pub slot4: String,
    pub slot5: String,
}

impl ManageCategoryForm {
    fn slots(&self) -> [&str; HOME_SLOTS] {
        [
            self.slot1.as_str(),
            self.slot2.as_str(),
            self.slot3.as_str(),
            self.slot4.as_str(),
            self.slot5.as_str(),
        ]
    }

    /// Returns `(category_id, home_order)` pairs, home orders starting at 1.
    pub fn validate(&self) -> Result<Vec<(i32, i32)>, Vec<String>> {
        let mut errors = Vec::new();
        let mut placements: Vec<(i32, i32)> = Vec::new();

        for (index, raw) in self.slots().iter().enumerate() {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<i32>() {
                Ok(category_id) => {
                    if placements.iter().any(|(id, _)| *id == category_id) {
                        errors.push("Each home slot must hold a different category".to_string());
                    } else {
                        placements.push((category_id, index as i32 + 1));
                    }
                }
                Err(_) => errors.push(format!("Slot {} holds an invalid category", index + 1)),
            }
        }

        if errors.is_empty() {
            Ok(placements)
        } else {
            Err(errors)
        }
    }
}

// --- Field helpers ---

fn required(value: &str, message: &str, errors: &mut Vec<String>) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(message.to_string());
    }
    value.to_string()
}

fn required_int(value: &str, message: &str, errors: &mut Vec<String>) -> i32 {
    match value.trim().parse::<i32>() {
        Ok(parsed) => parsed,
        Err(_) => {
            errors.push(message.to_string());
            0
        }
    }
}

fn optional_int(value: &str, default: i32, message: &str, errors: &mut Vec<String>) -> i32 {
    let value = value.trim();
    if value.is_empty() {
        return default;
    }
    match value.parse::<i32>() {
        Ok(parsed) => parsed,
        Err(_) => {
            errors.push(message.to_string());
            default
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

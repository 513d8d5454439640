//! # Request Bodies
//!
//! Typed request bodies, decoded from already-parsed JSON with
//! [`FieldReader`] so that every shape failure names its field.
//!
//! ```text
//! ┌──────────────────┬──────────┬───────────────────────────────────────┐
//! │ Body             │ Strict   │ Used by                               │
//! ├──────────────────┼──────────┼───────────────────────────────────────┤
//! │ QuantityRequest  │ no       │ POST/PATCH basket product             │
//! │ ProductCreate    │ no       │ POST /products                        │
//! │ ProductUpdate    │ no       │ PUT /products/{id}                    │
//! │ TaskCreate       │ yes      │ POST /tasks                           │
//! │ TaskUpdate       │ no       │ PUT /tasks/{id}                       │
//! │ UserCreate       │ no       │ POST /users                           │
//! │ UserUpdate       │ yes      │ PUT /users/{id}                       │
//! └──────────────────┴──────────┴───────────────────────────────────────┘
//! ```
//!
//! Non-strict bodies ignore keys they do not know. Strict bodies reject them
//! with `UnknownField`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Address, Product, Task, User};
use crate::validation::{validate_age, validate_email, FieldReader};

/// A body that can be decoded from a JSON value.
///
/// Bodies are only ever decoded through this trait. Their serde derives feed
/// the shared ts-rs and OpenAPI schemas, not request decoding.
pub trait RequestBody: Sized {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>>;
}

// =============================================================================
// Basket
// =============================================================================

/// `{ quantity }` sent to the basket product endpoints.
///
/// The raw number is kept; add and set coerce it differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct QuantityRequest {
    pub quantity: f64,
}

impl RequestBody for QuantityRequest {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let quantity = reader.number("quantity");
        reader.finish()?;

        Ok(QuantityRequest {
            quantity: quantity.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Products
// =============================================================================

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCreate {
    pub sku: String,
    pub title: String,
    pub stocked: bool,
    pub price: f64,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub base_price: Option<f64>,
}

impl ProductCreate {
    /// Builds the stored product. Both timestamps are `now`.
    pub fn into_product(self, id: i64, now: DateTime<Utc>) -> Product {
        Product {
            id,
            sku: self.sku,
            title: self.title,
            stocked: self.stocked,
            price: self.price,
            desc: self.desc,
            image: self.image,
            base_price: self.base_price,
            created_at: now,
            updated_at: now,
        }
    }
}

impl RequestBody for ProductCreate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let sku = reader.string("sku");
        let title = reader.string("title");
        let stocked = reader.boolean("stocked");
        let price = reader.number("price");
        let desc = reader.optional_string("desc");
        let image = reader.optional_string("image");
        let base_price = reader.optional_number("basePrice");
        reader.finish()?;

        Ok(ProductCreate {
            sku: sku.unwrap_or_default(),
            title: title.unwrap_or_default(),
            stocked: stocked.unwrap_or_default(),
            price: price.unwrap_or_default(),
            desc,
            image,
            base_price,
        })
    }
}

/// Body of `PUT /products/{id}`. Present fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    pub sku: Option<String>,
    pub title: Option<String>,
    pub stocked: Option<bool>,
    pub price: Option<f64>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub base_price: Option<f64>,
}

impl ProductUpdate {
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(stocked) = self.stocked {
            product.stocked = stocked;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if self.desc.is_some() {
            product.desc = self.desc;
        }
        if self.image.is_some() {
            product.image = self.image;
        }
        if self.base_price.is_some() {
            product.base_price = self.base_price;
        }
        product.updated_at = now;
    }
}

impl RequestBody for ProductUpdate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let update = ProductUpdate {
            sku: reader.optional_string("sku"),
            title: reader.optional_string("title"),
            stocked: reader.optional_boolean("stocked"),
            price: reader.optional_number("price"),
            desc: reader.optional_string("desc"),
            image: reader.optional_string("image"),
            base_price: reader.optional_number("basePrice"),
        };
        reader.finish()?;
        Ok(update)
    }
}

// =============================================================================
// Tasks
// =============================================================================

/// Body of `POST /tasks`. Strict; `completed` defaults to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct TaskCreate {
    pub desc: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskCreate {
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            desc: self.desc,
            completed: self.completed,
        }
    }
}

impl RequestBody for TaskCreate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let desc = reader.string("desc");
        let completed = reader.optional_boolean("completed");
        reader.deny_unknown(&["desc", "completed"]);
        reader.finish()?;

        Ok(TaskCreate {
            desc: desc.unwrap_or_default(),
            completed: completed.unwrap_or(false),
        })
    }
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct TaskUpdate {
    pub desc: Option<String>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn apply_to(self, task: &mut Task) {
        if let Some(desc) = self.desc {
            task.desc = desc;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

impl RequestBody for TaskUpdate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let update = TaskUpdate {
            desc: reader.optional_string("desc"),
            completed: reader.optional_boolean("completed"),
        };
        reader.finish()?;
        Ok(update)
    }
}

// =============================================================================
// Users
// =============================================================================

/// Body of `POST /users`: a user without `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub email: String,
    pub image: String,
    pub phone: String,
    pub company: String,
    pub address: Address,
}

impl UserCreate {
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            email: self.email,
            image: self.image,
            phone: self.phone,
            company: self.company,
            created_at: now,
            address: self.address,
        }
    }
}

impl RequestBody for UserCreate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let first_name = reader.string("firstName");
        let last_name = reader.string("lastName");
        let age = reader.integer("age");
        let email = reader.string("email");
        let image = reader.string("image");
        let phone = reader.string("phone");
        let company = reader.string("company");

        let address = match reader.object("address", true) {
            Some(mut nested) => {
                let street = nested.string("street");
                let city = nested.string("city");
                let zip = nested.string("zip");
                reader.absorb(nested);
                Address {
                    street: street.unwrap_or_default(),
                    city: city.unwrap_or_default(),
                    zip: zip.unwrap_or_default(),
                }
            }
            None => Address {
                street: String::new(),
                city: String::new(),
                zip: String::new(),
            },
        };

        if let Some(age) = age {
            reader.check(validate_age("age", age));
        }
        if let Some(email) = &email {
            reader.check(validate_email("email", email));
        }
        reader.finish()?;

        Ok(UserCreate {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            age: age.unwrap_or_default(),
            email: email.unwrap_or_default(),
            image: image.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            company: company.unwrap_or_default(),
            address,
        })
    }
}

/// Partial address inside [`UserUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct AddressUpdate {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

/// Body of `PUT /users/{id}`. Strict, including the nested address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<AddressUpdate>,
}

const USER_UPDATE_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "age",
    "email",
    "image",
    "phone",
    "company",
    "address",
];

impl UserUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(image) = self.image {
            user.image = image;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(company) = self.company {
            user.company = company;
        }
        if let Some(address) = self.address {
            if let Some(street) = address.street {
                user.address.street = street;
            }
            if let Some(city) = address.city {
                user.address.city = city;
            }
            if let Some(zip) = address.zip {
                user.address.zip = zip;
            }
        }
    }
}

impl RequestBody for UserUpdate {
    fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let mut reader = FieldReader::new(body)?;
        let mut update = UserUpdate {
            first_name: reader.optional_string("firstName"),
            last_name: reader.optional_string("lastName"),
            age: reader.optional_integer("age"),
            email: reader.optional_string("email"),
            image: reader.optional_string("image"),
            phone: reader.optional_string("phone"),
            company: reader.optional_string("company"),
            address: None,
        };

        if let Some(mut nested) = reader.object("address", false) {
            update.address = Some(AddressUpdate {
                street: nested.optional_string("street"),
                city: nested.optional_string("city"),
                zip: nested.optional_string("zip"),
            });
            nested.deny_unknown(&["street", "city", "zip"]);
            reader.absorb(nested);
        }

        reader.deny_unknown(USER_UPDATE_FIELDS);
        if let Some(age) = update.age {
            reader.check(validate_age("age", age));
        }
        if let Some(email) = &update.email {
            reader.check(validate_email("email", email));
        }
        reader.finish()?;
        Ok(update)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

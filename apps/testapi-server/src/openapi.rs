//! OpenAPI document assembled from the handler annotations.

use testapi_core::requests::{
    AddressUpdate, ProductCreate, ProductUpdate, QuantityRequest, TaskCreate, TaskUpdate,
    UserCreate, UserUpdate,
};
use testapi_core::{Address, BasketItem, FieldError, Message, Product, Task, User};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::basket::get_basket,
        handlers::basket::clear_basket,
        handlers::basket::add_item,
        handlers::basket::set_quantity,
        handlers::basket::remove_item,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::tasks::list_tasks,
        handlers::tasks::get_task,
        handlers::tasks::create_task,
        handlers::tasks::update_task,
        handlers::tasks::delete_task,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::system::reset_system,
    ),
    components(schemas(
        BasketItem,
        Product,
        Task,
        User,
        Address,
        Message,
        QuantityRequest,
        ProductCreate,
        ProductUpdate,
        TaskCreate,
        TaskUpdate,
        UserCreate,
        UserUpdate,
        AddressUpdate,
        ErrorBody,
        FieldError,
    )),
    tags(
        (name = "basket", description = "Baskets keyed by a caller-chosen string"),
        (name = "products", description = "Product catalog"),
        (name = "tasks", description = "To-do list"),
        (name = "users", description = "Fake users"),
        (name = "system", description = "Data regeneration")
    ),
    info(
        title = "Test API",
        description = "REST API for client and test-automation developers"
    )
)]
pub struct ApiDoc;

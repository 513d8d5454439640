//! # Router
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatchPanicLayer   panics → bare 500                                    │
//! │  TraceLayer        one span per request                                 │
//! │  CorsLayer         preflight OPTIONS                                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  /api/v1                                                                │
//! │  ├── /basket/{key}                        GET DELETE                    │
//! │  ├── /basket/{key}/products/{productId}   POST PATCH DELETE             │
//! │  ├── /products, /products/{id}            GET POST / GET PUT DELETE     │
//! │  ├── /tasks, /tasks/{id}                  GET POST / GET PUT DELETE     │
//! │  ├── /users, /users/{id}                  GET POST / GET PUT DELETE     │
//! │  ├── /system                              DELETE                        │
//! │  └── /swagger.json                        GET                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{basket, docs, products, system, tasks, users};
use crate::state::AppState;

/// Routes served under `/api/v1`, without middleware.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/basket/{key}",
            get(basket::get_basket).delete(basket::clear_basket),
        )
        .route(
            "/basket/{key}/products/{productId}",
            post(basket::add_item)
                .patch(basket::set_quantity)
                .delete(basket::remove_item),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/system", delete(system::reset_system))
        .route("/swagger.json", get(docs::swagger_json))
}

/// Builds the complete application router.
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .nest("/api/v1", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use testapi_core::Product;
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn app() -> Router {
        create_router(AppState::for_tests())
    }

    /// Adds stocked products 1..=6 so the seeded basket lines refer to real
    /// products.
    fn app_with_low_ids() -> Router {
        let state = AppState::for_tests();
        let products = state.store.products();
        let template = products.get(1000).unwrap();

        let mut all = products.all();
        all.extend((1..=6).map(|id| Product {
            id,
            ..template.clone()
        }));
        products.reset(all);

        create_router(state)
    }

    // -------------------------------------------------------------------------
    // Basket
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_basket_seeds_new_key() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/basket/abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 1, "productId": 1, "quantity": 1 },
                { "id": 2, "productId": 2, "quantity": 4 }
            ])
        );
    }

    #[tokio::test]
    async fn test_add_merges_and_answers_created() {
        let app = app_with_low_ids();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/2",
            Some(json!({ "quantity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body[1], json!({ "id": 2, "productId": 2, "quantity": 7 }));
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_after_clear() {
        let app = app_with_low_ids();
        let (status, previous) = send(&app, "DELETE", "/api/v1/basket/abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(previous.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/1",
            Some(json!({ "quantity": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!([{ "id": 1, "productId": 1, "quantity": 2 }]));
    }

    #[tokio::test]
    async fn test_clear_with_refill() {
        let app = app_with_low_ids();
        send(&app, "DELETE", "/api/v1/basket/abc", None).await;
        let (_, previous) = send(&app, "DELETE", "/api/v1/basket/abc?refill=true", None).await;
        assert_eq!(previous, json!([]));

        let (_, body) = send(&app, "GET", "/api/v1/basket/abc", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_404() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/5000",
            Some(json!({ "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["message"], "Product not found with id: 5000");
    }

    #[tokio::test]
    async fn test_add_unstocked_product_is_409() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/1004",
            Some(json!({ "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({ "error": "Conflict", "code": "1202", "message": "Product not in stock" })
        );
    }

    #[tokio::test]
    async fn test_product_checked_before_body() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/5000",
            Some(json!({ "quantity": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found with id: 5000");

        let (status, body) = send(&app, "POST", "/api/v1/basket/abc/products/1004", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "1202");

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/v1/basket/abc/products/5000",
            Some(json!({ "quantity": -4 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PATCH", "/api/v1/basket/abc/products/1004", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_whitespace_key_is_a_basket() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/basket/%20", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_patch_zero_removes_line() {
        let app = app_with_low_ids();
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/basket/abc/products/2",
            Some(json!({ "quantity": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": 1, "productId": 1, "quantity": 1 }]));
    }

    #[tokio::test]
    async fn test_patch_negative_is_400() {
        let app = app_with_low_ids();
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/basket/abc/products/2",
            Some(json!({ "quantity": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["key"], "quantity");
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_404() {
        let app = app_with_low_ids();
        let (status, body) = send(&app, "DELETE", "/api/v1/basket/abc/products/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": 2, "productId": 2, "quantity": 4 }]));

        let (status, _) = send(&app, "DELETE", "/api/v1/basket/abc/products/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_six_items_fail_read_with_500() {
        let app = app_with_low_ids();
        for id in 3..=6 {
            let uri = format!("/api/v1/basket/abc/products/{}", id);
            let (status, _) = send(&app, "POST", &uri, Some(json!({ "quantity": 1 }))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/api/v1/basket/abc", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "InternalServerError");
        assert_eq!(body["details"], json!({}));
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/basket/abc/products/1000")
            .header("content-type", "application/json")
            .body(Body::from("{quantity"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Malformed JSON body");
    }

    #[tokio::test]
    async fn test_missing_quantity_is_validation_error() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/basket/abc/products/1000",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "one or more fields are invalid");
        assert_eq!(
            body["errors"],
            json!([{ "key": "quantity", "message": "quantity is required" }])
        );
    }

    #[tokio::test]
    async fn test_non_numeric_product_id_is_400() {
        let app = app();
        let (status, body) = send(&app, "DELETE", "/api/v1/basket/abc/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["key"], "productId");
    }

    // -------------------------------------------------------------------------
    // Products, tasks, users
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_product_crud() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/api/v1/products",
            Some(json!({ "sku": "NEW-1", "title": "New", "stocked": true, "price": 4.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1010);

        let (status, updated) = send(
            &app,
            "PUT",
            "/api/v1/products/1010",
            Some(json!({ "stocked": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["stocked"], false);
        assert_eq!(updated["sku"], "NEW-1");

        let (status, _) = send(&app, "DELETE", "/api/v1/products/1010", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, "DELETE", "/api/v1/products/1010", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, "GET", "/api/v1/products/1010", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product with id 1010 not found");
    }

    #[tokio::test]
    async fn test_products_are_paged() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/products?page=1&pageSize=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 10);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageSize"], 4);
        assert_eq!(body["items"][0]["id"], 1004);
        assert_eq!(body["items"].as_array().unwrap().len(), 4);

        let (status, body) = send(&app, "GET", "/api/v1/products?page=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["key"], "page");
    }

    #[tokio::test]
    async fn test_users_sorted_descending() {
        let app = app();
        let (_, body) = send(&app, "GET", "/api/v1/users?sortBy=-id&pageSize=2", None).await;
        assert_eq!(body["items"][0]["id"], 1009);
        assert_eq!(body["items"][1]["id"], 1008);
    }

    #[tokio::test]
    async fn test_task_crud() {
        let app = app();
        let (_, tasks) = send(&app, "GET", "/api/v1/tasks", None).await;
        assert_eq!(tasks.as_array().unwrap().len(), 3);
        assert_eq!(tasks[0], json!({ "id": 1, "desc": "Drink coffee", "completed": true }));

        let (status, created) = send(
            &app,
            "POST",
            "/api/v1/tasks",
            Some(json!({ "desc": "Test things" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created, json!({ "id": 4, "desc": "Test things", "completed": false }));

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/tasks",
            Some(json!({ "desc": "x", "priority": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["key"], "priority");

        let (status, updated) = send(
            &app,
            "PUT",
            "/api/v1/tasks/2",
            Some(json!({ "completed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["desc"], "Write code");
        assert_eq!(updated["completed"], true);

        let (status, _) = send(&app, "DELETE", "/api/v1/tasks/99", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, "GET", "/api/v1/tasks/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Task with id 99 not found");
    }

    #[tokio::test]
    async fn test_user_create_and_update_rules() {
        let app = app();
        let user = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "age": 36,
            "email": "ada@example.com",
            "image": "https://example.com/ada.png",
            "phone": "555-0100",
            "company": "Engines Ltd",
            "address": { "street": "1 Main St", "city": "London", "zip": "N1" }
        });
        let (status, created) = send(&app, "POST", "/api/v1/users", Some(user)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1010);
        assert!(created["createdAt"].is_string());

        let (status, body) = send(&app, "PUT", "/api/v1/users/1010", Some(json!({ "age": 12 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["key"], "age");

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/users/1010",
            Some(json!({ "address": { "city": "Paris" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["address"]["city"], "Paris");
        assert_eq!(body["address"]["street"], "1 Main St");

        let (status, _) = send(&app, "GET", "/api/v1/users/4242", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // -------------------------------------------------------------------------
    // System, docs, middleware
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_system_reset_regenerates() {
        let app = app();
        send(&app, "DELETE", "/api/v1/tasks/1", None).await;
        send(&app, "DELETE", "/api/v1/products/1000", None).await;

        let (status, body) = send(&app, "DELETE", "/api/v1/system", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Tasks, Product and User are (re)generated.");

        let (status, _) = send(&app, "GET", "/api/v1/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", "/api/v1/products/1000", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_swagger_json() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/swagger.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["openapi"].as_str().unwrap().starts_with("3."));
        assert!(body["paths"]["/api/v1/basket/{key}"].is_object());
    }

    #[tokio::test]
    async fn test_preflight_is_answered() {
        let app = app();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/basket/abc/products/1")
            .header("origin", "http://localhost:8080")
            .header("access-control-request-method", "PATCH")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_panic_becomes_bare_500() {
        async fn boom() -> &'static str {
            panic!("handler exploded")
        }
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::new());

        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(serde_json::from_slice::<Value>(&bytes).is_err());
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

use sous_core::coordinator::{CoordinatorSnapshot, RequestCoordinator, RequestOutcome};
use sous_core::error::SousError;
use sous_core::models::{
    Cuisine, DietaryPreference, HistoryRecord, MAX_RATING, MIN_INGREDIENTS, Preferences,
    validate_ingredient_name,
};
use sous_core::store::PersistentStore;

const BODY_LIMIT: usize = 64 * 1024; // 64 KB

#[derive(Clone)]
struct AppState {
    coord: Arc<RequestCoordinator>,
    store: PersistentStore,
}

// --- Request / Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRecipeRequest {
    ingredients: Vec<String>,
    #[serde(default)]
    dietary_preferences: Vec<String>,
    cuisine_type: Option<String>,
}

impl CreateRecipeRequest {
    /// Labels are matched case-insensitively, like on the command line.
    fn into_parts(self) -> Result<(Vec<String>, Preferences), SousError> {
        let ingredients = self
            .ingredients
            .iter()
            .map(|name| validate_ingredient_name(name))
            .collect::<Result<Vec<_>, _>>()?;
        if ingredients.len() < MIN_INGREDIENTS {
            return Err(SousError::invalid(format!(
                "At least {MIN_INGREDIENTS} ingredients are required"
            )));
        }
        let dietary = self
            .dietary_preferences
            .iter()
            .map(|d| d.parse::<DietaryPreference>())
            .collect::<Result<Vec<_>, _>>()?;
        let cuisine = match self.cuisine_type.as_deref() {
            Some(c) => c.parse::<Cuisine>()?,
            None => Cuisine::Any,
        };
        Ok((ingredients, Preferences::new(dietary, cuisine)))
    }
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    favorites: bool,
}

#[derive(Deserialize)]
struct RatingRequest {
    rating: serde_json::Value,
}

impl RatingRequest {
    /// Anything but a whole number in `0..=MAX_RATING` is a bad request.
    fn checked_rating(&self) -> Result<u8, ApiError> {
        self.rating
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .filter(|n| *n <= MAX_RATING)
            .ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "Rating must be a whole number between 0 and {MAX_RATING} (got {})",
                    self.rating
                ))
            })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteResponse {
    id: String,
    is_favorite: bool,
}

#[derive(Serialize, Deserialize)]
struct DarkMode {
    enabled: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Error handling ---

enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Upstream(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(err) => {
                error!("internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<SousError> for ApiError {
    fn from(err: SousError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

fn no_active_record() -> ApiError {
    ApiError::Conflict("No recipe is currently selected".to_string())
}

// --- Middleware ---

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'"),
    );
    response
}

// --- Handlers ---

async fn get_status(State(state): State<AppState>) -> Json<CoordinatorSnapshot> {
    Json(state.coord.snapshot())
}

async fn create_recipe(
    State(state): State<AppState>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<HistoryRecord>), ApiError> {
    let (ingredients, preferences) = req.into_parts()?;

    // Run detached so a client that disconnects mid-generation does not
    // cancel the request.
    let coord = Arc::clone(&state.coord);
    let outcome = tokio::spawn(async move { coord.request_recipe(ingredients, preferences).await })
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("recipe request task failed: {e}")))?;

    match outcome {
        RequestOutcome::Completed(record) => Ok((StatusCode::CREATED, Json(record))),
        RequestOutcome::Failed(message) => Err(ApiError::Upstream(message)),
        RequestOutcome::Superseded => Err(ApiError::Conflict(
            "Superseded by a newer recipe request".to_string(),
        )),
    }
}

async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryRecord>> {
    Json(state.coord.history(query.favorites))
}

async fn get_history_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryRecord>, ApiError> {
    state
        .coord
        .find(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {id} not found")))
}

async fn select_history_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryRecord>, ApiError> {
    state
        .coord
        .select_history_record(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {id} not found")))
}

async fn clear_history(State(state): State<AppState>) -> StatusCode {
    state.coord.clear_history();
    StatusCode::NO_CONTENT
}

async fn rate_current(
    State(state): State<AppState>,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> Result<Json<HistoryRecord>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let rating = req.checked_rating()?;
    state
        .coord
        .rate(rating)?
        .map(Json)
        .ok_or_else(no_active_record)
}

async fn toggle_current_favorite(
    State(state): State<AppState>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let (id, is_favorite) = state.coord.toggle_favorite().ok_or_else(no_active_record)?;
    Ok(Json(FavoriteResponse { id, is_favorite }))
}

async fn clear_current(State(state): State<AppState>) -> StatusCode {
    state.coord.clear_selection();
    StatusCode::NO_CONTENT
}

async fn get_dark_mode(State(state): State<AppState>) -> Json<DarkMode> {
    Json(DarkMode {
        enabled: state.store.dark_mode(),
    })
}

async fn set_dark_mode(
    State(state): State<AppState>,
    Json(req): Json<DarkMode>,
) -> Result<Json<DarkMode>, ApiError> {
    if !state.store.set_dark_mode(req.enabled) {
        return Err(ApiError::Internal(anyhow::anyhow!(
            "dark mode setting was not persisted"
        )));
    }
    Ok(Json(req))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/recipes", post(create_recipe))
        .route("/api/history", get(list_history).delete(clear_history))
        .route("/api/history/{id}", get(get_history_record))
        .route("/api/history/{id}/select", post(select_history_record))
        .route("/api/current", delete(clear_current))
        .route("/api/current/rating", put(rate_current))
        .route("/api/current/favorite", post(toggle_current_favorite))
        .route(
            "/api/settings/dark-mode",
            get(get_dark_mode).put(set_dark_mode),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

// --- Server startup ---

pub async fn start_server(
    coord: Arc<RequestCoordinator>,
    store: PersistentStore,
    port: u16,
    bind: &str,
) -> anyhow::Result<()> {
    let app = build_router(AppState { coord, store });

    if bind != "127.0.0.1" && bind != "localhost" {
        warn!("listening on {bind} with no authentication; any device on your network can use this API");
    }

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    info!("listening on http://{bind}:{port}");
    eprintln!("Listening on http://{bind}:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use sous_core::generation::{GenerationClient, InferenceProvider, RetryPolicy};
    use sous_core::ledger::HistoryLedger;
    use sous_core::prompt::ChatPrompt;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    /// Each call waits on a oneshot the test fills in, in call order.
    #[derive(Default)]
    struct GatedProvider {
        gates: Mutex<VecDeque<oneshot::Receiver<Result<String, String>>>>,
        calls: Mutex<usize>,
    }

    impl GatedProvider {
        fn gate(&self) -> oneshot::Sender<Result<String, String>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().push_back(rx);
            tx
        }

        fn ready(&self, outcome: Result<&str, &str>) {
            let tx = self.gate();
            tx.send(outcome.map(String::from).map_err(String::from))
                .unwrap();
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl InferenceProvider for GatedProvider {
        async fn complete(&self, _prompt: &ChatPrompt) -> anyhow::Result<String> {
            let gate = {
                *self.calls.lock().unwrap() += 1;
                self.gates.lock().unwrap().pop_front()
            };
            let gate = gate.ok_or_else(|| anyhow::anyhow!("no gate prepared"))?;
            match gate.await {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(msg)) => Err(anyhow::anyhow!(msg)),
                Err(_) => Err(anyhow::anyhow!("gate dropped")),
            }
        }
    }

    fn test_app(provider: Arc<GatedProvider>) -> Router {
        let store = PersistentStore::in_memory();
        let client = GenerationClient::new(provider, RetryPolicy::default().with_max_attempts(1));
        let coord = RequestCoordinator::new(client, HistoryLedger::load(store.clone()));
        build_router(AppState {
            coord: Arc::new(coord),
            store,
        })
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn recipe_body() -> serde_json::Value {
        serde_json::json!({
            "ingredients": ["egg", "rice"],
            "dietaryPreferences": ["vegetarian"],
            "cuisineType": "Italian",
        })
    }

    async fn generate(app: &Router, provider: &GatedProvider, text: &str) -> serde_json::Value {
        provider.ready(Ok(text));
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/recipes", &recipe_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn create_recipe_returns_201_with_record() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());

        let record = generate(&app, &provider, "# Risotto").await;
        assert_eq!(record["recipe"], "# Risotto");
        assert_eq!(record["ingredients"], serde_json::json!(["egg", "rice"]));
        assert_eq!(record["dietaryPreferences"], serde_json::json!(["Vegetarian"]));
        assert_eq!(record["cuisineType"], "Italian");
        assert_eq!(record["rating"], 0);
        assert_eq!(record["isFavorite"], false);

        let status = body_json(
            app.oneshot(empty_request("GET", "/api/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["loading"], false);
        assert_eq!(status["activeRecordId"], record["id"]);
        assert_eq!(status["display"], "# Risotto");
    }

    #[tokio::test]
    async fn create_recipe_failure_returns_502() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        provider.ready(Err("model overloaded"));

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/recipes", &recipe_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Error: Could not generate recipe."));

        let status = body_json(
            app.oneshot(empty_request("GET", "/api/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["error"], message);
        assert_eq!(status["historyLen"], 0);
    }

    #[tokio::test]
    async fn create_recipe_rejects_bad_input() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());

        for body in [
            serde_json::json!({ "ingredients": ["egg"] }),
            serde_json::json!({ "ingredients": ["egg", "  "] }),
            serde_json::json!({ "ingredients": ["egg", "rice"], "dietaryPreferences": ["paleo"] }),
            serde_json::json!({ "ingredients": ["egg", "rice"], "cuisineType": "Martian" }),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/recipes", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn superseded_request_returns_409_and_only_latest_is_kept() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        let release_a = provider.gate();
        let release_b = provider.gate();

        let first = tokio::spawn(
            app.clone()
                .oneshot(json_request("POST", "/api/recipes", &recipe_body())),
        );
        while provider.calls() < 1 {
            tokio::task::yield_now().await;
        }
        let second = tokio::spawn(
            app.clone()
                .oneshot(json_request("POST", "/api/recipes", &recipe_body())),
        );
        while provider.calls() < 2 {
            tokio::task::yield_now().await;
        }

        release_a.send(Ok("# Stale".to_string())).unwrap();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status(), StatusCode::CONFLICT);

        release_b.send(Ok("# Fresh".to_string())).unwrap();
        let second = second.await.unwrap().unwrap();
        assert_eq!(second.status(), StatusCode::CREATED);

        let history = body_json(
            app.oneshot(empty_request("GET", "/api/history"))
                .await
                .unwrap(),
        )
        .await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["recipe"], "# Fresh");
    }

    #[tokio::test]
    async fn history_lookup_and_select() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        let first = generate(&app, &provider, "# First").await;
        generate(&app, &provider, "# Second").await;
        let id = first["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/history/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["recipe"], "# First");

        let response = app
            .clone()
            .oneshot(empty_request("POST", &format!("/api/history/{id}/select")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status = body_json(
            app.clone()
                .oneshot(empty_request("GET", "/api/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["activeRecordId"], id);
        assert_eq!(status["display"], "# First");

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/history/missing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("POST", "/api/history/missing/select"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rate_and_favorite_current_record() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        let record = generate(&app, &provider, "# Curry").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/current/rating",
                &serde_json::json!({ "rating": 4 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["rating"], 4);

        for body in [
            serde_json::json!({ "rating": 6 }),
            serde_json::json!({ "rating": -1 }),
            serde_json::json!({ "rating": 4.5 }),
            serde_json::json!({ "rating": "4" }),
            serde_json::json!({ "rating": 300 }),
            serde_json::json!({}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("PUT", "/api/current/rating", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
        let current = body_json(
            app.clone()
                .oneshot(empty_request("GET", "/api/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(current["activeRecord"]["rating"], 4);

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/current/favorite"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], record["id"]);
        assert_eq!(json["isFavorite"], true);

        let favorites = body_json(
            app.oneshot(empty_request("GET", "/api/history?favorites=true"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(favorites.as_array().unwrap().len(), 1);
        assert_eq!(favorites[0]["rating"], 4);
    }

    #[tokio::test]
    async fn current_actions_without_selection_return_409() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        generate(&app, &provider, "# Soup").await;

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/current"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/current/rating",
                &serde_json::json!({ "rating": 3 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/current/favorite"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let history = body_json(
            app.oneshot(empty_request("GET", "/api/history"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_history_resets_selection() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        generate(&app, &provider, "# Tacos").await;

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", "/api/history"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let status = body_json(
            app.oneshot(empty_request("GET", "/api/status"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status["historyLen"], 0);
        assert!(status["activeRecordId"].is_null());
        assert!(status["display"].is_null());
    }

    #[tokio::test]
    async fn dark_mode_round_trip() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider);

        let json = body_json(
            app.clone()
                .oneshot(empty_request("GET", "/api/settings/dark-mode"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["enabled"], false);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/settings/dark-mode",
                &serde_json::json!({ "enabled": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(
            app.oneshot(empty_request("GET", "/api/settings/dark-mode"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["enabled"], true);
    }

    #[tokio::test]
    async fn client_disconnect_does_not_cancel_generation() {
        let provider = Arc::new(GatedProvider::default());
        let app = test_app(provider.clone());
        let release = provider.gate();

        let request = tokio::spawn(
            app.clone()
                .oneshot(json_request("POST", "/api/recipes", &recipe_body())),
        );
        while provider.calls() < 1 {
            tokio::task::yield_now().await;
        }
        request.abort();
        assert!(request.await.unwrap_err().is_cancelled());

        release.send(Ok("# Finished anyway".to_string())).unwrap();
        let status = loop {
            let status = body_json(
                app.clone()
                    .oneshot(empty_request("GET", "/api/status"))
                    .await
                    .unwrap(),
            )
            .await;
            if status["loading"] == false {
                break status;
            }
            tokio::task::yield_now().await;
        };
        assert_eq!(status["historyLen"], 1);
        assert_eq!(status["display"], "# Finished anyway");
    }

    #[tokio::test]
    async fn security_headers_present() {
        let app = test_app(Arc::new(GatedProvider::default()));

        let response = app
            .oneshot(empty_request("GET", "/api/status"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            response.headers().get("content-security-policy").unwrap(),
            "default-src 'none'"
        );
    }

    #[tokio::test]
    async fn body_size_limit_rejects_oversized() {
        let app = test_app(Arc::new(GatedProvider::default()));

        let big_body = vec![0u8; BODY_LIMIT + 1];
        let response = app
            .oneshot(
                axum::http::Request::post("/api/recipes")
                    .header("content-type", "application/json")
                    .body(Body::from(big_body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn internal_error_does_not_leak_details() {
        let error = ApiError::Internal(anyhow::anyhow!("secret database path /home/user/.sous/db"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}

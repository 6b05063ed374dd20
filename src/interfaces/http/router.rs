//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put, MethodRouter},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CategoryService, Mailer, MusicService, UserService};
use crate::config::AppConfig;
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::repositories::{
    CategoryRepository, MusicRepository, UserRepository,
};
use crate::infrastructure::storage::{UploadStore, UPLOADS_ROUTE};
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::error::ErrorBody;
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, categories, health, music, users};

/// Shared state for every route. Handlers extract their own state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub user_service: Arc<UserService<UserRepository>>,
    pub category_service: Arc<CategoryService<CategoryRepository>>,
    pub music_service: Arc<MusicService<MusicRepository, CategoryRepository>>,
    pub cookies: auth::CookieSettings,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let categories = Arc::new(CategoryRepository::new(db.clone()));

        let user_service = UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            JwtConfig::from(&config.security),
            mailer,
            config.server.frontend_url.clone(),
        );
        let music_service = MusicService::new(
            Arc::new(MusicRepository::new(db.clone())),
            Arc::clone(&categories),
            UploadStore::new(&config.uploads),
        );

        Self {
            db,
            user_service: Arc::new(user_service),
            category_service: Arc::new(CategoryService::new(categories)),
            music_service: Arc::new(music_service),
            cookies: auth::CookieSettings {
                secure: config.server.secure_cookies,
                max_age_hours: config.security.jwt_expiration_hours,
            },
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            user_service: Arc::clone(&s.user_service),
            cookies: s.cookies.clone(),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for categories::CategoryHandlerState {
    fn from_ref(s: &AppState) -> Self {
        categories::CategoryHandlerState {
            category_service: Arc::clone(&s.category_service),
        }
    }
}

impl FromRef<AppState> for music::MusicHandlerState {
    fn from_ref(s: &AppState) -> Self {
        music::MusicHandlerState {
            music_service: Arc::clone(&s.music_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token; the `jwt` cookie is accepted too"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Authentication
        auth::register,
        auth::login,
        auth::logout,
        auth::get_profile,
        auth::update_profile,
        auth::forgot_password,
        auth::reset_password,
        // Users
        users::list_users,
        users::get_user,
        users::delete_user,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::add_category_type,
        categories::update_category_type,
        categories::delete_category_type,
        // Music
        music::list_music,
        music::list_music_by_category,
        music::create_music,
        music::update_music,
        music::delete_music,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            // Authentication
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::ProfileResponse,
            auth::UpdateProfileRequest,
            auth::ForgotPasswordRequest,
            auth::ResetPasswordRequest,
            // Users
            users::UserDto,
            // Categories
            categories::CategoryDto,
            categories::CategoryTypeDto,
            categories::CategoryTypeInput,
            categories::CreateCategoryRequest,
            categories::UpdateCategoryRequest,
            categories::AddCategoryTypeRequest,
            categories::UpdateCategoryTypeRequest,
            // Music
            music::MusicResponse,
            music::CategorySummaryDto,
            music::MusicForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Registration, login, profile and password reset"),
        (name = "Users", description = "Admin user management"),
        (name = "Categories", description = "Music categories and their types"),
        (name = "Music", description = "Tracks with audio and thumbnail uploads"),
    ),
    info(
        title = "Music Catalog API",
        version = "1.0.0",
        description = "REST API for managing a music catalog",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Requires a valid session
fn signed_in(route: MethodRouter<AppState>, auth: &AuthState) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(auth.clone(), auth_middleware))
}

/// Requires a valid session with the admin role
fn admin_only(route: MethodRouter<AppState>, auth: &AuthState) -> MethodRouter<AppState> {
    // the last route_layer runs first
    route
        .route_layer(from_fn(admin_middleware))
        .route_layer(from_fn_with_state(auth.clone(), auth_middleware))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "Invalid frontend URL, CORS origin not set");
            cors
        }
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState, config: &AppConfig) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let user_routes = Router::new()
        .route(
            "/",
            post(auth::register).merge(admin_only(get(users::list_users), &auth_state)),
        )
        .route("/auth", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/profile",
            signed_in(
                get(auth::get_profile).put(auth::update_profile),
                &auth_state,
            ),
        )
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password/{token}", post(auth::reset_password))
        .route(
            "/{id}",
            admin_only(
                get(users::get_user).delete(users::delete_user),
                &auth_state,
            ),
        );

    let category_routes = Router::new()
        .route("/", get(categories::list_categories))
        .route(
            "/create",
            admin_only(post(categories::create_category), &auth_state),
        )
        .route(
            "/{id}",
            admin_only(
                put(categories::update_category).delete(categories::delete_category),
                &auth_state,
            ),
        )
        .route(
            "/{id}/types",
            admin_only(post(categories::add_category_type), &auth_state),
        )
        .route(
            "/{id}/types/{type_id}",
            admin_only(
                put(categories::update_category_type).delete(categories::delete_category_type),
                &auth_state,
            ),
        );

    // audio + thumbnail + text fields
    let upload_body_limit = config.uploads.max_file_size.saturating_mul(2) + 1024 * 1024;

    let music_routes = Router::new()
        .route("/", get(music::list_music))
        .route("/category/{category_id}", get(music::list_music_by_category))
        .route("/create", admin_only(post(music::create_music), &auth_state))
        .route(
            "/{id}",
            admin_only(
                put(music::update_music).delete(music::delete_music),
                &auth_state,
            ),
        )
        .layer(DefaultBodyLimit::max(upload_body_limit));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        .nest("/api/users", user_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/music", music_routes)
        // Uploaded files, read-only
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.uploads.dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(&config.server.frontend_url))
        .with_state(state)
}

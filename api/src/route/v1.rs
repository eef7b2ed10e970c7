use axum::Router;
use registry::AppRegistry;

use super::{
    auth::build_auth_routers, booking::build_booking_routers,
    equipment::build_equipment_routers, health::build_health_check_routers,
    room::build_room_routers, user::build_user_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_room_routers())
        .merge(build_equipment_routers())
        .merge(build_booking_routers());

    Router::new().nest("/api/v1", router)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adapter::{database::connect_database_with, redis::RedisClient};
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use shared::config::{
        AppConfig, AuthConfig, DatabaseConfig, RedisConfig, SeedConfig, ServerConfig,
    };
    use tower::ServiceExt;

    use super::*;

    // 接続は遅延されるため、DB や Redis に触れない経路だけを確かめる
    fn app() -> Router {
        let config = AppConfig {
            database: DatabaseConfig {
                host: "localhost".into(),
                port: 5432,
                username: "app".into(),
                password: "passwd".into(),
                database: "app".into(),
            },
            redis: RedisConfig {
                host: "localhost".into(),
                port: 6379,
            },
            auth: AuthConfig { ttl: 3600 },
            seed: SeedConfig {
                admin_password: "Admin123!".into(),
                staff_password: "Staff123!".into(),
            },
            server: ServerConfig { port: 8080 },
        };
        let pool = connect_database_with(&config.database);
        let kv = Arc::new(RedisClient::new(&config.redis).unwrap());
        routes().with_state(AppRegistry::new(pool, kv, &config))
    }

    #[tokio::test]
    async fn liveness_is_public() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bookings_require_a_bearer_token() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/bookings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app()
            .oneshot(
                Request::post("/api/v1/bookings/1/approve")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

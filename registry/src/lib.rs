use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, booking::BookingRepositoryImpl,
        equipment::EquipmentRepositoryImpl, health::HealthCheckRepositoryImpl,
        room::RoomRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    repository::{
        auth::AuthRepository, equipment::EquipmentRepository,
        health::HealthCheckRepository, room::RoomRepository, user::UserRepository,
    },
    service::booking::BookingService,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    room_repository: Arc<dyn RoomRepository>,
    equipment_repository: Arc<dyn EquipmentRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    booking_service: Arc<BookingService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: &AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let room_repository: Arc<dyn RoomRepository> =
            Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let equipment_repository = Arc::new(EquipmentRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let booking_service = Arc::new(BookingService::new(
            Arc::new(BookingRepositoryImpl::new(pool.clone())),
            room_repository.clone(),
        ));
        Self {
            health_check_repository,
            room_repository,
            equipment_repository,
            user_repository,
            auth_repository,
            booking_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn equipment_repository(&self) -> Arc<dyn EquipmentRepository> {
        self.equipment_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }
}

use sea_orm::DatabaseConnection;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

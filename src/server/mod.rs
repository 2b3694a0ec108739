use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::probe::{self, ServiceStatus};
use crate::scanner::{self, ProjectInfo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/api/status", get(get_service_status))
        .route("/api/projects", get(get_projects))
        .route("/mongo-test", get(mongo_test))
        // Dashboard page: static frontend rendering the two JSON endpoints
        .fallback_service(ServeDir::new("static"))
        .with_state(AppState { config })
}

// ===================== Dashboard Handlers =====================

async fn get_service_status(State(state): State<AppState>) -> Json<Vec<ServiceStatus>> {
    let config = &state.config;

    // The two database probes share no state; run them side by side so a
    // slow backend only costs the slower of the two timeouts.
    let (mariadb, mongodb) = tokio::join!(
        probe::mariadb::get_status(&config.mariadb),
        probe::mongo::get_status(&config.mongodb_uri),
    );

    let mut statuses = vec![mariadb, mongodb];
    statuses.extend(probe::toolchain::get_status().await);
    Json(statuses)
}

async fn get_projects(State(state): State<AppState>) -> Json<Vec<ProjectInfo>> {
    let base = &state.config.projects_dir;
    let projects = match scanner::scan_projects(base) {
        Ok(projects) => projects,
        Err(e) => {
            // Unreadable base directory degrades to the page's empty state
            tracing::warn!("project scan of {} failed: {}", base.display(), e);
            Vec::new()
        }
    };
    Json(projects)
}

// ===================== MongoDB Test Page =====================

async fn mongo_test(State(state): State<AppState>) -> String {
    let mut out = String::from("MongoDB connection test\n");
    out.push_str(&format!("generated at {}\n\n", chrono::Utc::now().to_rfc3339()));

    match probe::mongo::round_trip(&state.config.mongodb_uri).await {
        Ok(result) => {
            out.push_str("connection: ok\n\ndatabases:\n");
            for (name, size_on_disk) in &result.databases {
                out.push_str(&format!("  {} ({} bytes)\n", name, size_on_disk));
            }
            out.push_str(&format!(
                "\ninserted one record into test_db.test_collection (random={})\n",
                result.inserted_random
            ));
            out.push_str(&format!(
                "test_db.test_collection now holds {} record(s)\n",
                result.documents
            ));
        }
        Err(e) => {
            out.push_str(&format!("connection failed: {}\n", e));
        }
    }
    out
}

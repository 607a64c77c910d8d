use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hd_core::aggregate::ArticleRow;
use hd_core::{run, Dashboard, Notice, RunOptions, RunOutcome};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::AppState;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Halted(Notice),
    #[error(transparent)]
    Core(#[from] hd_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Halted(notice) => {
                (StatusCode::NOT_FOUND, Json(json!({ "notice": notice.to_string() }))).into_response()
            }
            ApiError::Core(e) => {
                error!("❌ Dashboard run failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))).into_response()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicQuery {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
    pub all_label: String,
}

async fn render(state: &AppState, query: &TopicQuery) -> Result<Dashboard, ApiError> {
    let config = &state.config;
    let options = RunOptions {
        topic: config.parse_topic(query.topic.as_deref().unwrap_or_default()),
        cleaner: config.cleaner(),
        ..RunOptions::default()
    };

    let store = hd_storage::create_store(&config.store_url).await?;
    let outcome = run(store.as_ref(), &options).await?;
    drop(store);

    match outcome {
        RunOutcome::Rendered(dashboard) => Ok(dashboard),
        RunOutcome::Halted(notice) => {
            info!("🛑 {}", notice);
            Err(ApiError::Halted(notice))
        }
    }
}

pub async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(TopicsResponse {
        topics: state.config.topic_choices(),
        all_label: state.config.all_label.clone(),
    })
}

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(render(&state, &query).await?))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<Vec<ArticleRow>>, ApiError> {
    Ok(Json(render(&state, &query).await?.articles))
}

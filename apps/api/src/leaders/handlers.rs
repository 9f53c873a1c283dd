//! Axum route handlers for the Leaders API.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::error;

use crate::errors::AppError;
use crate::leaders::{leader_name, LeaderEntry, LeaderProfile, UnavailableLeader, LEADERS};
use crate::state::AppState;

/// GET /api/leaders
///
/// Always lists the whole roster. A leader that fails to resolve is replaced
/// by a placeholder entry instead of failing the response.
pub async fn handle_list_leaders(State(state): State<AppState>) -> Json<Vec<LeaderEntry>> {
    let mut entries = Vec::with_capacity(LEADERS.len());

    for (id, name) in LEADERS {
        let entry = match state.leaders.resolve(name).await {
            Ok(leader) => LeaderEntry::Profile(LeaderProfile::new(id, leader)),
            Err(e) => {
                error!("Failed to fetch leader data: {e}");
                LeaderEntry::Unavailable(UnavailableLeader::new(id, name, e.to_string()))
            }
        };
        entries.push(entry);
    }

    Json(entries)
}

/// GET /api/leaders/:leader_id
pub async fn handle_get_leader(
    State(state): State<AppState>,
    Path(leader_id): Path<String>,
) -> Result<Json<LeaderProfile>, AppError> {
    let name = leader_name(&leader_id)
        .ok_or_else(|| AppError::NotFound("Leader not found".to_string()))?;

    let leader = state.leaders.resolve(name).await?;
    Ok(Json(LeaderProfile::new(&leader_id, leader)))
}

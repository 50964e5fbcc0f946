use crate::errors::StoreError;
use crate::models::Goal;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

pub async fn load_goals(path: &Path) -> Vec<Goal> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Goal>>(&bytes) {
            Ok(goals) => dedupe_ids(drop_invalid(goals)),
            Err(err) => {
                error!("failed to parse goals file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read goals file: {err}");
            Vec::new()
        }
    }
}

pub async fn persist_goals(path: &Path, goals: &[Goal]) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(goals).map_err(StoreError::storage)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(StoreError::storage)?;
    }
    fs::write(path, payload).await.map_err(StoreError::storage)?;
    Ok(())
}

fn drop_invalid(goals: Vec<Goal>) -> Vec<Goal> {
    goals
        .into_iter()
        .filter(|goal| match goal.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %goal.id, "dropping stored goal: {err}");
                false
            }
        })
        .collect()
}

// Keeps the first goal for each id.
fn dedupe_ids(goals: Vec<Goal>) -> Vec<Goal> {
    let mut seen = HashSet::with_capacity(goals.len());
    goals
        .into_iter()
        .filter(|goal| {
            let fresh = seen.insert(goal.id.clone());
            if !fresh {
                warn!(id = %goal.id, "dropping goal with duplicate id");
            }
            fresh
        })
        .collect()
}

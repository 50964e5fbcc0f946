use crate::errors::StoreError;
use crate::models::{Goal, GoalInput};
use crate::storage::{load_goals, persist_goals};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

/// Immutable view of the collection at one point in time.
pub type Snapshot = Arc<[Goal]>;

/// Owns the goal collection and its durable blob.
///
/// Every mutation writes the whole collection before it returns. A failed
/// write leaves the in-memory collection as it was, and subscribers are
/// only notified after a successful write.
pub struct GoalStore {
    path: PathBuf,
    goals: Vec<Goal>,
    changes: watch::Sender<Snapshot>,
}

impl GoalStore {
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let goals = load_goals(&path).await;
        info!(count = goals.len(), path = %path.display(), "loaded goals");
        let (changes, _) = watch::channel(Snapshot::from(goals.clone()));
        Self {
            path,
            goals,
            changes,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.goals.clone())
    }

    /// Receives the new snapshot after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    pub async fn create(&mut self, input: GoalInput) -> Result<Goal, StoreError> {
        input.validate()?;
        let goal = Goal {
            id: self.fresh_id(),
            name: input.name,
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            category: input.category,
            created_at: Utc::now().timestamp_millis(),
            notes: input.notes,
        };

        let mut next = Vec::with_capacity(self.goals.len() + 1);
        next.push(goal.clone());
        next.extend(self.goals.iter().cloned());
        self.commit(next).await?;

        info!(id = %goal.id, "created goal");
        Ok(goal)
    }

    pub async fn update(&mut self, id: &str, input: GoalInput) -> Result<Goal, StoreError> {
        input.validate()?;
        let index = self.position(id)?;

        let mut next = self.goals.clone();
        next[index].apply(input);
        let updated = next[index].clone();
        self.commit(next).await?;

        info!(id, "updated goal");
        Ok(updated)
    }

    /// Sets the saved amount to `new_amount`. Callers adding a delta pass
    /// `current + delta`.
    pub async fn contribute(&mut self, id: &str, new_amount: f64) -> Result<Goal, StoreError> {
        if !new_amount.is_finite() || new_amount < 0.0 {
            return Err(StoreError::InvalidAmount(new_amount));
        }
        let index = self.position(id)?;

        let mut next = self.goals.clone();
        next[index].current_amount = new_amount;
        let updated = next[index].clone();
        self.commit(next).await?;

        info!(id, amount = new_amount, "recorded contribution");
        Ok(updated)
    }

    /// Removes the goal if present. An unknown id is not an error.
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let next: Vec<Goal> = self
            .goals
            .iter()
            .filter(|goal| goal.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.goals.len();
        self.commit(next).await?;

        if removed {
            info!(id, "deleted goal");
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    async fn commit(&mut self, next: Vec<Goal>) -> Result<(), StoreError> {
        if let Err(err) = persist_goals(&self.path, &next).await {
            error!("failed to persist goals: {err}");
            return Err(err);
        }
        let changed = next != self.goals;
        self.goals = next;
        if changed {
            self.changes.send_replace(self.snapshot());
        }
        Ok(())
    }
}

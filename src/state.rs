use crate::advice::AdviceRequester;
use crate::store::GoalStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<GoalStore>>,
    pub advisor: AdviceRequester,
}

impl AppState {
    pub fn new(store: GoalStore, advisor: AdviceRequester) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            advisor,
        }
    }
}

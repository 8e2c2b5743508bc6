use crate::entities::Subscriber;
use crate::models::PendingTable;
use serde::Serialize;
use utoipa::ToSchema;

/// Result of moving a pending card into `AuthTable`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivationOutcome {
    pub source: PendingTable,
    /// Id of the staging row that was removed.
    pub consumed_id: i64,
    pub subscriber: Subscriber,
}

impl ActivationOutcome {
    pub fn message(&self) -> String {
        format!(
            "{} with id={}, userlogin={} has been activated.",
            self.source.label(),
            self.consumed_id,
            self.subscriber.user_login
        )
    }
}

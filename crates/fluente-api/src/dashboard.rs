// Dashboard endpoint
//
// The backend computes all aggregates; the client only renders them.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Error;

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: String,
}

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_consultants: u64,
    pub total_contents: u64,
    pub total_classes: u64,
    pub active_classes: u64,
    pub total_enrollments: u64,
    pub recent_enrollments: u64,
    pub attendance_rate: f64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub paid_payments: u64,
    pub pending_payments: u64,
    pub overdue_payments: u64,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
}

impl ApiClient {
    /// Fetch the dashboard aggregates.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.get("dashboard/stats", &[]).await
    }
}

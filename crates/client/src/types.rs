//! Wire DTOs for the console API.
//!
//! Field names mirror the JSON contract; optional wire fields default to
//! their empty forms so partial server responses never fail to decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic `{ ok }` acknowledgement returned by state-changing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResp {
    pub ok: bool,
}

/// Response of the session-check endpoint (`GET /api/auth/me`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthMeResp {
    pub authenticated: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub can_view_board: bool,
    #[serde(default)]
    pub can_view_nodes: bool,
    #[serde(default)]
    pub can_review_requests: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub advisor: String,
    #[serde(default)]
    pub expected_graduation_year: Option<i32>,
    #[serde(default)]
    pub phone: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResp {
    pub username: String,
    pub balance: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub node_id: String,
    pub username: String,
    #[serde(default)]
    pub local_username: String,
    #[serde(default)]
    pub billing_username: String,
    #[serde(default)]
    pub registered: bool,
    pub timestamp: String,
    #[serde(default)]
    pub pid: Option<u32>,
    pub cpu_percent: f64,
    pub memory_mb: f64,
    #[serde(default)]
    pub gpu_count: Option<u32>,
    #[serde(default)]
    pub command: String,
    pub gpu_usage: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageUserSummary {
    pub username: String,
    pub usage_records: u64,
    pub gpu_process_records: u64,
    pub cpu_process_records: u64,
    pub total_cpu_percent: f64,
    pub total_memory_mb: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMonthlySummary {
    pub month: String,
    pub username: String,
    pub usage_records: u64,
    pub gpu_process_records: u64,
    pub cpu_process_records: u64,
    pub total_cpu_percent: f64,
    pub total_memory_mb: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformUsageUserSummary {
    pub platform_username: String,
    pub usage_records: u64,
    pub gpu_process_records: u64,
    pub cpu_process_records: u64,
    pub total_cpu_percent: f64,
    pub total_memory_mb: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformUsageNodeDetail {
    pub node_id: String,
    pub cpu_model: String,
    pub cpu_count: u32,
    pub gpu_model: String,
    pub gpu_count: u32,
    pub last_seen_at: String,
    pub usage_records: u64,
    pub total_cpu_percent: f64,
    pub total_memory_mb: f64,
    pub total_cost: f64,
    pub last_usage_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RechargeSummary {
    pub username: String,
    pub recharge_count: u64,
    pub recharge_total: f64,
    pub last_recharge: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatus {
    pub node_id: String,
    pub last_seen_at: String,
    pub last_report_id: String,
    pub last_report_ts: String,
    pub interval_seconds: u64,
    #[serde(default)]
    pub cpu_model: String,
    #[serde(default)]
    pub cpu_count: Option<u32>,
    #[serde(default)]
    pub gpu_model: String,
    #[serde(default)]
    pub gpu_count: Option<u32>,
    #[serde(default)]
    pub net_rx_mb_month: Option<f64>,
    #[serde(default)]
    pub net_tx_mb_month: Option<f64>,
    pub gpu_process_count: u64,
    pub cpu_process_count: u64,
    pub usage_records_count: u64,
    #[serde(default)]
    pub ssh_active_count: Option<u64>,
    pub cost_total: f64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNodeAccount {
    pub node_id: String,
    pub local_username: String,
    pub billing_username: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Entry of a per-node SSH access list. The whitelist, blacklist, and
/// exemption lists share this wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAccessEntry {
    pub node_id: String,
    pub local_username: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuQueueEntry {
    pub username: String,
    pub gpu_type: String,
    pub count: u64,
    pub timestamp: String,
}

/// A GPU price row. Older server handlers emit capitalized field names, so
/// both spellings decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuPrice {
    #[serde(default, alias = "Model")]
    pub model: String,
    #[serde(default, alias = "Price")]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryResolveResp {
    pub registered: bool,
    #[serde(default)]
    pub billing_username: String,
    #[serde(default)]
    pub blacklisted: bool,
    #[serde(default)]
    pub exempted: bool,
}

/// A user's bind/open access request, as listed and reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub request_id: u64,
    pub request_type: String,
    pub billing_username: String,
    pub node_id: String,
    pub local_username: String,
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub reviewed_by: String,
    #[serde(default)]
    pub reviewed_at: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub apply_count_by_billing: Option<u64>,
    #[serde(default)]
    pub duplicate_flag: bool,
    #[serde(default)]
    pub duplicate_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub announcement_id: u64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Row of the coarse admin user listing, which predates the detailed one and
/// still emits capitalized field names from some handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserRow {
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Balance")]
    pub balance: f64,
    #[serde(default, alias = "Status")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserDetail {
    pub username: String,
    pub role: String,
    pub can_view_board: bool,
    pub can_view_nodes: bool,
    pub can_review_requests: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub advisor: String,
    #[serde(default)]
    pub expected_graduation_year: Option<i32>,
    #[serde(default)]
    pub phone: String,
    pub balance: f64,
    pub status: String,
    pub usage_records: u64,
    pub total_cost: f64,
    #[serde(default)]
    pub last_usage_at: String,
    #[serde(default)]
    pub node_accounts: Vec<UserNodeAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileChangeRequest {
    pub request_id: u64,
    pub billing_username: String,
    #[serde(default)]
    pub old_username: String,
    #[serde(default)]
    pub old_email: String,
    #[serde(default)]
    pub old_student_id: String,
    #[serde(default)]
    pub new_username: String,
    #[serde(default)]
    pub new_email: String,
    #[serde(default)]
    pub new_student_id: String,
    #[serde(default)]
    pub reason: String,
    pub status: String,
    #[serde(default)]
    pub reviewed_by: String,
    #[serde(default)]
    pub reviewed_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUser {
    pub username: String,
    pub can_view_board: bool,
    pub can_view_nodes: bool,
    pub can_review_requests: bool,
    pub created_by: String,
    pub updated_by: String,
    #[serde(default)]
    pub last_login_at: String,
    pub created_at: String,
    pub updated_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Request payloads
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub username: String,
    pub password: String,
    pub real_name: String,
    pub student_id: String,
    pub advisor: String,
    pub expected_graduation_year: i32,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdatePayload {
    pub email: String,
    pub username: String,
    pub student_id: String,
    pub real_name: String,
    pub advisor: String,
    pub expected_graduation_year: i32,
    pub phone: String,
    pub change_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResp {
    pub ok: bool,
    pub profile_updated: bool,
    pub request_submitted: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountRef {
    pub node_id: String,
    pub local_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountUpdatePayload {
    pub old_node_id: String,
    pub old_local_username: String,
    pub new_node_id: String,
    pub new_local_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminAccountUpdatePayload {
    pub old_billing_username: String,
    pub old_node_id: String,
    pub old_local_username: String,
    pub new_billing_username: String,
    pub new_node_id: String,
    pub new_local_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUserPermissions {
    pub can_view_board: bool,
    pub can_view_nodes: bool,
    pub can_review_requests: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePowerUserPayload {
    pub username: String,
    pub password: String,
    pub can_view_board: bool,
    pub can_view_nodes: bool,
    pub can_review_requests: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// List envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementList {
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecordList {
    pub records: Vec<UsageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<UserNodeAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestList {
    pub requests: Vec<UserRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileChangeRequestList {
    pub requests: Vec<ProfileChangeRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<NodeStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceList {
    pub prices: Vec<GpuPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserList {
    pub users: Vec<AdminUserRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserDetailList {
    pub users: Vec<AdminUserDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAccessEntryList {
    pub entries: Vec<NodeAccessEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuQueueList {
    pub queue: Vec<GpuQueueEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshDisconnectResp {
    pub ok: bool,
    pub node_id: String,
    pub ssh_active_count: u64,
    pub message: String,
}

/// Per-node usage breakdown for a single platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformUserNodesResp {
    pub from: String,
    pub to: String,
    pub username: String,
    pub rows: Vec<PlatformUsageNodeDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUserList {
    pub users: Vec<PowerUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindRequestResp {
    pub ok: bool,
    pub request_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequestResp {
    pub ok: bool,
    pub request_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewedRequestResp {
    pub ok: bool,
    pub request: UserRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewedProfileChangeResp {
    pub ok: bool,
    pub request: ProfileChangeRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReviewResp {
    pub ok: bool,
    pub ok_count: u64,
    pub fail_count: u64,
    #[serde(default)]
    pub fail_items: Vec<BatchReviewFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReviewFailure {
    pub request_id: u64,
    pub error: String,
}

/// Date-windowed statistics envelope shared by the admin stats endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResp<T> {
    pub from: String,
    pub to: String,
    pub rows: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rows_decode_both_capitalizations() {
        let lower: GpuPrice = serde_json::from_str(r#"{"model":"A100","price":1.5}"#).unwrap();
        assert_eq!(lower.model, "A100");
        assert_eq!(lower.price, 1.5);

        let upper: GpuPrice = serde_json::from_str(r#"{"Model":"H100","Price":3.0}"#).unwrap();
        assert_eq!(upper.model, "H100");
        assert_eq!(upper.price, 3.0);
    }

    #[test]
    fn admin_user_rows_decode_both_capitalizations() {
        let list: AdminUserList = serde_json::from_str(
            r#"{"users":[
                {"Username":"alice","Balance":10.0,"Status":"active"},
                {"username":"bob","balance":0.0,"status":"frozen"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(list.users[0].username, "alice");
        assert_eq!(list.users[0].balance, 10.0);
        assert_eq!(list.users[1].username, "bob");
        assert_eq!(list.users[1].status, "frozen");
    }
}

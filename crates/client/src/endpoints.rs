//! One-line typed wrappers for the console API endpoints.
//!
//! Everything here is thin glue over the [`ApiClient`] pipeline; the pipeline
//! owns credentials, CSRF, and error normalization.

use serde_json::json;

use meterdesk_core::ApiError;

use crate::pipeline::ApiClient;
use crate::types::*;

impl ApiClient {
    pub async fn healthz(&self) -> Result<OkResp, ApiError> {
        self.get_json("/healthz", &[]).await
    }

    pub async fn metrics_text(&self) -> Result<String, ApiError> {
        self.get_text("/metrics").await
    }

    // ── auth ────────────────────────────────────────────────────────────────

    pub async fn auth_login(&self, username: &str, password: &str) -> Result<OkResp, ApiError> {
        self.post_json("/api/auth/login", &json!({ "username": username, "password": password }))
            .await
    }

    pub async fn auth_logout(&self) -> Result<OkResp, ApiError> {
        self.post_json("/api/auth/logout", &json!({})).await
    }

    pub async fn auth_register(&self, payload: &RegisterPayload) -> Result<OkResp, ApiError> {
        self.post_json("/api/auth/register", payload).await
    }

    pub async fn auth_forgot_password(&self, email: &str) -> Result<OkResp, ApiError> {
        self.post_json("/api/auth/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn auth_reset_password(
        &self,
        username: &str,
        token: &str,
        new_password: &str,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/auth/reset-password",
            &json!({ "username": username, "token": token, "new_password": new_password }),
        )
        .await
    }

    pub async fn auth_change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/auth/change-password",
            &json!({ "current_password": current_password, "new_password": new_password }),
        )
        .await
    }

    // ── user self-service ───────────────────────────────────────────────────

    pub async fn user_me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/api/user/me", &[]).await
    }

    pub async fn user_update_profile(
        &self,
        payload: &ProfileUpdatePayload,
    ) -> Result<ProfileUpdateResp, ApiError> {
        self.post_json("/api/user/me/profile", payload).await
    }

    pub async fn user_profile_change_requests(
        &self,
        limit: u32,
    ) -> Result<ProfileChangeRequestList, ApiError> {
        self.get_json(
            "/api/user/me/profile-change-requests",
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn user_my_balance(&self) -> Result<BalanceResp, ApiError> {
        self.get_json("/api/user/me/balance", &[]).await
    }

    pub async fn user_my_usage(&self, limit: u32) -> Result<UsageRecordList, ApiError> {
        self.get_json("/api/user/me/usage", &[("limit", limit.to_string())])
            .await
    }

    pub async fn user_accounts(&self) -> Result<AccountList, ApiError> {
        self.get_json("/api/user/accounts", &[]).await
    }

    pub async fn user_upsert_account(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/user/accounts",
            &json!({ "node_id": node_id, "local_username": local_username }),
        )
        .await
    }

    pub async fn user_update_account(
        &self,
        payload: &AccountUpdatePayload,
    ) -> Result<OkResp, ApiError> {
        self.put_json("/api/user/accounts", payload).await
    }

    pub async fn user_delete_account(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.delete_json(
            "/api/user/accounts",
            &[
                ("node_id", node_id.to_string()),
                ("local_username", local_username.to_string()),
            ],
        )
        .await
    }

    // ── platform ────────────────────────────────────────────────────────────

    pub async fn announcements(&self, limit: u32) -> Result<AnnouncementList, ApiError> {
        self.get_json("/api/announcements", &[("limit", limit.to_string())])
            .await
    }

    pub async fn user_balance(&self, username: &str) -> Result<BalanceResp, ApiError> {
        self.get_json(&format!("/api/users/{username}/balance"), &[]).await
    }

    pub async fn user_usage(&self, username: &str, limit: u32) -> Result<UsageRecordList, ApiError> {
        self.get_json(
            &format!("/api/users/{username}/usage"),
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn registry_resolve(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<RegistryResolveResp, ApiError> {
        self.get_json(
            "/api/registry/resolve",
            &[
                ("node_id", node_id.trim().to_string()),
                ("local_username", local_username.trim().to_string()),
            ],
        )
        .await
    }

    pub async fn user_requests(
        &self,
        billing_username: &str,
        limit: u32,
    ) -> Result<RequestList, ApiError> {
        self.get_json(
            "/api/requests",
            &[
                ("billing_username", billing_username.trim().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    pub async fn create_bind_requests(
        &self,
        billing_username: &str,
        items: &[AccountRef],
        message: &str,
    ) -> Result<BindRequestResp, ApiError> {
        self.post_json(
            "/api/requests/bind",
            &json!({ "billing_username": billing_username, "items": items, "message": message }),
        )
        .await
    }

    pub async fn create_open_request(
        &self,
        billing_username: &str,
        node_id: &str,
        local_username: &str,
        message: &str,
    ) -> Result<OpenRequestResp, ApiError> {
        self.post_json(
            "/api/requests/open",
            &json!({
                "billing_username": billing_username,
                "node_id": node_id,
                "local_username": local_username,
                "message": message,
            }),
        )
        .await
    }

    // ── admin ───────────────────────────────────────────────────────────────

    pub async fn admin_users(&self) -> Result<AdminUserList, ApiError> {
        self.get_json("/api/admin/users", &[]).await
    }

    pub async fn admin_users_details(&self, limit: u32) -> Result<AdminUserDetailList, ApiError> {
        self.get_json("/api/admin/users/details", &[("limit", limit.to_string())])
            .await
    }

    pub async fn admin_prices(&self) -> Result<PriceList, ApiError> {
        self.get_json("/api/admin/prices", &[]).await
    }

    pub async fn admin_set_price(
        &self,
        gpu_model: &str,
        price_per_minute: f64,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/admin/prices",
            &json!({ "gpu_model": gpu_model, "price_per_minute": price_per_minute }),
        )
        .await
    }

    pub async fn admin_recharge(
        &self,
        username: &str,
        amount: f64,
        method: &str,
    ) -> Result<BalanceResp, ApiError> {
        self.post_json(
            &format!("/api/users/{username}/recharge"),
            &json!({ "amount": amount, "method": method }),
        )
        .await
    }

    pub async fn admin_usage(
        &self,
        billing_username: &str,
        local_username: &str,
        unregistered_only: bool,
        limit: u32,
    ) -> Result<UsageRecordList, ApiError> {
        let mut query = Vec::new();
        if !billing_username.trim().is_empty() {
            query.push(("billing_username", billing_username.trim().to_string()));
        }
        if !local_username.trim().is_empty() {
            query.push(("local_username", local_username.trim().to_string()));
        }
        if unregistered_only {
            query.push(("unregistered_only", "1".to_string()));
        }
        query.push(("limit", limit.to_string()));
        self.get_json("/api/admin/usage", &query).await
    }

    pub async fn admin_nodes(&self, limit: u32) -> Result<NodeList, ApiError> {
        self.get_json("/api/admin/nodes", &[("limit", limit.to_string())])
            .await
    }

    pub async fn admin_disconnect_node_ssh(&self, node_id: &str) -> Result<SshDisconnectResp, ApiError> {
        self.post_json(
            &format!("/api/admin/nodes/{node_id}/ssh/disconnect-all"),
            &json!({}),
        )
        .await
    }

    pub async fn admin_gpu_queue(&self) -> Result<GpuQueueList, ApiError> {
        self.get_json("/api/admin/gpu/queue", &[]).await
    }

    pub async fn admin_accounts(&self, billing_username: &str) -> Result<AccountList, ApiError> {
        let mut query = Vec::new();
        if !billing_username.trim().is_empty() {
            query.push(("billing_username", billing_username.trim().to_string()));
        }
        self.get_json("/api/admin/accounts", &query).await
    }

    pub async fn admin_upsert_account(
        &self,
        billing_username: &str,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/admin/accounts",
            &json!({
                "billing_username": billing_username,
                "node_id": node_id,
                "local_username": local_username,
            }),
        )
        .await
    }

    pub async fn admin_update_account(
        &self,
        payload: &AdminAccountUpdatePayload,
    ) -> Result<OkResp, ApiError> {
        self.put_json("/api/admin/accounts", payload).await
    }

    pub async fn admin_delete_account(
        &self,
        billing_username: &str,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.delete_json(
            "/api/admin/accounts",
            &[
                ("billing_username", billing_username.to_string()),
                ("node_id", node_id.to_string()),
                ("local_username", local_username.to_string()),
            ],
        )
        .await
    }

    // The SSH whitelist, blacklist, and exemption lists share one CRUD
    // surface; only the path segment differs.

    pub async fn admin_whitelist(&self, node_id: &str) -> Result<NodeAccessEntryList, ApiError> {
        self.access_list("whitelist", node_id).await
    }

    pub async fn admin_upsert_whitelist(
        &self,
        node_id: &str,
        usernames: &[String],
        billing_usernames: &[String],
    ) -> Result<OkResp, ApiError> {
        self.access_upsert("whitelist", node_id, usernames, billing_usernames)
            .await
    }

    pub async fn admin_delete_whitelist(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.access_delete("whitelist", node_id, local_username).await
    }

    pub async fn admin_blacklist(&self, node_id: &str) -> Result<NodeAccessEntryList, ApiError> {
        self.access_list("blacklist", node_id).await
    }

    pub async fn admin_upsert_blacklist(
        &self,
        node_id: &str,
        usernames: &[String],
        billing_usernames: &[String],
    ) -> Result<OkResp, ApiError> {
        self.access_upsert("blacklist", node_id, usernames, billing_usernames)
            .await
    }

    pub async fn admin_delete_blacklist(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.access_delete("blacklist", node_id, local_username).await
    }

    pub async fn admin_exemptions(&self, node_id: &str) -> Result<NodeAccessEntryList, ApiError> {
        self.access_list("exemptions", node_id).await
    }

    pub async fn admin_upsert_exemptions(
        &self,
        node_id: &str,
        usernames: &[String],
        billing_usernames: &[String],
    ) -> Result<OkResp, ApiError> {
        self.access_upsert("exemptions", node_id, usernames, billing_usernames)
            .await
    }

    pub async fn admin_delete_exemptions(
        &self,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.access_delete("exemptions", node_id, local_username).await
    }

    async fn access_list(&self, list: &str, node_id: &str) -> Result<NodeAccessEntryList, ApiError> {
        let mut query = Vec::new();
        if !node_id.is_empty() {
            query.push(("node_id", node_id.to_string()));
        }
        self.get_json(&format!("/api/admin/{list}"), &query).await
    }

    async fn access_upsert(
        &self,
        list: &str,
        node_id: &str,
        usernames: &[String],
        billing_usernames: &[String],
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            &format!("/api/admin/{list}"),
            &json!({
                "node_id": node_id,
                "usernames": usernames,
                "billing_usernames": billing_usernames,
            }),
        )
        .await
    }

    async fn access_delete(
        &self,
        list: &str,
        node_id: &str,
        local_username: &str,
    ) -> Result<OkResp, ApiError> {
        self.delete_json(
            &format!("/api/admin/{list}"),
            &[
                ("node_id", node_id.to_string()),
                ("local_username", local_username.to_string()),
            ],
        )
        .await
    }

    pub async fn admin_requests(&self, status: &str, limit: u32) -> Result<RequestList, ApiError> {
        let mut query = Vec::new();
        if !status.trim().is_empty() {
            query.push(("status", status.trim().to_string()));
        }
        query.push(("limit", limit.to_string()));
        self.get_json("/api/admin/requests", &query).await
    }

    pub async fn admin_approve_request(&self, request_id: u64) -> Result<ReviewedRequestResp, ApiError> {
        self.post_json(&format!("/api/admin/requests/{request_id}/approve"), &json!({}))
            .await
    }

    pub async fn admin_reject_request(&self, request_id: u64) -> Result<ReviewedRequestResp, ApiError> {
        self.post_json(&format!("/api/admin/requests/{request_id}/reject"), &json!({}))
            .await
    }

    pub async fn admin_batch_review(
        &self,
        request_ids: &[u64],
        new_status: &str,
    ) -> Result<BatchReviewResp, ApiError> {
        self.post_json(
            "/api/admin/requests/batch-review",
            &json!({ "request_ids": request_ids, "new_status": new_status }),
        )
        .await
    }

    pub async fn admin_profile_change_requests(
        &self,
        status: &str,
        username: &str,
        limit: u32,
    ) -> Result<ProfileChangeRequestList, ApiError> {
        let mut query = Vec::new();
        if !status.trim().is_empty() {
            query.push(("status", status.trim().to_string()));
        }
        if !username.trim().is_empty() {
            query.push(("username", username.trim().to_string()));
        }
        query.push(("limit", limit.to_string()));
        self.get_json("/api/admin/profile-change-requests", &query).await
    }

    pub async fn admin_approve_profile_change(
        &self,
        request_id: u64,
    ) -> Result<ReviewedProfileChangeResp, ApiError> {
        self.post_json(
            &format!("/api/admin/profile-change-requests/{request_id}/approve"),
            &json!({}),
        )
        .await
    }

    pub async fn admin_reject_profile_change(
        &self,
        request_id: u64,
    ) -> Result<ReviewedProfileChangeResp, ApiError> {
        self.post_json(
            &format!("/api/admin/profile-change-requests/{request_id}/reject"),
            &json!({}),
        )
        .await
    }

    pub async fn admin_create_announcement(
        &self,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<OkResp, ApiError> {
        self.post_json(
            "/api/admin/announcements",
            &json!({ "title": title, "content": content, "pinned": pinned }),
        )
        .await
    }

    pub async fn admin_delete_announcement(&self, announcement_id: u64) -> Result<OkResp, ApiError> {
        self.delete_json(&format!("/api/admin/announcements/{announcement_id}"), &[])
            .await
    }

    pub async fn admin_power_users(&self, limit: u32) -> Result<PowerUserList, ApiError> {
        self.get_json("/api/admin/power-users", &[("limit", limit.to_string())])
            .await
    }

    pub async fn admin_create_power_user(
        &self,
        payload: &CreatePowerUserPayload,
    ) -> Result<OkResp, ApiError> {
        self.post_json("/api/admin/power-users", payload).await
    }

    pub async fn admin_update_power_user_permissions(
        &self,
        username: &str,
        permissions: &PowerUserPermissions,
    ) -> Result<OkResp, ApiError> {
        self.put_json(
            &format!("/api/admin/power-users/{username}/permissions"),
            permissions,
        )
        .await
    }

    pub async fn admin_delete_power_user(&self, username: &str) -> Result<OkResp, ApiError> {
        self.delete_json(&format!("/api/admin/power-users/{username}"), &[])
            .await
    }

    pub async fn admin_stats_users(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<StatsResp<UsageUserSummary>, ApiError> {
        self.get_json("/api/admin/stats/users", &Self::window(from, to, limit))
            .await
    }

    pub async fn admin_stats_platform_users(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<StatsResp<PlatformUsageUserSummary>, ApiError> {
        self.get_json(
            "/api/admin/stats/platform-users",
            &Self::window(from, to, limit),
        )
        .await
    }

    pub async fn admin_stats_platform_user_nodes(
        &self,
        username: &str,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<PlatformUserNodesResp, ApiError> {
        self.get_json(
            &format!("/api/admin/stats/platform-users/{username}/nodes"),
            &Self::window(from, to, limit),
        )
        .await
    }

    pub async fn admin_stats_monthly(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<StatsResp<UsageMonthlySummary>, ApiError> {
        self.get_json("/api/admin/stats/monthly", &Self::window(from, to, limit))
            .await
    }

    pub async fn admin_stats_recharges(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<StatsResp<RechargeSummary>, ApiError> {
        self.get_json("/api/admin/stats/recharges", &Self::window(from, to, limit))
            .await
    }

    fn window(from: &str, to: &str, limit: u32) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !from.is_empty() {
            query.push(("from", from.to_string()));
        }
        if !to.is_empty() {
            query.push(("to", to.to_string()));
        }
        query.push(("limit", limit.to_string()));
        query
    }
}

use common::account::{LoginRequest, SessionInfo};

use crate::api::get_store;
use crate::api::store_service::StoreBackend;

pub async fn login(request: LoginRequest) -> anyhow::Result<SessionInfo> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        anyhow::bail!("Email and password are required");
    }
    get_store().await?.login(request.email.trim(), &request.password).await
}

pub async fn logout(session: SessionInfo) -> anyhow::Result<()> {
    get_store().await?.logout(&session).await
}

use async_trait::async_trait;

use crate::{
    api::zaptec::{ChargeSession, Installation},
    core::period::DateRange,
    prelude::*,
};

/// Cloud that knows the user's charging installations and their charge history.
#[async_trait]
pub trait ChargingCloud: Sync {
    async fn get_installations(&self) -> Result<Vec<Installation>>;

    async fn get_charge_history(
        &self,
        installation_id: &str,
        range: DateRange,
    ) -> Result<Vec<ChargeSession>>;
}

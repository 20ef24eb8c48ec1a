//! Process-wide client.
//!
//! The client, and therefore its series cache, is created on first use and
//! lives until process exit. Use [`BlsClient::clear_cache`] for explicit
//! invalidation.

use std::sync::{Arc, OnceLock};

use econ_bls::BlsClient;
use econ_core::Result;

use crate::service::EconomicDataService;

static CLIENT: OnceLock<Arc<BlsClient>> = OnceLock::new();

/// Returns the process-wide client, creating it from the process environment
/// on first call.
pub fn client() -> Result<Arc<BlsClient>> {
    if let Some(client) = CLIENT.get() {
        return Ok(Arc::clone(client));
    }

    let built = Arc::new(BlsClient::new()?);
    // Another thread may have won the race; either way one client is kept.
    Ok(Arc::clone(CLIENT.get_or_init(|| built)))
}

/// Returns an aggregation service over the process-wide client.
pub fn service() -> Result<EconomicDataService> {
    Ok(EconomicDataService::new(client()?))
}

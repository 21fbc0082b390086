//! Shared hub instances.
//!
//! One adapter per configured hub name for the lifetime of the process,
//! constructed on first access and memoized. This is the explicit stand-in
//! for a DI container's lazy singleton: consumers call [`shared_hub`] and
//! every caller naming the same hub gets the same instance, so at most one
//! connection and one channel proxy exist per hub name.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::error::HubError;
use crate::scheduler::RenderScheduler;
use crate::settings::HubSettings;
use crate::transport::Connector;

use super::Hub;

/// Process-wide map of memoized hubs, keyed by hub name.
static SHARED: LazyLock<Mutex<HashMap<String, Arc<Hub>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Return the shared hub for `settings.hub_name`, constructing it on first
/// access.
///
/// The first caller's configuration wins; later callers naming the same hub
/// get the existing instance and their `connector`/`scheduler` arguments are
/// ignored. Construction failure registers nothing, so a later call may
/// retry.
///
/// # Errors
///
/// Returns [`HubError::MissingHubName`] for an empty hub name, or whatever
/// [`Hub::connect`] raises on first construction.
pub fn shared_hub(
    settings: HubSettings,
    connector: &dyn Connector,
    scheduler: Arc<dyn RenderScheduler>,
) -> Result<Arc<Hub>, HubError> {
    // Validate before touching the map: invalid names never allocate an entry
    settings.validate()?;

    let mut hubs = SHARED.lock().expect("shared hub map mutex poisoned");
    if let Some(hub) = hubs.get(&settings.hub_name) {
        log::debug!("[Hub] reusing shared hub '{}'", settings.hub_name);
        return Ok(Arc::clone(hub));
    }

    let name = settings.hub_name.clone();
    let hub = Arc::new(Hub::connect(settings, connector, scheduler)?);
    hubs.insert(name, Arc::clone(&hub));
    Ok(hub)
}

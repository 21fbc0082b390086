//! The hub connection adapter.
//!
//! Owns one transport connection and one named channel proxy, and exposes
//! the full adapter surface: `start`, fluent `send`/`invoke`/`on`/`off`, the
//! derived [`ConnectionStatus`], and the per-hub [`NotificationBus`].
//!
//! # Architecture
//!
//! ```text
//!   Hub ───────────────────────────────┐
//!    │  start()                        │ lifecycle pump task
//!    │  send()/invoke()  ──► proxy     │   transport events ──► status/bus
//!    │  on()  ──► forwarding task ─────┤
//!    │             scheduler.run_and_flush(handler)
//!    │  off() ──► abort + unsubscribe  │
//!    └── status() / notifications()    │
//! ```
//!
//! One forwarding task runs per `on` registration, reading that
//! subscription's message stream and wrapping every handler invocation in
//! the host's render scheduler. The pump task translates transport
//! lifecycle events into status updates and notifications.
//!
//! Outbound calls issued before the connection is up are captured as
//! pending calls and replayed in order once it is; a call issued while
//! disconnected additionally triggers a single deferred `start`.

// Rust guideline compliant 2026-02

pub(crate) mod lifecycle;
pub(crate) mod pending;
pub mod registry;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::HubError;
use crate::events::{HubNotification, NotificationBus};
use crate::scheduler::RenderScheduler;
use crate::settings::HubSettings;
use crate::status::ConnectionStatus;
use crate::transport::{ChannelProxy, ClientConnection, ConnectionState, Connector};

use pending::{PendingCall, PendingCalls};

/// Connection adapter for one named hub channel.
///
/// Constructed via [`Hub::connect`] (or memoized through
/// [`registry::shared_hub`]). Dropping the hub aborts its background tasks;
/// the transport connection itself lives until the hosting session ends.
pub struct Hub {
    settings: HubSettings,
    connection: Arc<dyn ClientConnection>,
    proxy: Arc<dyn ChannelProxy>,
    status: Arc<ConnectionStatus>,
    bus: Arc<NotificationBus>,
    scheduler: Arc<dyn RenderScheduler>,
    pending: Arc<PendingCalls>,
    /// Guards the deferred-start path so queued sends trigger one start.
    starting: Arc<AtomicBool>,
    /// Forwarding tasks keyed by event name, aborted on `off` and drop.
    subscriptions: Mutex<HashMap<String, Vec<JoinHandle<()>>>>,
    pump: JoinHandle<()>,
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("hub_name", &self.settings.hub_name)
            .field("endpoint", &self.settings.endpoint)
            .finish_non_exhaustive()
    }
}

impl Hub {
    /// Construct the adapter: validate settings, open the connection, bind
    /// the named channel proxy, and spawn the lifecycle pump.
    ///
    /// Must be called from within a Tokio runtime (the pump is spawned
    /// here). No connection attempt is made yet; call [`Hub::start`] or just
    /// [`Hub::send`] and let the adapter start on demand.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::MissingHubName`] when the settings do not name a
    /// hub (nothing is constructed in that case), or [`HubError::Transport`]
    /// when the connector rejects the endpoint.
    pub fn connect(
        settings: HubSettings,
        connector: &dyn Connector,
        scheduler: Arc<dyn RenderScheduler>,
    ) -> Result<Self, HubError> {
        settings.validate()?;

        let connection = connector.open(&settings.endpoint, settings.logging)?;
        let proxy = connection.channel(&settings.hub_name);

        let status = ConnectionStatus::new();
        let bus = Arc::new(NotificationBus::new());
        let pending = Arc::new(PendingCalls::default());

        let pump = tokio::spawn(lifecycle::run(
            lifecycle::LifecyclePump {
                status: Arc::clone(&status),
                bus: Arc::clone(&bus),
                scheduler: Arc::clone(&scheduler),
                proxy: Arc::clone(&proxy),
                pending: Arc::clone(&pending),
            },
            connection.lifecycle(),
        ));

        log::info!(
            "[Hub] bound channel '{}' at '{}'",
            settings.hub_name,
            settings.endpoint
        );

        Ok(Self {
            settings,
            connection,
            proxy,
            status,
            bus,
            scheduler,
            pending,
            starting: Arc::new(AtomicBool::new(false)),
            subscriptions: Mutex::new(HashMap::new()),
            pump,
        })
    }

    /// Name of the bound hub channel.
    #[must_use]
    pub fn hub_name(&self) -> &str {
        &self.settings.hub_name
    }

    /// Start the connection if it is not already connected.
    ///
    /// Resolves once the transport reports connected. Already-connected hubs
    /// resolve immediately; an attempt already in flight is joined rather
    /// than duplicated (see
    /// [`ClientConnection::start`]).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Transport`] when the attempt fails.
    pub async fn start(&self) -> Result<(), HubError> {
        if self.connection.state() == ConnectionState::Connected {
            return Ok(());
        }
        log::debug!("[Hub] starting connection to '{}'", self.settings.endpoint);
        self.connection.start().await.map_err(HubError::from)
    }

    /// Send a named call with positional arguments to the remote channel.
    ///
    /// Never blocks and never errors synchronously:
    ///
    /// - connected: dispatched immediately (fire-and-continue);
    /// - disconnected: captured as a pending call and a single deferred
    ///   [`Hub::start`] is triggered; the queue is replayed on resolution;
    /// - connecting/reconnecting: captured as a pending call, replayed when
    ///   the transport reports connected.
    ///
    /// Dispatch failures surface through the transport's error event, not to
    /// the caller.
    pub fn send(&self, method: &str, args: Vec<serde_json::Value>) -> &Self {
        match self.connection.state() {
            ConnectionState::Connected => {
                let proxy = Arc::clone(&self.proxy);
                let method = method.to_string();
                tokio::spawn(async move {
                    if let Err(err) = proxy.invoke(&method, args).await {
                        log::warn!("[Hub] invoke '{method}' failed: {err}");
                    }
                });
            }
            ConnectionState::Disconnected => {
                self.pending.push(PendingCall {
                    method: method.to_string(),
                    args,
                });
                self.spawn_deferred_start();
            }
            ConnectionState::Connecting | ConnectionState::Reconnecting => {
                log::debug!("[Hub] '{method}' queued until connected");
                self.pending.push(PendingCall {
                    method: method.to_string(),
                    args,
                });
            }
        }
        self
    }

    /// Alias for [`Hub::send`].
    pub fn invoke(&self, method: &str, args: Vec<serde_json::Value>) -> &Self {
        self.send(method, args)
    }

    /// Subscribe `handler` to messages tagged `event` on the channel.
    ///
    /// Every invocation of `handler` runs inside the host's render
    /// scheduler. Handlers for the same event stack; [`Hub::off`] removes
    /// them all.
    pub fn on<F>(&self, event: &str, handler: F) -> &Self
    where
        F: Fn(Vec<serde_json::Value>) + Send + Sync + 'static,
    {
        let mut messages = self.proxy.subscribe(event);
        let scheduler = Arc::clone(&self.scheduler);
        let handler = Arc::new(handler);
        let event_name = event.to_string();

        let task = tokio::spawn(async move {
            while let Some(args) = messages.recv().await {
                let handler = Arc::clone(&handler);
                scheduler.run_and_flush(Box::new(move || handler(args)));
            }
            log::trace!("[Hub] '{event_name}' forwarding task ended");
        });

        self.subscriptions
            .lock()
            .expect("subscription map mutex poisoned")
            .entry(event.to_string())
            .or_default()
            .push(task);
        self
    }

    /// Unsubscribe every handler for `event`.
    ///
    /// No scheduler re-entry happens here; no new events are produced.
    pub fn off(&self, event: &str) -> &Self {
        self.proxy.unsubscribe(event);
        let removed = self
            .subscriptions
            .lock()
            .expect("subscription map mutex poisoned")
            .remove(event);
        if let Some(tasks) = removed {
            for task in tasks {
                task.abort();
            }
        }
        self
    }

    /// Derived connection status predicates.
    #[must_use]
    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    /// Register a subscriber on this hub's notification bus.
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<HubNotification> {
        self.bus.subscribe()
    }

    /// Trigger one deferred start for the pending queue.
    ///
    /// The `starting` flag collapses bursts of sends into a single start;
    /// the flag is released when the attempt resolves either way, so a later
    /// send can retry after a failure.
    fn spawn_deferred_start(&self) {
        if self.starting.swap(true, Ordering::SeqCst) {
            return;
        }

        let connection = Arc::clone(&self.connection);
        let proxy = Arc::clone(&self.proxy);
        let pending = Arc::clone(&self.pending);
        let starting = Arc::clone(&self.starting);

        tokio::spawn(async move {
            let result = connection.start().await;
            starting.store(false, Ordering::SeqCst);
            match result {
                Ok(()) => lifecycle::flush_pending(&proxy, &pending).await,
                Err(err) => {
                    // Calls stay queued for the next successful connect
                    log::warn!(
                        "[Hub] deferred start failed: {err}; {} call(s) remain queued",
                        pending.len()
                    );
                }
            }
        });
    }
}

impl Drop for Hub {
    fn drop(&mut self) {
        self.pump.abort();
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription map mutex poisoned");
        for (_, tasks) in subscriptions.drain() {
            for task in tasks {
                task.abort();
            }
        }
    }
}

//! Hublink - real-time hub connection adapter.
//!
//! This crate bridges a persistent, auto-reconnecting real-time connection
//! (owned by an external transport library) into a host application's shared
//! instances and render scheduling. The adapter binds one named channel per
//! hub, republishes transport lifecycle transitions as application-wide
//! notifications, queues outbound calls until the connection is ready, and
//! re-enters the host UI's update cycle whenever network events arrive.
//!
//! # Architecture
//!
//! - **Hub** - The connection adapter; owns one connection and one named
//!   channel proxy, exposes `start`/`send`/`on`/`off`/`status`
//! - **Transport** - Consumed collaborator traits; the wire protocol,
//!   reconnection policy, and framing all live behind them
//! - **NotificationBus** - Explicit publish/subscribe for connection
//!   lifecycle notifications
//! - **RenderScheduler** - Consumed collaborator; "run this block and flush
//!   pending view updates"
//!
//! # Modules
//!
//! - [`hub`] - Connection adapter, lifecycle pump, shared-instance registry
//! - [`transport`] - Transport collaborator seam
//! - [`events`] - Application-wide connection notifications
//! - [`settings`] - Configuration surface
//! - [`scheduler`] - Host update-cycle seam
//! - [`status`] - Derived connection status predicates

// Library modules
pub mod error;
pub mod events;
pub mod hub;
pub mod scheduler;
pub mod settings;
pub mod status;
pub mod transport;

// Re-export commonly used types
pub use error::HubError;
pub use events::{HubNotification, NotificationBus};
pub use scheduler::{ImmediateScheduler, RenderScheduler};
pub use settings::HubSettings;
pub use status::ConnectionStatus;
pub use transport::{
    ChannelProxy, ClientConnection, ConnectionState, Connector, LifecycleEvent, TransportError,
};

// Re-export Hub and the shared-instance factory
pub use hub::registry::shared_hub;
pub use hub::Hub;

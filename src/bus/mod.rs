//! Publish/Subscribe bus - synchronous in-process event dispatch
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              PublishSubscribeService (per process)           │
//! │  - subscribe(type, handler) / unsubscribe(type, handler)    │
//! │  - publish(event) -> handlers for event.event_type()        │
//! └─────────────────────────────────────────────────────────────┘
//!                            │ handle()
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        BusHandle (weak)  ──  held by each Subscriber         │
//! │  Subscriber::handle(event) may publish derived events       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dispatch is depth-first: a publish made from inside a handler runs to
//! completion before the handler returns. There is no queue.

mod handle;
mod publisher;
mod service;
mod subscriber;

pub use handle::BusHandle;
pub use publisher::{DispatchPolicy, Publisher};
pub use service::PublishSubscribeService;
pub use subscriber::Subscriber;

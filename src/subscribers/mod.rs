//! Subscribers that react to vending events.
//!
//! | Subscriber                   | Tag      | Effect                                         |
//! |------------------------------|----------|------------------------------------------------|
//! | [`SaleSubscriber`]           | `sale`   | stock -= qty, warns on every sale below 3      |
//! | [`RefillSubscriber`]         | `refill` | stock += qty, ok when crossing up to 3         |
//! | [`LowStockWarningSubscriber`]| `sale`   | latched warning, once per downward crossing    |
//! | [`StockLevelOkSubscriber`]   | `refill` | latched ok, once per upward crossing           |
//! | [`EventRecorder`]            | any      | appends to a shared log                        |
//! | [`TraceSubscriber`]          | any      | `tracing::info!` per event                     |

mod latch;
mod recorder;
mod refill;
mod sale;
mod trace;

pub use latch::{LowStockWarningSubscriber, StockLevelOkSubscriber};
pub use recorder::EventRecorder;
pub use refill::RefillSubscriber;
pub use sale::SaleSubscriber;
pub use trace::TraceSubscriber;

//! Service layer: initial loader, live updater, and review submission.

pub mod live;
pub mod loader;
pub mod review;

pub use live::{LiveUpdater, SubscriptionDelta, reconcile_subscriptions};
pub use loader::RoomLoader;
pub use review::ReviewService;

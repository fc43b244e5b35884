//! Domain entities
//!
//! | Entity | Role |
//! |--------|------|
//! | [`ReadinessSignal`] | one-shot publish/subscribe primitive |
//! | [`Provision`] / [`Provisions`] | provider capabilities of a node |
//! | [`DependencySlot`] / [`Dependencies`] | consumer-side bindings |
//! | [`StateMachine`] | validated transition guard |
//! | [`Notifier`] | change-notifying value holder |

pub mod dependencies;
pub mod notifier;
pub mod provision;
pub mod signal;
pub mod state_machine;

pub use dependencies::{Dependencies, DependencySlot, SlotState};
pub use notifier::{ChangeListener, Notifier};
pub use provision::{ErasedProvision, Provision, Provisions};
pub use signal::{ReadinessSignal, ReadyCallback};
pub use state_machine::{StateMachine, Transition};

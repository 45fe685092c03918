//! JSON Lines provider that turns hyperedge records into core [`Hyperedge`]
//! values.
//!
//! Each non-blank line holds one object:
//!
//! ```json
//! {"id": "h1", "participants": ["ada", {"entity": "bob", "role": "approver"}],
//!  "metadata": {"kind": "approval", "rationale": "within policy"}}
//! ```
//!
//! The provider checks shape only. Semantic rules such as the two-entity
//! minimum are enforced by the engine at insertion.
//!
//! [`Hyperedge`]: hyperpath_core::Hyperedge

mod errors;
mod provider;
mod record;

pub use errors::JsonlProviderError;
pub use provider::JsonlHyperedgeProvider;

//! # the-dispatch
//!
//! A small action surface for hosts that expose user-invocable actions
//! (menu entries, palette commands) to plugins.
//!
//! ## Core Concepts
//!
//! - **Actions**: a stable name, a display title, a scope and a handler
//! - **Scopes**: when an action may run (always, or only while an editable
//!   document is active)
//! - **Surface**: anything actions can be registered against
//!   ([`ActionSurface`]); [`ActionRegistry`] is the in-memory implementation
//! - **Results**: handlers report whether they consumed the invocation
//!   ([`DispatchResult`])
//!
//! The surface never owns the host's event loop. It only stores handlers and
//! calls them when the host says the user asked for an action.
//!
//! ## Basic Usage
//!
//! ```rust
//! use the_dispatch::{
//!   Action,
//!   ActionContext,
//!   ActionRegistry,
//!   ActionScope,
//!   ActionSurface,
//!   DispatchResult,
//! };
//!
//! struct Ctx {
//!   editing: bool,
//!   hits:    usize,
//! }
//!
//! impl ActionContext for Ctx {
//!   fn editable_document_active(&self) -> bool {
//!     self.editing
//!   }
//! }
//!
//! let mut registry = ActionRegistry::<Ctx>::new();
//! registry.register(Action::new(
//!   "count",
//!   "Count",
//!   ActionScope::EditableDocument,
//!   |ctx: &mut Ctx| {
//!     ctx.hits += 1;
//!     DispatchResult::Handled
//!   },
//! ));
//!
//! let mut ctx = Ctx {
//!   editing: false,
//!   hits:    0,
//! };
//! assert_eq!(registry.invoke("count", &mut ctx), DispatchResult::Continue);
//!
//! ctx.editing = true;
//! assert_eq!(registry.invoke("count", &mut ctx), DispatchResult::Handled);
//! assert_eq!(ctx.hits, 1);
//! ```

mod action;
mod plugin;
mod registry;

pub use action::{
  Action,
  ActionContext,
  ActionHandler,
  ActionScope,
  ActionSurface,
};
pub use plugin::DispatchResult;
pub use registry::ActionRegistry;

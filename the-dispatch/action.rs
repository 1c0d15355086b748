use std::{
  fmt,
  sync::Arc,
};

use crate::DispatchResult;

pub type ActionHandler<Ctx> = Arc<dyn Fn(&mut Ctx) -> DispatchResult + Send + Sync>;

/// When an action is offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionScope {
  Always,
  /// Only while the host has an editable document focused.
  EditableDocument,
}

/// What the host tells the surface about its current state.
pub trait ActionContext {
  fn editable_document_active(&self) -> bool;
}

impl ActionScope {
  pub fn allows<Ctx: ActionContext + ?Sized>(self, ctx: &Ctx) -> bool {
    match self {
      Self::Always => true,
      Self::EditableDocument => ctx.editable_document_active(),
    }
  }
}

pub struct Action<Ctx> {
  pub name:    &'static str,
  pub title:   &'static str,
  pub scope:   ActionScope,
  pub handler: ActionHandler<Ctx>,
}

impl<Ctx> Action<Ctx> {
  pub fn new<F>(name: &'static str, title: &'static str, scope: ActionScope, handler: F) -> Self
  where
    F: Fn(&mut Ctx) -> DispatchResult + Send + Sync + 'static,
  {
    Self {
      name,
      title,
      scope,
      handler: Arc::new(handler),
    }
  }

  pub fn run(&self, ctx: &mut Ctx) -> DispatchResult {
    (self.handler)(ctx)
  }
}

impl<Ctx> Clone for Action<Ctx> {
  fn clone(&self) -> Self {
    Self {
      name:    self.name,
      title:   self.title,
      scope:   self.scope,
      handler: self.handler.clone(),
    }
  }
}

impl<Ctx> fmt::Debug for Action<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Action")
      .field("name", &self.name)
      .field("title", &self.title)
      .field("scope", &self.scope)
      .finish_non_exhaustive()
  }
}

/// Anything user-invocable actions can be registered against.
///
/// Hosts with their own menu or command system implement this to forward
/// registrations; [`crate::ActionRegistry`] is the in-memory version.
pub trait ActionSurface<Ctx> {
  fn register(&mut self, action: Action<Ctx>);
}

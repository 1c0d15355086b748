use std::collections::HashMap;

use crate::{
  Action,
  ActionContext,
  ActionSurface,
  DispatchResult,
};

pub struct ActionRegistry<Ctx> {
  actions: HashMap<&'static str, Action<Ctx>>,
}

impl<Ctx> Clone for ActionRegistry<Ctx> {
  fn clone(&self) -> Self {
    Self {
      actions: self.actions.clone(),
    }
  }
}

impl<Ctx> Default for ActionRegistry<Ctx> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Ctx> std::fmt::Debug for ActionRegistry<Ctx> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.actions.keys()).finish()
  }
}

impl<Ctx> ActionRegistry<Ctx> {
  pub fn new() -> Self {
    Self {
      actions: HashMap::new(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&Action<Ctx>> {
    self.actions.get(name)
  }

  pub fn remove(&mut self, name: &str) -> Option<Action<Ctx>> {
    self.actions.remove(name)
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }
}

impl<Ctx: ActionContext> ActionRegistry<Ctx> {
  /// Run the named action if it exists and its scope allows it right now.
  pub fn invoke(&self, name: &str, ctx: &mut Ctx) -> DispatchResult {
    let Some(action) = self.actions.get(name) else {
      return DispatchResult::Continue;
    };
    if !action.scope.allows(ctx) {
      return DispatchResult::Continue;
    }
    action.run(ctx)
  }

  /// Actions the host should offer for the current context, sorted by title.
  pub fn available(&self, ctx: &Ctx) -> Vec<&Action<Ctx>> {
    let mut actions: Vec<_> = self
      .actions
      .values()
      .filter(|action| action.scope.allows(ctx))
      .collect();
    actions.sort_by_key(|action| action.title);
    actions
  }
}

impl<Ctx> ActionSurface<Ctx> for ActionRegistry<Ctx> {
  /// Registering a name twice replaces the earlier action.
  fn register(&mut self, action: Action<Ctx>) {
    self.actions.insert(action.name, action);
  }
}

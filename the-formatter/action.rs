//! The "Format Document" action.
//!
//! Registration is the only thing the formatter does with the host's action
//! system. When the user picks the action, the handler reads the host's
//! current state, runs one pass and shows its notice.

use the_dispatch::{
  Action,
  ActionContext,
  ActionScope,
  ActionSurface,
  DispatchResult,
};

use crate::{
  document::{
    DocumentState,
    EditorDocument,
  },
  messages::Notifier,
  orchestrator::FormatOrchestrator,
  settings::ConfigurationModel,
};

pub const FORMAT_DOCUMENT: &str = "format-document";
pub const FORMAT_DOCUMENT_TITLE: &str = "Format Document";

/// Host state the action reads on every invocation.
pub trait FormatContext: ActionContext + Notifier {
  type Document: EditorDocument + ?Sized;

  fn settings(&self) -> &ConfigurationModel;
  fn orchestrator(&self) -> &FormatOrchestrator;
  fn active_document(&mut self) -> Option<&mut Self::Document>;
}

/// Binds [`FORMAT_DOCUMENT`] to the orchestrator. Holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionTrigger;

impl ActionTrigger {
  pub fn register<Ctx, S>(surface: &mut S)
  where
    Ctx: FormatContext + 'static,
    S: ActionSurface<Ctx> + ?Sized,
  {
    surface.register(Action::new(
      FORMAT_DOCUMENT,
      FORMAT_DOCUMENT_TITLE,
      ActionScope::EditableDocument,
      format_active_document::<Ctx>,
    ));
  }
}

/// Handler behind [`FORMAT_DOCUMENT`].
pub fn format_active_document<Ctx: FormatContext>(ctx: &mut Ctx) -> DispatchResult {
  let settings = ctx.settings().snapshot();
  let orchestrator = ctx.orchestrator().clone();
  let Some(doc) = ctx.active_document() else {
    return DispatchResult::Continue;
  };

  let state = DocumentState::capture(&*doc);
  let Some(notification) = orchestrator.format_active_document(doc, state, &settings) else {
    return DispatchResult::Handled;
  };
  ctx.notify(&notification);
  DispatchResult::Handled
}

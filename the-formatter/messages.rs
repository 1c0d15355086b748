use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
  Info,
  Warning,
  Error,
}

/// The single user-facing outcome of a settings edit or a formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
  ValidationWarning(String),
  FormatSuccess(String),
  FormatNoOpSuccess(String),
  FormatFailure(String),
}

impl Notification {
  pub fn message(&self) -> &str {
    match self {
      Self::ValidationWarning(message)
      | Self::FormatSuccess(message)
      | Self::FormatNoOpSuccess(message)
      | Self::FormatFailure(message) => message,
    }
  }

  pub fn level(&self) -> MessageLevel {
    match self {
      Self::ValidationWarning(_) => MessageLevel::Warning,
      Self::FormatSuccess(_) | Self::FormatNoOpSuccess(_) => MessageLevel::Info,
      Self::FormatFailure(_) => MessageLevel::Error,
    }
  }
}

/// Fixed notice texts. Hosts with their own translations swap these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeText {
  pub formatted:         String,
  pub already_formatted: String,
  pub invalid_gap:       String,
}

impl Default for NoticeText {
  fn default() -> Self {
    Self {
      formatted:         "Document Formatted!".into(),
      already_formatted: "Document is already formatted!".into(),
      invalid_gap:       "Please enter a valid number.\nIt should be at least 0.".into(),
    }
  }
}

/// Where notices end up. Fire-and-forget.
pub trait Notifier {
  fn display(&mut self, message: &str);

  /// Hosts that can style by severity override this; the default only
  /// forwards the text.
  fn notify(&mut self, notification: &Notification) {
    self.display(notification.message());
  }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
  fn display(&mut self, message: &str) {
    (**self).display(message);
  }

  fn notify(&mut self, notification: &Notification) {
    (**self).notify(notification);
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
  pub id:    u64,
  pub level: MessageLevel,
  pub text:  String,
}

/// In-memory notifier: the latest message plus a bounded history.
#[derive(Debug, Clone)]
pub struct MessageCenter {
  active:          Option<Message>,
  history:         VecDeque<Message>,
  next_message_id: u64,
  history_limit:   usize,
}

impl Default for MessageCenter {
  fn default() -> Self {
    Self::with_limit(DEFAULT_HISTORY_LIMIT)
  }
}

impl MessageCenter {
  pub fn with_limit(history_limit: usize) -> Self {
    Self {
      active:          None,
      history:         VecDeque::new(),
      next_message_id: 1,
      history_limit:   history_limit.max(1),
    }
  }

  pub fn active(&self) -> Option<&Message> {
    self.active.as_ref()
  }

  pub fn history_len(&self) -> usize {
    self.history.len()
  }

  pub fn history(&self) -> impl Iterator<Item = &Message> {
    self.history.iter()
  }

  pub fn texts(&self) -> Vec<&str> {
    self.history.iter().map(|m| m.text.as_str()).collect()
  }

  pub fn publish(&mut self, level: MessageLevel, text: impl Into<String>) -> Message {
    let message = Message {
      id: self.next_message_id,
      level,
      text: text.into(),
    };
    self.next_message_id = self.next_message_id.saturating_add(1);

    self.active = Some(message.clone());
    self.history.push_back(message.clone());
    while self.history.len() > self.history_limit {
      self.history.pop_front();
    }
    message
  }

  pub fn dismiss_active(&mut self) -> Option<Message> {
    self.active.take()
  }

  pub fn clear(&mut self) {
    self.active = None;
    self.history.clear();
  }
}

impl Notifier for MessageCenter {
  fn display(&mut self, message: &str) {
    self.publish(MessageLevel::Info, message);
  }

  fn notify(&mut self, notification: &Notification) {
    self.publish(notification.level(), notification.message());
  }
}

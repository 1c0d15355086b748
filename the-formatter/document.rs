//! What the formatter needs from the host's editor.
//!
//! The buffer belongs to the host. The formatter reads it once at the start
//! of a pass ([`DocumentState::capture`]) and writes it back at most once,
//! through [`EditorDocument::replace_text`].

use ropey::Rope;

use crate::position::Position;

pub trait EditorDocument {
  fn text(&self) -> String;
  fn replace_text(&mut self, text: &str);
  fn cursor(&self) -> Position;
  fn set_cursor(&mut self, position: Position);
}

/// Buffer contents and cursor captured at the start of a formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
  pub text:   String,
  pub cursor: Position,
}

impl DocumentState {
  pub fn capture<D: EditorDocument + ?Sized>(doc: &D) -> Self {
    Self {
      text:   doc.text(),
      cursor: doc.cursor(),
    }
  }
}

/// Rope-backed document for hosts without a buffer of their own.
///
/// The cursor is stored exactly as given; it is not clamped to the text.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
  text:      Rope,
  cursor:    Position,
  revisions: usize,
}

impl MemoryDocument {
  pub fn new(text: &str) -> Self {
    Self {
      text:      Rope::from_str(text),
      cursor:    Position::zero(),
      revisions: 0,
    }
  }

  pub fn with_cursor(mut self, cursor: Position) -> Self {
    self.cursor = cursor;
    self
  }

  pub fn rope(&self) -> &Rope {
    &self.text
  }

  pub fn len_lines(&self) -> usize {
    self.text.len_lines()
  }

  /// Number of times the buffer has been replaced.
  pub fn revisions(&self) -> usize {
    self.revisions
  }
}

impl EditorDocument for MemoryDocument {
  fn text(&self) -> String {
    self.text.to_string()
  }

  fn replace_text(&mut self, text: &str) {
    self.text = Rope::from_str(text);
    self.revisions += 1;
  }

  fn cursor(&self) -> Position {
    self.cursor
  }

  fn set_cursor(&mut self, position: Position) {
    self.cursor = position;
  }
}

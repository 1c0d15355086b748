/// Result of a dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
  /// The action did not run; the host may try something else.
  Continue,
  /// The action ran.
  Handled,
}

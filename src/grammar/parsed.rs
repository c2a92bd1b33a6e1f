//! Parse-result record for a copyright line.

use crate::grammar::marker::SubTextMarker;

/// The structural fields extracted from one copyright line.
///
/// A record is valid only when the message word, legal tag, year list and
/// owner all matched. When any required field is missing the record is
/// marked invalid and the stored raw text is cleared — but every field
/// that *did* match individually is retained for diagnostics.
///
/// The record is a plain value: each parse produces a fresh one, and the
/// only mutations after a parse are the two owner operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCopyrightLine {
  /// `true` only when every required field matched in order.
  pub(crate) valid: bool,
  /// The raw line text of the last valid parse; empty when invalid.
  pub(crate) text: String,
  /// Decoration preceding the first structural field.
  pub(crate) leading: String,
  /// The matched message word, when present.
  pub(crate) message: Option<String>,
  /// The matched legal tag, when present.
  pub(crate) tag: Option<String>,
  /// The owner string, when present.
  pub(crate) owner: Option<String>,
  /// Trailing decoration with its original column, when present.
  pub(crate) trailing: Option<SubTextMarker>,
  /// Numeric years in the order they appeared.
  pub(crate) years: Vec<i32>,
}

impl ParsedCopyrightLine {
  /// `true` when the last parse found a complete, correctly ordered
  /// copyright line.
  pub const fn is_valid(&self) -> bool {
    self.valid
  }

  /// The raw text of the last valid parse (empty when invalid).
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Decoration preceding the first structural field.
  pub fn leading(&self) -> &str {
    &self.leading
  }

  /// The matched message word, if one matched.
  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  /// The matched legal tag, if one matched.
  pub fn tag(&self) -> Option<&str> {
    self.tag.as_deref()
  }

  /// The owner string, if one matched (or was seeded).
  pub fn owner(&self) -> Option<&str> {
    self.owner.as_deref()
  }

  /// Trailing decoration text, if any.
  pub fn trailing(&self) -> Option<&str> {
    self.trailing.as_ref().map(SubTextMarker::text)
  }

  /// Numeric years in the order they appeared in the line.
  pub fn years(&self) -> &[i32] {
    &self.years
  }

  /// Append another owner to the ownership string as `", <owner>"`.
  ///
  /// # Returns
  ///
  /// `false` (and no mutation) when no valid parse is loaded.
  pub fn add_owner(&mut self, new_owner: &str) -> bool {
    if !self.valid {
      return false;
    }
    let mut owner = self.owner.take().unwrap_or_default();
    owner.push_str(", ");
    owner.push_str(new_owner);
    self.owner = Some(owner);
    true
  }

  /// Replace the ownership string unconditionally.
  ///
  /// This works even without a prior parse; it is the documented way to
  /// seed ownership before composing a brand-new message.
  pub fn replace_owner(&mut self, new_owner: &str) {
    self.owner = Some(new_owner.to_string());
  }
}

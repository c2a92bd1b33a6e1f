//! Year-token extraction from copyright text.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed epoch year substituted when a matched year token carries no
/// 4-digit run (lenient fallback, not an error path).
pub const EPOCH_YEAR: i32 = 1970;

/// Strict 4-digit re-extraction applied to every matched year token.
static FOUR_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4})").expect("year digits regex must compile"));

/// The ordered years found in a piece of copyright text, with the span
/// they occupy.
///
/// Built by matching the grammar's year pattern repeatedly over a
/// substring. The set is invalid until at least one match exists; the span
/// accessors return `None` for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSet {
  /// Numeric years in the order they were matched.
  years: Vec<i32>,
  /// Absolute start offset of the first match and end offset of the last,
  /// within the string the substring was cut from.
  span: Option<(usize, usize)>,
}

impl YearSet {
  /// Match `year_regex` repeatedly over `text` and collect the years.
  ///
  /// # Parameters
  ///
  /// * `text` - The substring to parse years from
  /// * `year_regex` - The grammar's year-token pattern
  /// * `base_offset` - Offset of `text` within the base string, so the
  ///   recorded span is absolute
  pub fn parse(text: &str, year_regex: &Regex, base_offset: usize) -> Self {
    let mut years = Vec::new();
    let mut span: Option<(usize, usize)> = None;

    for year_match in year_regex.find_iter(text) {
      years.push(parse_year_token(year_match.as_str()));

      let match_start = base_offset + year_match.start();
      let match_end = base_offset + year_match.end();
      span = Some(match span {
        None => (match_start, match_end),
        Some((start, end)) => (start, end.max(match_end)),
      });
    }

    Self { years, span }
  }

  /// `true` once at least one year matched.
  pub fn is_valid(&self) -> bool {
    !self.years.is_empty()
  }

  /// The numeric years in match order.
  pub fn years(&self) -> &[i32] {
    &self.years
  }

  /// First matched year, if any.
  pub fn first(&self) -> Option<i32> {
    self.years.first().copied()
  }

  /// Last matched year, if any.
  pub fn last(&self) -> Option<i32> {
    self.years.last().copied()
  }

  /// Absolute start offset of the first year match.
  pub fn start_index(&self) -> Option<usize> {
    self.span.map(|(start, _)| start)
  }

  /// Absolute end offset (exclusive) of the last year match.
  pub fn end_index(&self) -> Option<usize> {
    self.span.map(|(_, end)| end)
  }
}

/// Convert one matched year token to a numeric year.
///
/// Applies the stricter 4-digit re-extraction; a token without a 4-digit
/// run falls back to [`EPOCH_YEAR`].
fn parse_year_token(token: &str) -> i32 {
  FOUR_DIGITS
    .find(token)
    .and_then(|m| m.as_str().parse().ok())
    .unwrap_or(EPOCH_YEAR)
}

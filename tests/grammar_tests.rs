mod common;

use copyscan::grammar::{CopyrightGrammar, FieldOrder, GrammarSpec};

use crate::common::init_tracing;

/// Every arrangement of the four fields for a fixed token set. Only the
/// first is valid for the message-first grammar.
const MESSAGE_FIRST_ARRANGEMENTS: &[(&str, bool)] = &[
  ("Copyright (c) 2022 James Kirk", true),
  // Year before tag
  ("Copyright 2022 (c) James Kirk", false),
  // Tag before message
  ("(c) Copyright 2022 James Kirk", false),
  // Owner leads
  ("James Kirk Copyright (c) 2022", false),
  // Owner between message and tag
  ("Copyright James Kirk (c) 2022", false),
  // Year leads
  ("2022 Copyright (c) James Kirk", false),
];

#[test]
fn test_message_first_order_sensitivity() {
  init_tracing();
  let grammar = CopyrightGrammar::english();

  for (line, expected) in MESSAGE_FIRST_ARRANGEMENTS {
    assert_eq!(
      grammar.is_copyright_line(line),
      *expected,
      "unexpected verdict for {line:?}"
    );
  }
}

#[test]
fn test_owner_first_order_sensitivity() {
  init_tracing();
  let grammar = CopyrightGrammar::new(FieldOrder::OwnerFirst, &GrammarSpec::default()).unwrap();

  assert!(grammar.is_copyright_line("James Kirk Copyright (c) 2022"));
  // The message-first arrangement must be rejected by this variant
  assert!(!grammar.is_copyright_line("Copyright (c) 2022 James Kirk"));
  assert!(!grammar.is_copyright_line("James Kirk Copyright 2022 (c)"));
  assert!(!grammar.is_copyright_line("James Kirk (c) Copyright 2022"));
}

#[test]
fn test_lines_missing_fields_never_match() {
  init_tracing();
  let message_first = CopyrightGrammar::english();
  let owner_first = CopyrightGrammar::new(FieldOrder::OwnerFirst, &GrammarSpec::default()).unwrap();

  // Missing message word and tag
  for grammar in [&message_first, &owner_first] {
    assert!(!grammar.is_copyright_line("Random text 2024 Me"));
    assert!(!grammar.is_copyright_line(""));
    assert!(!grammar.is_copyright_line("   \n"));
  }
}

#[test]
fn test_years_parsed_from_mixed_format_dates() {
  init_tracing();
  // A broader year pattern matching full date tokens; the strict 4-digit
  // re-extraction pulls the year out of each
  let spec = GrammarSpec {
    year_pattern: r"\d{2}-[a-z]{3}-\d{4}".to_string(),
    ..Default::default()
  };
  let grammar = CopyrightGrammar::new(FieldOrder::MessageFirst, &spec).unwrap();

  let parsed = grammar.parse("Copyright (c) 01-jan-2022:31-dec-2023 Scott Summers");
  assert!(parsed.is_valid());
  assert_eq!(parsed.years(), &[2022, 2023]);
  assert_eq!(parsed.owner(), Some("Scott Summers"));
}

#[test]
fn test_decorated_lines_match_and_round_trip() {
  init_tracing();
  let grammar = CopyrightGrammar::english();
  let line = " * Copyright (c) 2022 James Kirk               *";

  assert!(grammar.is_copyright_line(line));

  let parsed = grammar.parse(line);
  let rebuilt = grammar.build_updated_line(&parsed, 2022, None, true).unwrap();
  assert_eq!(rebuilt, line);

  // Updating the year keeps the trailing '*' in its original column
  let updated = grammar.build_updated_line(&parsed, 2024, None, true).unwrap();
  assert_eq!(updated, " * Copyright (c) 2024 James Kirk               *");
}

#[test]
fn test_unicode_mode_extends_owner_matching() {
  init_tracing();
  let ascii_spec = GrammarSpec {
    owner_chars: r"[\w ]".to_string(),
    unicode: false,
    ..Default::default()
  };
  let unicode_spec = GrammarSpec {
    owner_chars: r"[\w ]".to_string(),
    unicode: true,
    ..Default::default()
  };

  let ascii = CopyrightGrammar::new(FieldOrder::MessageFirst, &ascii_spec).unwrap();
  let unicode = CopyrightGrammar::new(FieldOrder::MessageFirst, &unicode_spec).unwrap();

  let line = "Copyright (c) 2024 José García";

  // ASCII matching stops at the first accented character
  assert_eq!(ascii.parse(line).owner(), Some("Jos"));
  assert_eq!(unicode.parse(line).owner(), Some("José García"));
}

#[test]
fn test_partial_parse_keeps_diagnostic_fields() {
  init_tracing();
  let grammar = CopyrightGrammar::english();

  let parsed = grammar.parse("Copyright (c) ACME Corp");
  assert!(!parsed.is_valid());
  assert_eq!(parsed.text(), "");
  assert_eq!(parsed.message(), Some("Copyright"));
  assert_eq!(parsed.tag(), Some("(c)"));
  // No years: the owner candidate region cannot be determined either
  assert!(parsed.years().is_empty());
  assert!(parsed.owner().is_none());
}

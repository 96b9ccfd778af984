use super::*;
use crate::cursor::SourceCursor;

fn scanner_with(levels: &[u16], pending: PendingQueue) -> Scanner {
    let (stack, repaired) = IndentStack::from_levels(levels.iter().copied());
    assert!(!repaired);
    Scanner::from_state(ScannerState { stack, pending })
}

#[test]
fn content_yields_no_token_and_consumes_nothing() {
    let mut scanner = Scanner::new();
    let mut cursor = SourceCursor::new("abc");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), None);
    assert_eq!(cursor.offset(), 0);
    assert_eq!(scanner, Scanner::new());
}

#[test]
fn first_call_of_a_run_reports_its_newline() {
    let mut scanner = Scanner::new();
    let mut cursor = SourceCursor::new("\n  b");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(cursor.offset(), 3);
    assert_eq!(scanner.pending().indent(), Some(2));
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Indent { width: 2 }));
    assert_eq!(scanner.stack().levels(), &[0, 2]);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), None);
}

#[test]
fn rejected_newline_leaves_line_break_unread() {
    let mut scanner = Scanner::new();
    let mut cursor = SourceCursor::new("\r\n  b");
    let valid = TokenSet::all() - TokenSet::NEWLINE;
    assert_eq!(scanner.scan(&mut cursor, valid), None);
    assert_eq!(cursor.lookahead(), Some(b'\n'));
    assert!(scanner.pending().is_empty());
}

#[test]
fn rejected_head_blocks_lower_priority_tokens() {
    let mut pending = PendingQueue::new();
    pending.add_newline();
    pending.add_dedents(1);
    let mut scanner = scanner_with(&[0, 4], pending);
    let before = scanner.clone();
    let mut cursor = SourceCursor::new("x");

    let valid = TokenSet::DEDENT | TokenSet::INDENT;
    assert_eq!(scanner.scan(&mut cursor, valid), None);
    assert_eq!(scanner, before);
    assert_eq!(cursor.offset(), 0);

    assert_eq!(scanner.scan(&mut cursor, TokenSet::NEWLINE), Some(Token::Newline));
    assert_eq!(scanner.scan(&mut cursor, TokenSet::NEWLINE), None);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::DEDENT), Some(Token::Dedent));
    assert_eq!(scanner.stack().levels(), &[0]);
}

#[test]
fn pending_tokens_do_not_consume_input() {
    let mut pending = PendingQueue::new();
    pending.add_newline();
    let mut scanner = scanner_with(&[0], pending);
    let mut cursor = SourceCursor::new("\n\n");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn dedent_pops_when_emitted_not_when_recognized() {
    let mut scanner = scanner_with(&[0, 2, 4], PendingQueue::new());
    let mut cursor = SourceCursor::new("\nx");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(scanner.pending().dedents(), 2);
    assert_eq!(scanner.stack().depth(), 3);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Dedent));
    assert_eq!(scanner.stack().levels(), &[0, 2]);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Dedent));
    assert_eq!(scanner.stack().levels(), &[0]);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), None);
}

#[test]
fn mismatched_dedent_reports_error_then_opens_level() {
    let mut scanner = scanner_with(&[0, 4], PendingQueue::new());
    let mut cursor = SourceCursor::new("\n  x");
    let tokens: Vec<_> = std::iter::from_fn(|| scanner.scan(&mut cursor, TokenSet::all())).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Newline,
            Token::Dedent,
            Token::IndentationError,
            Token::Indent { width: 2 },
        ]
    );
    assert_eq!(scanner.stack().levels(), &[0, 2]);
}

#[test]
fn mismatch_between_inner_levels() {
    let mut scanner = scanner_with(&[0, 2, 8], PendingQueue::new());
    let mut cursor = SourceCursor::new("\n    x");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(scanner.pending().dedents(), 1);
    assert!(scanner.pending().has_error());
    assert_eq!(scanner.pending().indent(), Some(4));
    let rest: Vec<_> = std::iter::from_fn(|| scanner.scan(&mut cursor, TokenSet::all())).collect();
    assert_eq!(rest, vec![Token::Dedent, Token::IndentationError, Token::Indent { width: 4 }]);
    assert_eq!(scanner.stack().levels(), &[0, 2, 4]);
}

#[test]
fn end_of_input_after_line_break_closes_every_level() {
    let mut scanner = scanner_with(&[0, 2, 4], PendingQueue::new());
    let mut cursor = SourceCursor::new("\n\n   ");
    let tokens: Vec<_> = std::iter::from_fn(|| scanner.scan(&mut cursor, TokenSet::all())).collect();
    assert_eq!(
        tokens,
        vec![Token::Newline, Token::Newline, Token::Dedent, Token::Dedent]
    );
    assert_eq!(scanner, Scanner::new());
}

#[test]
fn end_of_input_without_line_break_drains_one_level_per_call() {
    let mut scanner = scanner_with(&[0, 2, 4], PendingQueue::new());
    let mut cursor = SourceCursor::new("");
    assert_eq!(scanner.scan(&mut cursor, TokenSet::NEWLINE), None);
    assert_eq!(scanner.stack().depth(), 3);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::DEDENT), Some(Token::Dedent));
    assert!(scanner.pending().is_empty());
    assert_eq!(scanner.scan(&mut cursor, TokenSet::DEDENT), Some(Token::Dedent));
    assert_eq!(scanner.scan(&mut cursor, TokenSet::DEDENT), None);
}

#[test]
fn saturated_stack_treats_deeper_lines_as_top_level() {
    let levels: Vec<u16> = (0..skroll_common::limits::MAX_INDENT_LEVELS as u16).collect();
    let mut scanner = scanner_with(&levels, PendingQueue::new());
    assert!(scanner.is_saturated());
    let source = format!("\n{}x", " ".repeat(2000));
    let mut cursor = SourceCursor::new(&source);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), None);
    assert_eq!(scanner.stack().depth(), levels.len());
}

#[test]
fn saturated_stack_still_closes_levels() {
    let levels: Vec<u16> = (0..skroll_common::limits::MAX_INDENT_LEVELS as u16).collect();
    let mut scanner = scanner_with(&levels, PendingQueue::new());
    let source = format!("\n{}x", " ".repeat(1021));
    let mut cursor = SourceCursor::new(&source);
    let tokens: Vec<_> = std::iter::from_fn(|| scanner.scan(&mut cursor, TokenSet::all())).collect();
    assert_eq!(tokens, vec![Token::Newline, Token::Dedent, Token::Dedent]);
    assert_eq!(scanner.stack().current(), 1021);
    assert!(!scanner.is_saturated());
}

#[test]
fn reset_returns_to_initial_state() {
    let mut pending = PendingQueue::new();
    pending.add_newline();
    pending.flag_error();
    let mut scanner = scanner_with(&[0, 3, 9], pending);
    scanner.reset();
    assert_eq!(scanner, Scanner::new());
}

#[test]
fn restore_rejects_and_keeps_state() {
    let mut scanner = scanner_with(&[0, 3], PendingQueue::new());
    let before = scanner.clone();
    assert!(scanner.restore(&[1, 0, 9, 0]).is_err());
    assert_eq!(scanner, before);

    let saved = before.to_bytes();
    let mut other = Scanner::new();
    assert_eq!(other.restore(&saved), Ok(()));
    assert_eq!(other, before);
}

#[test]
fn deserialize_empty_buffer_resets() {
    let mut scanner = scanner_with(&[0, 3], PendingQueue::new());
    scanner.deserialize(&[]);
    assert_eq!(scanner, Scanner::new());
}

#[test]
fn full_newline_queue_leaves_next_line_break_unread() {
    let source = format!("{}  x", "\n".repeat(u16::MAX as usize + 2));
    let mut scanner = Scanner::new();
    let mut cursor = SourceCursor::new(&source);
    assert_eq!(scanner.scan(&mut cursor, TokenSet::all()), Some(Token::Newline));
    assert_eq!(cursor.offset(), u16::MAX as usize);
    assert_eq!(cursor.lookahead(), Some(b'\n'));
    assert_eq!(scanner.pending().newlines(), u16::MAX - 1);
    assert_eq!(scanner.pending().indent(), None);

    let rest: Vec<_> = std::iter::from_fn(|| scanner.scan(&mut cursor, TokenSet::all())).collect();
    let newlines = rest.iter().filter(|t| **t == Token::Newline).count();
    assert_eq!(newlines, u16::MAX as usize + 1);
    assert_eq!(rest.last(), Some(&Token::Indent { width: 2 }));
    assert_eq!(scanner.stack().levels(), &[0, 2]);
}

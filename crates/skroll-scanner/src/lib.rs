//! Indentation scanner for the Skroll grammar.
//!
//! This crate turns leading whitespace and line breaks into the structural
//! tokens an indentation-sensitive grammar consumes:
//! - `Token` / `TokenKind` - INDENT, DEDENT, NEWLINE and INDENTATION-ERROR
//! - `TokenSet` - the grammar's acceptance mask for one scan call
//! - `Cursor` / `SourceCursor` - forward-only byte input
//! - `Scanner` - the per-call state machine (one token per call)
//! - `ScannerState` - serializable state for incremental re-lexing
//! - `Tokenizer` - whole-document driver with checkpoint/resume
//!
//! Everything that is not indentation or a line break is left unread for the
//! caller's other lexical rules.

pub mod column;
pub mod cursor;
pub mod indent_stack;
pub mod pending;
pub mod scanner;
pub mod state;
pub mod token;
pub mod tokenizer;

pub use cursor::{Cursor, SourceCursor};
pub use indent_stack::IndentStack;
pub use pending::{Owed, PendingQueue};
pub use scanner::Scanner;
pub use state::{DecodeError, ScannerState};
pub use token::{Token, TokenKind, TokenSet};
pub use tokenizer::{Checkpoint, ScannedToken, Tokenizer, tokenize};

//! Texas Hold'em starting hands and the range language used to
//! describe sets of them.

/// Two ranks and a shape; the 169 starting hands.
mod hand;
/// Export `Hand`, `Shape` and `Suitedness`
pub use self::hand::{Hand, Shape, Suitedness};

/// Two specific cards.
mod combo;
/// Export `Combo`
pub use self::combo::Combo;

/// Module with all the range tokenizing code.
mod lexer;
/// Export the lexer and its tokens.
pub use self::lexer::{Lexer, Token, TokenKind, parse_token, tokenize};

/// Canonical string output for ranges.
mod render;

/// Module for `Range`, the expanded set of hands and combos.
mod range;
/// Export `Range` and `Member`
pub use self::range::{Member, Range};

//! `poker_range` is a library for the static side of Texas Hold'em:
//! ranks, suits, cards, starting hands, specific combos, and the
//! compact range notation players use to write down sets of hands.
//!
//! ```
//! use poker_range::holdem::Range;
//!
//! let range: Range = "TT-55, A5s-ATs; KQ+".parse().unwrap();
//! assert_eq!(6 * 6 + 6 * 4 + 16, range.size());
//! assert_eq!("TT-55, ATs-A5s, KQs, KQo", range.to_string());
//! ```

/// Allow all the core card functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;

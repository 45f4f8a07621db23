use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, Split};

use crate::core::{PokerError, Rank, Suit};

use super::{Combo, Suitedness};

/// The name of the production a range token matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `XX`
    All,
    /// `77`
    Pair,
    /// `TT+`
    PairPlus,
    /// `55-`
    PairMinus,
    /// `55-TT`
    PairDash,
    /// `AK`
    Both,
    /// `KJ+`
    BothPlus,
    /// `KJ-`
    BothMinus,
    /// `A5-AT`
    BothDash,
    /// `AKs`
    Suited,
    /// `KJs+`
    SuitedPlus,
    /// `KJs-`
    SuitedMinus,
    /// `A5s-ATs`
    SuitedDash,
    /// `AKo`
    Offsuit,
    /// `KJo+`
    OffsuitPlus,
    /// `KJo-`
    OffsuitMinus,
    /// `A5o-ATo`
    OffsuitDash,
    /// `KX`
    XBoth,
    /// `KXs`
    XSuited,
    /// `KXo`
    XOffsuit,
    /// `KX+`
    XPlus,
    /// `KXs+`
    XSuitedPlus,
    /// `KXo+`
    XOffsuitPlus,
    /// `KX-`
    XMinus,
    /// `KXs-`
    XSuitedMinus,
    /// `KXo-`
    XOffsuitMinus,
    /// `AsKh`
    Combo,
}

/// One parsed token of the range language.
///
/// Ranks are already normalized: `high` is always the fixed top rank of
/// a non-pair token and dashed endpoints are stored lowest first, no
/// matter which order they were written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Every hand.
    All,
    Pair(Rank),
    /// This pair and every higher pair.
    PairPlus(Rank),
    /// This pair and every lower pair.
    PairMinus(Rank),
    /// Every pair from `low` to `high` inclusive.
    PairDash { low: Rank, high: Rank },
    NonPair {
        high: Rank,
        kicker: Rank,
        suitedness: Suitedness,
    },
    /// Kicker walks up to one below `high`.
    NonPairPlus {
        high: Rank,
        kicker: Rank,
        suitedness: Suitedness,
    },
    /// Kicker walks down to a two.
    NonPairMinus {
        high: Rank,
        kicker: Rank,
        suitedness: Suitedness,
    },
    /// Kicker sweeps `low..=top`.
    NonPairDash {
        high: Rank,
        low: Rank,
        top: Rank,
        suitedness: Suitedness,
    },
    /// Hands with the same rank gap whose top rank runs `low..=high`,
    /// e.g. `76s-54s`.
    GapDash {
        low: Rank,
        high: Rank,
        gap: u8,
        suitedness: Suitedness,
    },
    /// `high` with any lower kicker.
    AnyKicker { high: Rank, suitedness: Suitedness },
    /// Any kicker, for every high rank at or above `high`.
    AnyKickerPlus { high: Rank, suitedness: Suitedness },
    /// Any kicker, for every high rank at or below `high`.
    AnyKickerMinus { high: Rank, suitedness: Suitedness },
    Combo(Combo),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        use Suitedness::*;
        match *self {
            Token::All => TokenKind::All,
            Token::Pair(_) => TokenKind::Pair,
            Token::PairPlus(_) => TokenKind::PairPlus,
            Token::PairMinus(_) => TokenKind::PairMinus,
            Token::PairDash { .. } => TokenKind::PairDash,
            Token::NonPair { suitedness, .. } => match suitedness {
                Any => TokenKind::Both,
                Suited => TokenKind::Suited,
                OffSuit => TokenKind::Offsuit,
            },
            Token::NonPairPlus { suitedness, .. } => match suitedness {
                Any => TokenKind::BothPlus,
                Suited => TokenKind::SuitedPlus,
                OffSuit => TokenKind::OffsuitPlus,
            },
            Token::NonPairMinus { suitedness, .. } => match suitedness {
                Any => TokenKind::BothMinus,
                Suited => TokenKind::SuitedMinus,
                OffSuit => TokenKind::OffsuitMinus,
            },
            Token::NonPairDash { suitedness, .. } | Token::GapDash { suitedness, .. } => {
                match suitedness {
                    Any => TokenKind::BothDash,
                    Suited => TokenKind::SuitedDash,
                    OffSuit => TokenKind::OffsuitDash,
                }
            }
            Token::AnyKicker { suitedness, .. } => match suitedness {
                Any => TokenKind::XBoth,
                Suited => TokenKind::XSuited,
                OffSuit => TokenKind::XOffsuit,
            },
            Token::AnyKickerPlus { suitedness, .. } => match suitedness {
                Any => TokenKind::XPlus,
                Suited => TokenKind::XSuitedPlus,
                OffSuit => TokenKind::XOffsuitPlus,
            },
            Token::AnyKickerMinus { suitedness, .. } => match suitedness {
                Any => TokenKind::XMinus,
                Suited => TokenKind::XSuitedMinus,
                OffSuit => TokenKind::XOffsuitMinus,
            },
            Token::Combo(_) => TokenKind::Combo,
        }
    }
}

fn marker(suitedness: Suitedness) -> &'static str {
    match suitedness {
        Suitedness::Suited => "s",
        Suitedness::OffSuit => "o",
        Suitedness::Any => "",
    }
}

impl fmt::Display for Token {
    /// Writes the token back in normalized notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::All => write!(f, "XX"),
            Token::Pair(r) => write!(f, "{r}{r}"),
            Token::PairPlus(r) => write!(f, "{r}{r}+"),
            Token::PairMinus(r) => write!(f, "{r}{r}-"),
            Token::PairDash { low, high } => write!(f, "{high}{high}-{low}{low}"),
            Token::NonPair {
                high,
                kicker,
                suitedness,
            } => write!(f, "{high}{kicker}{}", marker(suitedness)),
            Token::NonPairPlus {
                high,
                kicker,
                suitedness,
            } => write!(f, "{high}{kicker}{}+", marker(suitedness)),
            Token::NonPairMinus {
                high,
                kicker,
                suitedness,
            } => write!(f, "{high}{kicker}{}-", marker(suitedness)),
            Token::NonPairDash {
                high,
                low,
                top,
                suitedness,
            } => {
                let m = marker(suitedness);
                write!(f, "{high}{top}{m}-{high}{low}{m}")
            }
            Token::GapDash {
                low,
                high,
                gap,
                suitedness,
            } => {
                let m = marker(suitedness);
                let below = |r: Rank| {
                    u8::from(r)
                        .checked_sub(gap)
                        .and_then(Rank::from_u8)
                        .unwrap_or(Rank::Two)
                };
                write!(f, "{high}{}{m}-{low}{}{m}", below(high), below(low))
            }
            Token::AnyKicker { high, suitedness } => write!(f, "{high}X{}", marker(suitedness)),
            Token::AnyKickerPlus { high, suitedness } => {
                write!(f, "{high}X{}+", marker(suitedness))
            }
            Token::AnyKickerMinus { high, suitedness } => {
                write!(f, "{high}X{}-", marker(suitedness))
            }
            Token::Combo(c) => write!(f, "{c}"),
        }
    }
}

/// Characters that split a range string into tokens.
fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

fn is_x(c: char) -> bool {
    c == 'X' || c == 'x'
}

/// Splits a range string on commas, semicolons and whitespace and
/// parses every non-empty piece into a `Token`.
///
/// ```
/// use poker_range::holdem::{Lexer, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("22+, AJs+; KQo")
///     .map(|t| t.unwrap().kind())
///     .collect();
/// assert_eq!(
///     vec![TokenKind::PairPlus, TokenKind::SuitedPlus, TokenKind::Offsuit],
///     kinds
/// );
/// ```
pub struct Lexer<'a> {
    parts: Split<'a, fn(char) -> bool>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            parts: input.split(is_separator as fn(char) -> bool),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, PokerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.parts.find(|p| !p.is_empty())?;
        Some(parse_token(raw))
    }
}

/// Parse the whole string, stopping at the first bad token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, PokerError> {
    Lexer::new(input).collect()
}

/// Parse a single token with no separators in it.
pub fn parse_token(raw: &str) -> Result<Token, PokerError> {
    let chars: Vec<char> = raw.chars().collect();
    match chars.as_slice() {
        [a, b] if is_x(*a) && is_x(*b) => return Ok(Token::All),
        // Nothing but a combo has a suit in the second position.
        [_, s1, _, s2] if Suit::from_char(*s1).is_some() && Suit::from_char(*s2).is_some() => {
            return raw.parse().map(Token::Combo);
        }
        _ => {}
    }
    TokenParser::new(raw).parse()
}

/// The two ranks (and optional shape marker) of one side of a token.
#[derive(Debug)]
struct Part {
    one: Rank,
    two: Rank,
    suitedness: Option<Suitedness>,
}

#[derive(Debug)]
enum Modifier {
    Plus,
    Minus,
    Dash(Part),
}

struct TokenParser<'a> {
    raw: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> TokenParser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            chars: raw.chars().peekable(),
        }
    }

    fn invalid(&self) -> PokerError {
        PokerError::InvalidToken(self.raw.to_string())
    }

    fn parse(mut self) -> Result<Token, PokerError> {
        let first = self.chars.next().ok_or_else(|| self.invalid())?;
        if is_x(first) {
            let high = self.rank()?;
            return self.any_kicker(high);
        }
        let one = Rank::from_char(first).ok_or_else(|| self.invalid())?;
        if self.chars.next_if(|c| is_x(*c)).is_some() {
            return self.any_kicker(one);
        }
        let two = self.rank()?;
        let suitedness = self.suitedness();
        let part = Part {
            one,
            two,
            suitedness,
        };

        let modifier = match self.chars.next() {
            None => None,
            Some('+') => Some(Modifier::Plus),
            Some('-') if self.chars.peek().is_none() => Some(Modifier::Minus),
            Some('-') => {
                let one = self.rank()?;
                let two = self.rank()?;
                let suitedness = self.suitedness();
                Some(Modifier::Dash(Part {
                    one,
                    two,
                    suitedness,
                }))
            }
            Some(_) => return Err(self.invalid()),
        };
        self.finish()?;

        if part.one == part.two {
            self.pair(part, modifier)
        } else {
            self.non_pair(part, modifier)
        }
    }

    fn rank(&mut self) -> Result<Rank, PokerError> {
        self.chars
            .next()
            .and_then(Rank::from_char)
            .ok_or_else(|| self.invalid())
    }

    fn suitedness(&mut self) -> Option<Suitedness> {
        let s = self.chars.peek().copied().and_then(Suitedness::from_char);
        if s.is_some() {
            self.chars.next();
        }
        s
    }

    /// Every character must have been consumed.
    fn finish(&mut self) -> Result<(), PokerError> {
        match self.chars.next() {
            None => Ok(()),
            Some(_) => Err(self.invalid()),
        }
    }

    fn any_kicker(mut self, high: Rank) -> Result<Token, PokerError> {
        let suitedness = self.suitedness().unwrap_or(Suitedness::Any);
        let modifier = match self.chars.next() {
            None => None,
            Some('+') => Some(Modifier::Plus),
            Some('-') => Some(Modifier::Minus),
            Some(_) => return Err(self.invalid()),
        };
        self.finish()?;

        match modifier {
            Some(Modifier::Plus) => Ok(Token::AnyKickerPlus { high, suitedness }),
            // A two has no lower kicker so these would always be empty.
            _ if high == Rank::Two => Err(self.invalid()),
            Some(Modifier::Minus) => Ok(Token::AnyKickerMinus { high, suitedness }),
            _ => Ok(Token::AnyKicker { high, suitedness }),
        }
    }

    fn pair(&self, part: Part, modifier: Option<Modifier>) -> Result<Token, PokerError> {
        if part.suitedness.is_some() {
            return Err(self.invalid());
        }
        let rank = part.one;
        match modifier {
            None => Ok(Token::Pair(rank)),
            Some(Modifier::Plus) => Ok(Token::PairPlus(rank)),
            Some(Modifier::Minus) => Ok(Token::PairMinus(rank)),
            Some(Modifier::Dash(other)) => {
                if other.one != other.two || other.suitedness.is_some() {
                    return Err(self.invalid());
                }
                Ok(Token::PairDash {
                    low: rank.min(other.one),
                    high: rank.max(other.one),
                })
            }
        }
    }

    fn non_pair(&self, part: Part, modifier: Option<Modifier>) -> Result<Token, PokerError> {
        let high = part.one.max(part.two);
        let kicker = part.one.min(part.two);
        let suitedness = part.suitedness.unwrap_or(Suitedness::Any);
        match modifier {
            None => Ok(Token::NonPair {
                high,
                kicker,
                suitedness,
            }),
            Some(Modifier::Plus) => Ok(Token::NonPairPlus {
                high,
                kicker,
                suitedness,
            }),
            Some(Modifier::Minus) => Ok(Token::NonPairMinus {
                high,
                kicker,
                suitedness,
            }),
            Some(Modifier::Dash(other)) => {
                let other_high = other.one.max(other.two);
                let other_kicker = other.one.min(other.two);
                if other.one == other.two || other.suitedness != part.suitedness {
                    return Err(self.invalid());
                }
                if other_high != high {
                    // Different top ranks only make sense as a run of
                    // hands that all share one gap.
                    let gap = Rank::difference(high, kicker);
                    if Rank::difference(other_high, other_kicker) != gap {
                        return Err(self.invalid());
                    }
                    return Ok(Token::GapDash {
                        low: high.min(other_high),
                        high: high.max(other_high),
                        gap,
                        suitedness,
                    });
                }
                Ok(Token::NonPairDash {
                    high,
                    low: kicker.min(other_kicker),
                    top: kicker.max(other_kicker),
                    suitedness,
                })
            }
        }
    }
}

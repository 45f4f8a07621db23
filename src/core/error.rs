use thiserror::Error;

/// This is the core error type for the library. It uses `thiserror` to
/// provide readable error messages. Every value type is validated when
/// it's constructed, so these are only ever returned from parsers and
/// constructors.
#[derive(Error, Debug)]
pub enum PokerError {
    #[error("Unable to parse rank or suit from '{0}'")]
    InvalidSymbol(char),
    #[error("Invalid card '{0}'")]
    InvalidCard(String),
    #[error("Invalid hand '{0}'")]
    InvalidHand(String),
    #[error("Invalid combo '{0}'")]
    InvalidCombo(String),
    #[error("Invalid range token '{0}'")]
    InvalidToken(String),
    #[error("Can't check membership of '{0}', expected a hand or a combo")]
    InvalidMember(String),
    #[error("Unable to read range file")]
    Io(#[from] std::io::Error),
}

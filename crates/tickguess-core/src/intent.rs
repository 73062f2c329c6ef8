use std::str::FromStr;

use thiserror::Error;

use crate::Direction;

/// A discrete player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Raw ticker text as typed; validated by the controller.
    Start(String),
    Predict(Direction),
    End,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
}

impl FromStr for Intent {
    type Err = IntentParseError;

    /// Accepts `start <TICKER>`, `up`/`u`, `down`/`d` and `end`/`e`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(IntentParseError::Empty);
        };

        match command.to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Self::Start(words.collect::<Vec<_>>().join(" "))),
            "up" | "u" => Ok(Self::Predict(Direction::Up)),
            "down" | "d" => Ok(Self::Predict(Direction::Down)),
            "end" | "e" => Ok(Self::End),
            other => Err(IntentParseError::Unknown(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_intent() {
        assert_eq!("start aapl".parse(), Ok(Intent::Start(String::from("aapl"))));
        assert_eq!("UP".parse(), Ok(Intent::Predict(Direction::Up)));
        assert_eq!("d".parse(), Ok(Intent::Predict(Direction::Down)));
        assert_eq!(" end ".parse(), Ok(Intent::End));
    }

    #[test]
    fn start_without_ticker_keeps_empty_text() {
        assert_eq!("start".parse(), Ok(Intent::Start(String::new())));
    }

    #[test]
    fn rejects_blank_and_unknown_lines() {
        assert_eq!("   ".parse::<Intent>(), Err(IntentParseError::Empty));
        assert_eq!(
            "sell".parse::<Intent>(),
            Err(IntentParseError::Unknown(String::from("sell")))
        );
    }
}

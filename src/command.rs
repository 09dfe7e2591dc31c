use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Entries of the interactive menu, in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Deposit,
    Withdraw,
    ShowDetails,
    Save,
    Exit,
    ListAccounts,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::CreateAccount,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::ShowDetails,
        MenuChoice::Save,
        MenuChoice::Exit,
        MenuChoice::ListAccounts,
    ];

    pub fn number(self) -> u8 {
        match self {
            MenuChoice::CreateAccount => 1,
            MenuChoice::Deposit => 2,
            MenuChoice::Withdraw => 3,
            MenuChoice::ShowDetails => 4,
            MenuChoice::Save => 5,
            MenuChoice::Exit => 6,
            MenuChoice::ListAccounts => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::CreateAccount => "Create Account",
            MenuChoice::Deposit => "Deposit",
            MenuChoice::Withdraw => "Withdraw",
            MenuChoice::ShowDetails => "View Balance & History",
            MenuChoice::Save => "Save Data",
            MenuChoice::Exit => "Exit",
            MenuChoice::ListAccounts => "List Accounts",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid option `{0}`. Try again.")]
    InvalidOption(String),
    #[error("`{input}` is not a valid amount")]
    InvalidAmount { input: String },
    #[error("Input is not valid UTF-8")]
    InvalidUtf8,
}

impl FromStr for MenuChoice {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MenuChoice::ALL
            .into_iter()
            .find(|choice| s.parse::<u8>().is_ok_and(|n| n == choice.number()))
            .ok_or_else(|| CommandError::InvalidOption(s.to_owned()))
    }
}

/// Turns one raw input line into text, without its line terminator.
pub fn decode_line(mut bytes: Vec<u8>) -> Result<String, CommandError> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    String::from_utf8(bytes).map_err(|_| CommandError::InvalidUtf8)
}

/// Parses a user supplied amount. Sign is kept, range checks belong to the account.
pub fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let input = input.trim();
    Decimal::from_str(input).map_err(|_| CommandError::InvalidAmount {
        input: input.to_owned(),
    })
}

/// Like [`parse_amount`], but an empty line means zero.
pub fn parse_initial_balance(input: &str) -> Result<Decimal, CommandError> {
    if input.trim().is_empty() {
        Ok(Decimal::ZERO)
    } else {
        parse_amount(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_menu_choices() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::CreateAccount));
        assert_eq!(" 6 \n".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("7".parse::<MenuChoice>(), Ok(MenuChoice::ListAccounts));
        for choice in MenuChoice::ALL {
            assert_eq!(choice.number().to_string().parse::<MenuChoice>(), Ok(choice));
        }

        let err = "9".parse::<MenuChoice>().unwrap_err();
        assert_eq!(err, CommandError::InvalidOption("9".to_owned()));
        assert_eq!(err.to_string(), "Invalid option `9`. Try again.");
        assert!("deposit".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn parse_amounts() {
        assert_eq!(parse_amount("50"), Ok(Decimal::from(50)));
        assert_eq!(parse_amount(" 12.50 "), Ok(Decimal::new(1250, 2)));
        // negative values parse, the account rejects them
        assert_eq!(parse_amount("-3"), Ok(Decimal::from(-3)));
        assert_eq!(
            parse_amount("ten"),
            Err(CommandError::InvalidAmount {
                input: "ten".to_owned()
            })
        );
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn decode_lines() {
        assert_eq!(decode_line(b"Asha\n".to_vec()), Ok("Asha".to_owned()));
        assert_eq!(decode_line(b"Asha\r\n".to_vec()), Ok("Asha".to_owned()));
        assert_eq!(decode_line(b"last".to_vec()), Ok("last".to_owned()));
        assert_eq!(decode_line("₹50\n".as_bytes().to_vec()), Ok("₹50".to_owned()));
        assert_eq!(
            decode_line(b"\xff\xfe\n".to_vec()),
            Err(CommandError::InvalidUtf8)
        );
    }

    #[test]
    fn empty_initial_balance_is_zero() {
        assert_eq!(parse_initial_balance(""), Ok(Decimal::ZERO));
        assert_eq!(parse_initial_balance("100"), Ok(Decimal::from(100)));
        assert!(parse_initial_balance("x").is_err());
    }
}

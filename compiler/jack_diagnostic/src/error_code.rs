//! Error codes for all compiler diagnostics.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexical classification
/// - E1xxx: Structural division
/// - E2xxx: Symbol resolution
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Token text matches no token category
    E0001,
    /// Integer constant exceeds 32767
    E0002,
    /// Expected delimiter or token not found
    E1001,
    /// Name not found in class or subroutine scope
    E2001,
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E9001,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description printed after a run's diagnostics.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid token",
            ErrorCode::E0002 => "integer constant out of range",
            ErrorCode::E1001 => "malformed structure",
            ErrorCode::E2001 => "unresolved symbol",
            ErrorCode::E9001 => "internal compiler error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_text() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert_eq!("e2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
        assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
    }

    #[test]
    fn every_code_is_described() {
        for code in ErrorCode::ALL {
            assert!(!code.description().is_empty());
        }
        assert_eq!(ErrorCode::E2001.description(), "unresolved symbol");
    }
}

//! Charging network codes.

use std::fmt;

use serde::Serialize;

/// A charging network code as it appears in station data.
///
/// Station records carry network codes in upper case (`ELECTRIFY_AMERICA`,
/// `TESLA_SUPERCHARGER`). Codes arriving from URLs are normalized to upper
/// case on construction, so comparing a `NetworkCode` against a record's
/// network is case-insensitive on the input side only.
///
/// # Examples
///
/// ```
/// use ev_map_server::domain::NetworkCode;
///
/// let evgo = NetworkCode::normalized("evgo");
/// assert_eq!(evgo.as_str(), "EVGO");
/// assert!(evgo.matches("EVGO"));
///
/// // The record side is compared as stored
/// assert!(!evgo.matches("evgo"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NetworkCode(String);

impl NetworkCode {
    /// Build a network code from user input, converting it to upper case.
    pub fn normalized(s: &str) -> Self {
        NetworkCode(s.to_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a record's stored network equals this code.
    pub fn matches(&self, network: &str) -> bool {
        self.0 == network
    }
}

impl fmt::Debug for NetworkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkCode({})", self.0)
    }
}

impl fmt::Display for NetworkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_uppercase() {
        assert_eq!(NetworkCode::normalized("nyc").as_str(), "NYC");
        assert_eq!(NetworkCode::normalized("Shell_Recharge").as_str(), "SHELL_RECHARGE");
        assert_eq!(NetworkCode::normalized("FLO").as_str(), "FLO");
    }

    #[test]
    fn empty_code_is_allowed() {
        let code = NetworkCode::normalized("");
        assert_eq!(code.as_str(), "");
        assert!(!code.matches("EVGO"));
    }

    #[test]
    fn matches_is_exact_on_record_side() {
        let code = NetworkCode::normalized("blink");
        assert!(code.matches("BLINK"));
        assert!(!code.matches("Blink"));
        assert!(!code.matches("BLINK "));
    }

    #[test]
    fn display_and_debug() {
        let code = NetworkCode::normalized("evgo");
        assert_eq!(format!("{}", code), "EVGO");
        assert_eq!(format!("{:?}", code), "NetworkCode(EVGO)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = NetworkCode::normalized("flo");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"FLO\"");
    }
}

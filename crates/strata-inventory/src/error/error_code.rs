//! Error codes for the inventory diagnostic system.
//!
//! Error codes are organized by input:
//! - `E0xx` - Inventory sheet structure
//! - `E1xx` - Inventory row data
//! - `E2xx` - Cross reference and relationship sheets

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Sheet Structure Errors (E0xx)
    // =========================================================================
    /// Missing required column.
    ///
    /// The header row lacks one of `AppName`, `type`, `name`, `Environment`,
    /// `ResourceCategory` or `ResourceType`.
    E001,

    /// Unreadable header row.
    ///
    /// The first line could not be read as a CSV header.
    E002,

    /// Empty input.
    ///
    /// The sheet contains no header row at all.
    E003,

    // =========================================================================
    // Row Errors (E1xx)
    // =========================================================================
    /// Invalid row.
    ///
    /// A row could not be read into a record, e.g. a field is not valid text.
    E100,

    /// Row length mismatch.
    ///
    /// A row has a different number of fields than the header.
    E101,

    // =========================================================================
    // Cross Reference and Relationship Errors (E2xx)
    // =========================================================================
    /// Cross reference missing column.
    ///
    /// The shared application cross reference lacks `PrimaryAppName` or
    /// `SharedAppName`.
    E200,

    /// Conflicting cross reference.
    ///
    /// A primary application is declared more than once with different
    /// shared applications. The first declaration is used.
    E201,

    /// Relationship sheet missing column.
    ///
    /// The relationship sheet lacks `App-1` or `App-2`.
    E202,

    /// Incomplete relationship.
    ///
    /// A relationship row names only one application and is skipped.
    E203,
}

impl ErrorCode {
    /// Returns the string representation of the error code (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "missing required column",
            ErrorCode::E002 => "unreadable header row",
            ErrorCode::E003 => "empty input",
            ErrorCode::E100 => "invalid row",
            ErrorCode::E101 => "row length mismatch",
            ErrorCode::E200 => "cross reference missing column",
            ErrorCode::E201 => "conflicting cross reference",
            ErrorCode::E202 => "relationship sheet missing column",
            ErrorCode::E203 => "incomplete relationship",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "missing required column");
        assert_eq!(ErrorCode::E201.description(), "conflicting cross reference");
    }
}

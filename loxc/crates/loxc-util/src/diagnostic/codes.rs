//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! # Examples
//!
//! ```
//! use loxc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEX_ILLEGAL_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 1001);
//! assert_eq!(code.as_str(), "E1001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is typically "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// This allows users to reference specific diagnostics in documentation
/// and suppression attributes.
///
/// # Examples
///
/// ```
/// use loxc_util::diagnostic::DiagnosticCode;
///
/// let code = DiagnosticCode::new("E", 1);
/// assert_eq!(code.as_str(), "E0001");
///
/// let warning = DiagnosticCode::W0001;
/// assert_eq!(warning.prefix(), "W");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Arguments
    ///
    /// * `prefix` - The code prefix (typically "E" or "W")
    /// * `number` - The numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use loxc_util::diagnostic::DiagnosticCode;
    ///
    /// let code = DiagnosticCode::new("E", 1001);
    /// assert_eq!(code.prefix(), "E");
    /// assert_eq!(code.number(), 1001);
    /// ```
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix (e.g., "E" for error, "W" for warning)
    ///
    /// # Examples
    ///
    /// ```
    /// use loxc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.prefix(), "E");
    /// assert_eq!(DiagnosticCode::W0001.prefix(), "W");
    /// ```
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use loxc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.number(), 1);
    /// assert_eq!(DiagnosticCode::W0001.number(), 1);
    /// ```
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E0001", "W0001")
    ///
    /// # Examples
    ///
    /// ```
    /// use loxc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::E0001.as_str(), "E0001");
    /// assert_eq!(DiagnosticCode::W0001.as_str(), "W0001");
    /// ```
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEX ERRORS (E1000-E1999)
    // =========================================================================

    /// E1001: Lexer - illegal character
    pub const E_LEX_ILLEGAL_CHAR: Self = Self::new("E", 1001);
    /// E1002: Lexer - invalid UTF-8 byte sequence
    pub const E_LEX_BAD_UTF8: Self = Self::new("E", 1002);
    /// E1003: Lexer - unterminated string literal
    pub const E_LEX_UNTERMINATED_STRING: Self = Self::new("E", 1003);
    /// E1004: Lexer - bad escape sequence
    pub const E_LEX_BAD_ESCAPE: Self = Self::new("E", 1004);

    // =========================================================================
    // PARSE ERRORS (E2000-E2999)
    // =========================================================================

    /// E2001: Parser - unexpected token
    pub const E_PARSE_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: Parser - missing expected token (e.g. `;`)
    pub const E_PARSE_MISSING_TOKEN: Self = Self::new("E", 2002);
    /// E2003: Parser - invalid assignment target
    pub const E_PARSE_BAD_ASSIGN_TARGET: Self = Self::new("E", 2003);
    /// E2004: Parser - call/parameter arity limit exceeded
    pub const E_PARSE_ARITY_LIMIT: Self = Self::new("E", 2004);

    // =========================================================================
    // RESOLVE ERRORS (E3000-E3999) AND HINTS (W3000-W3999)
    // =========================================================================

    /// E3001: Resolver - variable already declared in this scope
    pub const E_RESOLVE_DUPLICATE_DECL: Self = Self::new("E", 3001);
    /// E3002: Resolver - variable read in its own initializer
    pub const E_RESOLVE_SELF_REFERENTIAL_INIT: Self = Self::new("E", 3002);
    /// E3003: Resolver - `this` used outside a method
    pub const E_RESOLVE_THIS_OUTSIDE_METHOD: Self = Self::new("E", 3003);
    /// E3004: Resolver - `super` used outside a subclass method
    pub const E_RESOLVE_SUPER_OUTSIDE_SUBCLASS: Self = Self::new("E", 3004);
    /// E3005: Resolver - `return` used outside a function
    pub const E_RESOLVE_RETURN_OUTSIDE_FN: Self = Self::new("E", 3005);
    /// E3006: Resolver - `return` with a value inside an initializer
    pub const E_RESOLVE_RETURN_VALUE_IN_INIT: Self = Self::new("E", 3006);
    /// E3007: Resolver - `break`/`continue` used outside a loop
    pub const E_RESOLVE_JUMP_OUTSIDE_LOOP: Self = Self::new("E", 3007);
    /// E3008: Resolver - a class inherits from itself
    pub const E_RESOLVE_SELF_INHERITANCE: Self = Self::new("E", 3008);

    /// W3001: Resolver hint - local variable declared but never read
    pub const W_RESOLVE_UNUSED_VARIABLE: Self = Self::new("W", 3001);

    // =========================================================================
    // RUNTIME ERRORS (E4000-E4999)
    // =========================================================================

    /// E4001: Runtime - operand type mismatch
    pub const E_RUNTIME_TYPE_MISMATCH: Self = Self::new("E", 4001);
    /// E4002: Runtime - wrong number of call arguments
    pub const E_RUNTIME_ARITY_MISMATCH: Self = Self::new("E", 4002);
    /// E4003: Runtime - undefined variable
    pub const E_RUNTIME_UNDEFINED_VARIABLE: Self = Self::new("E", 4003);
    /// E4004: Runtime - division by zero
    pub const E_RUNTIME_DIVIDE_BY_ZERO: Self = Self::new("E", 4004);
    /// E4005: Runtime - access to an undefined property
    pub const E_RUNTIME_UNDEFINED_PROPERTY: Self = Self::new("E", 4005);
    /// E4006: Runtime - value is not callable
    pub const E_RUNTIME_NOT_CALLABLE: Self = Self::new("E", 4006);
    /// E4007: Runtime - superclass is not a class
    pub const E_RUNTIME_SUPERCLASS_NOT_CLASS: Self = Self::new("E", 4007);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Standalone constant exports for convenience
pub const E_LEX_ILLEGAL_CHAR: DiagnosticCode = DiagnosticCode::E_LEX_ILLEGAL_CHAR;
pub const E_LEX_BAD_UTF8: DiagnosticCode = DiagnosticCode::E_LEX_BAD_UTF8;
pub const E_LEX_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::E_LEX_UNTERMINATED_STRING;
pub const E_LEX_BAD_ESCAPE: DiagnosticCode = DiagnosticCode::E_LEX_BAD_ESCAPE;
pub const E_PARSE_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN;
pub const E_PARSE_MISSING_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSE_MISSING_TOKEN;
pub const E_PARSE_BAD_ASSIGN_TARGET: DiagnosticCode = DiagnosticCode::E_PARSE_BAD_ASSIGN_TARGET;
pub const E_PARSE_ARITY_LIMIT: DiagnosticCode = DiagnosticCode::E_PARSE_ARITY_LIMIT;
pub const E_RESOLVE_DUPLICATE_DECL: DiagnosticCode = DiagnosticCode::E_RESOLVE_DUPLICATE_DECL;
pub const E_RESOLVE_SELF_REFERENTIAL_INIT: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_SELF_REFERENTIAL_INIT;
pub const E_RESOLVE_THIS_OUTSIDE_METHOD: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_THIS_OUTSIDE_METHOD;
pub const E_RESOLVE_SUPER_OUTSIDE_SUBCLASS: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_SUPER_OUTSIDE_SUBCLASS;
pub const E_RESOLVE_RETURN_OUTSIDE_FN: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_RETURN_OUTSIDE_FN;
pub const E_RESOLVE_RETURN_VALUE_IN_INIT: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_RETURN_VALUE_IN_INIT;
pub const E_RESOLVE_JUMP_OUTSIDE_LOOP: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_JUMP_OUTSIDE_LOOP;
pub const E_RESOLVE_SELF_INHERITANCE: DiagnosticCode =
    DiagnosticCode::E_RESOLVE_SELF_INHERITANCE;
pub const W_RESOLVE_UNUSED_VARIABLE: DiagnosticCode = DiagnosticCode::W_RESOLVE_UNUSED_VARIABLE;
pub const E_RUNTIME_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::E_RUNTIME_TYPE_MISMATCH;
pub const E_RUNTIME_ARITY_MISMATCH: DiagnosticCode = DiagnosticCode::E_RUNTIME_ARITY_MISMATCH;
pub const E_RUNTIME_UNDEFINED_VARIABLE: DiagnosticCode =
    DiagnosticCode::E_RUNTIME_UNDEFINED_VARIABLE;
pub const E_RUNTIME_DIVIDE_BY_ZERO: DiagnosticCode = DiagnosticCode::E_RUNTIME_DIVIDE_BY_ZERO;
pub const E_RUNTIME_UNDEFINED_PROPERTY: DiagnosticCode =
    DiagnosticCode::E_RUNTIME_UNDEFINED_PROPERTY;
pub const E_RUNTIME_NOT_CALLABLE: DiagnosticCode = DiagnosticCode::E_RUNTIME_NOT_CALLABLE;
pub const E_RUNTIME_SUPERCLASS_NOT_CLASS: DiagnosticCode =
    DiagnosticCode::E_RUNTIME_SUPERCLASS_NOT_CLASS;

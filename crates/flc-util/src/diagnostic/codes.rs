//! Diagnostic codes for the three error kinds the pipeline distinguishes:
//! input errors, syntactic errors, and evaluation errors.

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    /// I1: missing command-line argument, file not found, or read failure.
    pub const I_ARGUMENT: Self = Self::new("I", 1);
    pub const I_FILE: Self = Self::new("I", 2);

    /// S1xxx: syntactic errors from the parser.
    pub const S_UNEXPECTED_TOKEN: Self = Self::new("S", 1001);
    pub const S_UNEXPECTED_EOF: Self = Self::new("S", 1002);
    pub const S_INVALID_TOKEN: Self = Self::new("S", 1003);

    /// V1xxx: evaluation errors from the interpreter.
    pub const V_UNKNOWN_IDENT: Self = Self::new("V", 1001);
    pub const V_STACK_IMBALANCE: Self = Self::new("V", 1002);
    pub const V_NO_MAIN: Self = Self::new("V", 1003);
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

use super::Column;
use crate::mach::Address;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    statement: Option<usize>,
    address: Option<Address>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            statement: None,
            address: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn statement(&self) -> Option<usize> {
        self.statement
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    /// Execution faults carry the address of the faulting instruction,
    /// compile errors carry the statement number instead.
    pub fn is_fault(&self) -> bool {
        self.address.is_some()
    }

    pub fn in_statement(&self, statement: usize) -> Error {
        debug_assert!(self.statement.is_none());
        Error {
            statement: Some(statement),
            ..self.clone()
        }
    }

    pub fn at_address(&self, address: Address) -> Error {
        Error {
            address: Some(address),
            ..self.clone()
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self.clone()
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLabel = 8,
    UndefinedVariable = 9,
    DuplicateDefinition = 10,
    TooManyRegisters = 16,
    StackOverflow = 20,
    StackUnderflow = 21,
    AddressOutOfRange = 22,
    InvalidKey = 23,
    InternalError = 51,
    FileNotFound = 53,
    VariableOverlapsCode = 70,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            SyntaxError => "SYNTAX ERROR",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            UndefinedLabel => "UNDEFINED LABEL",
            UndefinedVariable => "UNDEFINED VARIABLE",
            DuplicateDefinition => "DUPLICATE DEFINITION",
            TooManyRegisters => "TOO MANY REGISTERS",
            StackOverflow => "STACK OVERFLOW",
            StackUnderflow => "RETURN WITHOUT CALL",
            AddressOutOfRange => "ADDRESS OUT OF RANGE",
            InvalidKey => "INVALID KEY",
            InternalError => "INTERNAL ERROR",
            FileNotFound => "FILE NOT FOUND",
            VariableOverlapsCode => "VARIABLE OVERLAPS CODE",
        };
        let mut location = String::new();
        if let Some(statement) = self.statement {
            location.push_str(&format!(" {}", statement));
        }
        if let Some(address) = self.address {
            location.push_str(&format!(" 0x{:03X}", address));
        }
        if (0..0) != self.column {
            location.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        write!(f, "{}", code_str)?;
        if !location.is_empty() {
            write!(f, " IN{}", location)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

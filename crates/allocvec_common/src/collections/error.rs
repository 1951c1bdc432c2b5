use core::{alloc::Layout, fmt};

/// Error returned when a container could not reserve the memory it needed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The requested capacity exceeds `isize::MAX` bytes
    CapacityOverflow,
    /// The allocator could not satisfy a request for the given layout
    AllocError(Layout),
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => f.write_str("capacity overflow"),
            TryReserveError::AllocError(layout) => write!(f, "memory allocation of {} bytes (align {}) failed", layout.size(), layout.align()),
        }
    }
}

impl std::error::Error for TryReserveError {}

/// Collection error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// An index was outside of the live elements
    IndexOutOfBounds { index: usize, len: usize },
    /// A range was outside of the live elements
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    /// The requested capacity exceeds `isize::MAX` bytes
    CapacityOverflow,
    /// The allocator could not satisfy a request for the given layout
    AllocError(Layout),
    /// The operation needs at least 1 element
    Empty,
    /// The operation is not supported
    NotImplemented(&'static str),
}

impl Error {
    /// Check if the error is caused by an index or range outside of the live elements
    pub fn is_bounds(&self) -> bool {
        matches!(self, Error::IndexOutOfBounds { .. } | Error::RangeOutOfBounds { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, len } => write!(f, "index out of bounds: the len is {len} but the index is {index}"),
            Error::RangeOutOfBounds { start, end, len } => write!(f, "range {start}..{end} out of bounds: the len is {len}"),
            Error::CapacityOverflow => f.write_str("capacity overflow"),
            Error::AllocError(layout) => write!(f, "memory allocation of {} bytes (align {}) failed", layout.size(), layout.align()),
            Error::Empty => f.write_str("the collection is empty"),
            Error::NotImplemented(op) => write!(f, "`{op}` is not implemented"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        match err {
            TryReserveError::CapacityOverflow => Error::CapacityOverflow,
            TryReserveError::AllocError(layout) => Error::AllocError(layout),
        }
    }
}

/// Collection result
pub type Result<T> = core::result::Result<T, Error>;

use std::alloc;
use std::error::Error;

use crate::util::error::TryReserveError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait ReserveResultExtension<T> {
    /// Unwraps the result of a fallible allocation for use in an infallible method. A capacity
    /// overflow is thrown as a panic, while an allocation failure is passed on to
    /// [`alloc::handle_alloc_error`], the same as the collections in [`std`].
    ///
    /// # Panics
    /// Panics if the [`Result`] is a [`TryReserveError::CapacityOverflow`].
    fn handle(self) -> T;
}

impl<T> ReserveResultExtension<T> for Result<T, TryReserveError> {
    fn handle(self) -> T {
        match self {
            Ok(val) => val,
            Err(TryReserveError::AllocationFailure(failure)) => {
                alloc::handle_alloc_error(failure.layout)
            },
            Err(error @ TryReserveError::CapacityOverflow(_)) => panic!("{}", error),
        }
    }
}

/*!
# Utilities for Handling Success/Failure

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Support/LogicalResult.h>
*/

/// Success carries nothing; failure carries the error that explains it.
pub type LogicalResult<E> = Result<(), E>;

/**
This type provides support for representing a failure result, or a valid value of type `T`. This allows for integrating with LogicalResult, while also providing a value on the success path.
*/
pub type FailureOr<T, E> = Result<T, E>;

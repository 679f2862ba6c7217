/*!
# XeGPU Dialect

The XeGPU dialect models Intel Xe GPU block data movement. A tensor descriptor describes a rectangular sub-view of memory; ops prefetch, load and store tiles through it.

- include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Dialect/XeGPU>
- lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Dialect/XeGPU>
*/

pub mod ir;

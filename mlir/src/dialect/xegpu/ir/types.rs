/*!
# XeGPU Type Definitions

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Dialect/XeGPU/IR/XeGPUTypes.td>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Dialect/XeGPU/IR/XeGPUDialect.cpp>
*/

use core::fmt;

use crate::ir::{
    builtins::type_interfaces::{format_dimension_list, ShapedType},
    r#type::Type
};

// ----------------------------------------------------------------------
// TensorDesc
// ----------------------------------------------------------------------

/**
Tensor descriptor type: an opaque handle to a block of memory, parameterised by the shape of the tile it accesses and its element type.

```mlir
!xegpu.tensor_desc<8x16xf32>
```

The tile shape is the logical shape loaded from and stored to memory. It is independent of the shape of the addressed region recorded by the op that created the descriptor.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TensorDesc {
    shape: Vec<i64>,
    element_type: Box<Type>
}

impl TensorDesc {
    pub fn new(shape: impl Into<Vec<i64>>, element_type: impl Into<Type>) -> Self {
        Self {
            shape: shape.into(),
            element_type: Box::new(element_type.into())
        }
    }
}

impl ShapedType for TensorDesc {
    fn element_type(&self) -> &Type {
        &self.element_type
    }

    fn shape(&self) -> &[i64] {
        &self.shape
    }
}

impl fmt::Display for TensorDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("!xegpu.tensor_desc<")?;
        if !self.shape.is_empty() {
            write!(f, "{}x", format_dimension_list(&self.shape))?;
        }
        write!(f, "{}>", self.element_type)
    }
}

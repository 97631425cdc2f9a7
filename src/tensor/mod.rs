//! Implements symmetric second- and fourth-order tensors in the Mandel basis
//!
//! Both types wrap the [russell_tensor] structures with [russell_tensor::Mandel::Symmetric].

mod tensor2;
mod tensor4;
pub use crate::tensor::tensor2::*;
pub use crate::tensor::tensor4::*;

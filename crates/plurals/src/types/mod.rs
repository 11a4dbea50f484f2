mod category;
mod operand;

pub use category::{PluralCategory, UnknownCategoryError};
pub use operand::{OperandError, PluralOperand};

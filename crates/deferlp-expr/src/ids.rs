use crate::expr::LinExpr;

macro_rules! define_id_type {
    ($name:ident) => {
        /// Position of the entity in its model's declaration order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            /// Declaration index as a `usize`.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id_type!(VarId);
define_id_type!(ConstrId);

impl VarId {
    /// Promote to a one-term expression with coefficient 1.
    pub fn to_lin_expr(self) -> LinExpr {
        LinExpr::var(self)
    }
}

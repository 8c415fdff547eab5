//! Operator overloads across numbers, variables and expressions.
//!
//! Multiplication is only defined against `f64`; a product of two
//! non-constant operands does not type-check. `LinExpr::try_multiply`
//! covers operands that are only known at runtime.

use crate::expr::core::LinExpr;
use crate::ids::VarId;
use std::ops::{Add, Mul, Neg, Sub};

macro_rules! impl_additive {
    ($lhs:ty => $($rhs:ty),+) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = LinExpr;

                fn add(self, rhs: $rhs) -> LinExpr {
                    LinExpr::add(&LinExpr::from(self), rhs)
                }
            }

            impl Sub<$rhs> for $lhs {
                type Output = LinExpr;

                fn sub(self, rhs: $rhs) -> LinExpr {
                    LinExpr::from(self).subtract(rhs)
                }
            }
        )+
    };
}

impl_additive!(LinExpr => LinExpr, VarId, f64);
impl_additive!(VarId => LinExpr, VarId, f64);
impl_additive!(f64 => LinExpr, VarId);

impl Add<&LinExpr> for &LinExpr {
    type Output = LinExpr;

    fn add(self, rhs: &LinExpr) -> LinExpr {
        LinExpr::add(self, rhs)
    }
}

impl Sub<&LinExpr> for &LinExpr {
    type Output = LinExpr;

    fn sub(self, rhs: &LinExpr) -> LinExpr {
        self.subtract(rhs)
    }
}

impl Mul<f64> for LinExpr {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        self.multiply(rhs)
    }
}

impl Mul<f64> for &LinExpr {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        self.multiply(rhs)
    }
}

impl Mul<f64> for VarId {
    type Output = LinExpr;

    fn mul(self, rhs: f64) -> LinExpr {
        LinExpr::term(self, rhs)
    }
}

impl Mul<LinExpr> for f64 {
    type Output = LinExpr;

    fn mul(self, rhs: LinExpr) -> LinExpr {
        rhs.multiply(self)
    }
}

impl Mul<VarId> for f64 {
    type Output = LinExpr;

    fn mul(self, rhs: VarId) -> LinExpr {
        LinExpr::term(rhs, self)
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        self.negate()
    }
}

impl Neg for VarId {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        LinExpr::term(self, -1.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::expr::{LinExpr, Term};
    use crate::ids::VarId;

    #[test]
    fn variable_sum_builds_two_unit_terms() {
        let x = VarId::new(0);
        let y = VarId::new(1);
        let e = x + y;
        assert_eq!(e.terms(), &[Term::new(1.0, x), Term::new(1.0, y)]);
        assert_eq!(e.constant(), 0.0);
    }

    #[test]
    fn scaled_combination_with_constant() {
        let x = VarId::new(0);
        let y = VarId::new(1);
        let e = 3.0 * x - 2.0 * y + 5.0;
        assert_eq!(e.terms(), &[Term::new(3.0, x), Term::new(-2.0, y)]);
        assert_eq!(e.constant(), 5.0);
    }

    #[test]
    fn number_minus_expression_negates_terms() {
        let x = VarId::new(2);
        let e = 1.0 - LinExpr::term(x, 4.0);
        assert_eq!(e.terms(), &[Term::new(-4.0, x)]);
        assert_eq!(e.constant(), 1.0);
    }

    #[test]
    fn negated_variable() {
        let x = VarId::new(0);
        assert_eq!(-x, LinExpr::term(x, -1.0));
    }

    #[test]
    fn reference_addition_leaves_operands_intact() {
        let a = LinExpr::term(VarId::new(0), 2.0);
        let b = LinExpr::from_constant(1.0);
        let c = &a + &b;
        assert_eq!(c.terms().len(), 1);
        assert_eq!(c.constant(), 1.0);
        assert_eq!(a.constant(), 0.0);
    }
}

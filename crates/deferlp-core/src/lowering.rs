//! Conversion of logical expressions into engine-native form.

use crate::model::ModelError;
use deferlp_engine::{NativeLinExpr, NativeRhs, VarHandle};
use deferlp_expr::{LinExpr, Operand, VarId};

pub(crate) type ResolveVar<'a> = &'a dyn Fn(VarId) -> Result<VarHandle, ModelError>;

pub(crate) fn lower_expr(
    expr: &LinExpr,
    resolve: ResolveVar<'_>,
) -> Result<NativeLinExpr, ModelError> {
    let mut native = NativeLinExpr::new();
    for term in expr.terms() {
        native.add_term(term.coeff(), resolve(term.var())?);
    }
    native.add_constant(expr.constant());
    Ok(native)
}

pub(crate) fn lower_operand(
    operand: &Operand,
    resolve: ResolveVar<'_>,
) -> Result<NativeLinExpr, ModelError> {
    match operand {
        Operand::Expr(expr) => lower_expr(expr, resolve),
        Operand::Var(var) => {
            let mut native = NativeLinExpr::new();
            native.add_term(1.0, resolve(*var)?);
            Ok(native)
        }
        Operand::Const(value) => {
            let mut native = NativeLinExpr::new();
            native.add_constant(*value);
            Ok(native)
        }
    }
}

/// A numeric rhs stays a constant; anything else is lowered.
pub(crate) fn lower_rhs(
    operand: &Operand,
    resolve: ResolveVar<'_>,
) -> Result<NativeRhs, ModelError> {
    match operand {
        Operand::Const(value) => Ok(NativeRhs::Const(*value)),
        other => Ok(NativeRhs::Expr(lower_operand(other, resolve)?)),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{lower_expr, lower_rhs};
    use crate::model::{Entity, ModelError};
    use deferlp_engine::{NativeRhs, VarHandle};
    use deferlp_expr::{LinExpr, Operand, VarId};

    fn shifted(id: VarId) -> Result<VarHandle, ModelError> {
        Ok(VarHandle::new(id.index() + 10))
    }

    #[test]
    fn terms_map_through_resolver() {
        let x = VarId::new(0);
        let y = VarId::new(1);
        let native = lower_expr(&(2.0 * x + y + 3.0), &shifted).expect("lowered");
        assert_eq!(
            native.terms(),
            &[(2.0, VarHandle::new(10)), (1.0, VarHandle::new(11))]
        );
        assert_eq!(native.constant(), 3.0);
    }

    #[test]
    fn numeric_rhs_stays_constant() {
        assert_eq!(
            lower_rhs(&Operand::Const(4.0), &shifted),
            Ok(NativeRhs::Const(4.0))
        );
    }

    #[test]
    fn resolver_errors_propagate() {
        let unbound = |id: VarId| -> Result<VarHandle, ModelError> {
            Err(ModelError::NotYetMaterialized {
                entity: Entity::Variable,
                index: id.inner(),
            })
        };
        let result = lower_expr(&LinExpr::var(VarId::new(5)), &unbound);
        assert!(matches!(
            result,
            Err(ModelError::NotYetMaterialized { index: 5, .. })
        ));
    }
}

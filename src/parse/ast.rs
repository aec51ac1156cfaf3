use crate::common::*;
use crate::dice::DiceSpec;
use crate::ops::{DiceOperate, DiceOperator};

/// A parsed roll expression.
///
/// Expressions come in two flavors: a dice roll (`"4d10>6"`), or a plain
/// integer arithmetic expression (`"(2+3)*4"`) when the input carries no
/// dice token at all.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expression {
    Roll(DiceExpr),
    Arithmetic(Node),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceExpr {
    pub spec: DiceSpec,
    /// Modifiers in order of appearance. Evaluation order is decided by
    /// [`DiceOperate::priority`], not by this order.
    pub ops: Vec<DiceOperator>,
}

impl DiceExpr {
    pub fn new(spec: DiceSpec, ops: Vec<DiceOperator>) -> Self {
        Self { spec, ops }
    }

    /// The modifiers in evaluation order: ascending priority, stable for
    /// equal priorities.
    pub fn sorted_ops(&self) -> Vec<DiceOperator> {
        let mut ops = self.ops.clone();
        ops.sort_by_key(|op| op.priority());
        ops
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec)?;
        for op in &self.ops {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Literal(Int),
    Parenthetical(Box<Node>),
    Unary(UnaryOperator, Box<Node>),
    Binary(Box<Node>, BinaryOperator, Box<Node>),
}

impl Node {
    pub fn new_literal(x: Int) -> Self {
        Self::Literal(x)
    }

    pub fn new_parenthetical(inner: Node) -> Self {
        Self::Parenthetical(Box::new(inner))
    }

    pub fn new_unary(op: UnaryOperator, rhs: Node) -> Self {
        Self::Unary(op, Box::new(rhs))
    }

    pub fn new_binary(op: BinaryOperator, lhs: Node, rhs: Node) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }
}

//! Scope tree definitions: variables, prototypes, lowered expressions.
//!
//! Expressions never reference variables by pointer; every operand is a
//! [`VarId`] into the [`VarArena`] owned by the enclosing [`SyntaxTree`], so
//! appending declarations never invalidates existing references and teardown
//! is a plain drop of the tree.

use std::ops::Index;

pub const BITS_PER_BYTE: u32 = 8;
pub const SIZEOF_INT: u32 = 4;
pub const SIZEOF_VOID: u32 = 1;

/// A declared variable: its width in bits and its name.
///
/// `int` is 32 bits wide; `void` is modelled as an ordinary 1-byte-wide
/// placeholder type rather than a true absence of value; the dumper relies
/// on the 8-bit width to render it. An empty name marks an unnamed entity
/// (an anonymous declaration or function parameter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    /// Width in bits.
    pub size: u32,
    pub name: String,
}

/// Stable handle to a [`Variable`] stored in a [`VarArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarId(usize);

/// Owns every variable of a compilation unit, including synthesized
/// temporaries. Scopes and expressions hold [`VarId`]s into it.
#[derive(Debug, Default)]
pub struct VarArena {
    vars: Vec<Variable>,
}

impl VarArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, var: Variable) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(var);
        id
    }

    pub fn get(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Index<VarId> for VarArena {
    type Output = Variable;

    fn index(&self, id: VarId) -> &Variable {
        self.get(id)
    }
}

/// A function prototype.
///
/// The return type doubles as the function's identity: its `name` field
/// holds the function's name. A prototype with an empty return-type name is
/// the synthetic prototype of the root scope and is never rendered.
#[derive(Debug, Clone, Default)]
pub struct FunctionPrototype {
    pub return_type: Variable,
    /// Parameters in source order; names are optional.
    pub params: Vec<Variable>,
}

impl FunctionPrototype {
    pub fn is_root(&self) -> bool {
        self.return_type.name.is_empty()
    }
}

/// The four binary operators the language recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl BinaryKind {
    /// Rendering of the operator, spaces included.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryKind::Addition => " + ",
            BinaryKind::Subtraction => " - ",
            BinaryKind::Multiplication => " * ",
            BinaryKind::Division => " / ",
        }
    }
}

/// One lowered expression.
///
/// `Binary` is a single temporary assignment `result = left <op> right`
/// where `result` is always a freshly created temporary. `Noop` is a bare
/// identifier used as a statement; it has no effect and is kept only as a
/// statement placeholder.
#[derive(Debug, Clone, Copy)]
pub enum Expression {
    Noop {
        operand: VarId,
    },
    Binary {
        kind: BinaryKind,
        left: VarId,
        right: VarId,
        result: VarId,
    },
}

/// A lexical block: the root compilation unit, a function body, or a nested
/// brace block.
///
/// The four lists are independent and each preserves source order. Every
/// [`VarId`] referenced by an expression is already present in this scope's
/// `vars` or an ancestor's by the time the expression is recorded.
#[derive(Debug, Default)]
pub struct Scope {
    pub proto: FunctionPrototype,
    /// Variables declared in this scope, temporaries included.
    pub vars: Vec<VarId>,
    /// Forward declarations only; bodies become `children` instead.
    pub prototypes: Vec<FunctionPrototype>,
    /// Nested blocks and function bodies, in source order.
    pub children: Vec<Scope>,
    /// Lowered expressions, in evaluation order.
    pub exprs: Vec<Expression>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proto(proto: FunctionPrototype) -> Self {
        Self {
            proto,
            ..Self::default()
        }
    }
}

/// A successfully parsed compilation unit: the root scope plus the arena
/// owning every variable the tree references.
#[derive(Debug)]
pub struct SyntaxTree {
    pub arena: VarArena,
    pub root: Scope,
}

impl SyntaxTree {
    pub fn var(&self, id: VarId) -> &Variable {
        self.arena.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_handles_stay_valid_across_growth() {
        let mut arena = VarArena::new();
        let first = arena.alloc(Variable {
            size: SIZEOF_INT * BITS_PER_BYTE,
            name: "i".to_string(),
        });
        for n in 0..100 {
            arena.alloc(Variable {
                size: SIZEOF_INT * BITS_PER_BYTE,
                name: format!(".{n}"),
            });
        }
        assert_eq!(arena[first].name, "i");
        assert_eq!(arena.len(), 101);
    }

    #[test]
    fn test_root_prototype_detection() {
        assert!(FunctionPrototype::default().is_root());

        let named = FunctionPrototype {
            return_type: Variable {
                size: SIZEOF_INT * BITS_PER_BYTE,
                name: "f".to_string(),
            },
            params: Vec::new(),
        };
        assert!(!named.is_root());
    }
}

use std::rc::Rc;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDeclaration(VarDeclaration),
    /// Shared so that function values can keep the body alive after the program is dropped.
    FunctionDeclaration(Rc<FunctionDeclaration>),
    Return(Option<Expr>),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub constant: bool,
    pub target: DeclarationTarget,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationTarget {
    Identifier(Rc<str>),
    /// `let [a, b] = ...`
    Destructuring(ArrayDestructuring),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDestructuring {
    pub elements: Vec<Rc<str>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Rc<str>,
    pub params: Vec<Rc<str>>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Mod => left % right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumericLiteral(f64),
    StringLiteral(Rc<str>),
    Identifier(Rc<str>),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call(CallExpr),
    Member {
        object: Box<Expr>,
        property: MemberProperty,
    },
    Object(Vec<Property>),
    Array(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `object.name`
    Named(String),
    /// `object[expr]`
    Computed(Box<Expr>),
}

/// An object literal entry. `value` is `None` for the shorthand `{ key }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    /// Set for `callee:Type(...)` calls.
    pub type_annotation: Option<TypeAnnotation>,
}

/// `Number`, `Array(String)`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub type_name: String,
    pub generic_types: Vec<TypeAnnotation>,
}

impl TypeAnnotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generic_types: Vec::new(),
        }
    }

    pub fn element_type(&self) -> Option<&str> {
        self.generic_types.first().map(|t| t.type_name.as_str())
    }
}

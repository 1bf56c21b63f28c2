/// An ordered sequence of top-level nodes.
///
/// A `Program` is what the parser returns for a whole source text, for the
/// body of a procedure, and for every instruction list that is re-parsed at
/// run time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The nodes, in source order.
    pub body: Vec<Node>,
}

/// An abstract syntax tree (AST) node.
///
/// Logo has no statement grammar: every node is an expression, and commands
/// are procedure calls that happen not to output anything. Each variant
/// carries the source line it started on.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric literal such as `42` or `2.5`.
    NumberLiteral {
        /// The value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A quoted word such as `"hello`, or a leaf of a bracketed list.
    StringLiteral {
        /// The text of the word, without the leading quote.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    Boolean {
        /// The value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A variable read such as `:size`.
    Variable {
        /// Name of the variable, lowercased.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An infix arithmetic or comparison operation.
    InfixOperation {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A bracketed list. Elements are [`Node::StringLiteral`] leaves or nested
    /// lists; nothing inside is evaluated until a primitive runs it.
    List {
        /// The elements of the list.
        elements: Vec<Self>,
        /// Line number of the opening bracket.
        line:     usize,
    },
    /// A call to a primitive or user-defined procedure.
    ProcedureCall {
        /// Name of the procedure, lowercased.
        name:      String,
        /// Argument expressions, in order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A `to ... end` definition.
    ProcedureDefinition(ProcedureDef),
    /// An `if` or `ifelse` form.
    Conditional {
        /// Which keyword introduced the form.
        kind:        ConditionalKind,
        /// The condition expression.
        condition:   Box<Self>,
        /// Evaluated when the condition is true.
        then_branch: Box<Self>,
        /// Evaluated when the condition is false. Always `Some` for `ifelse`.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
}

impl Node {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use logoscript::ast::Node;
    ///
    /// let node = Node::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(node.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::NumberLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::Boolean { line, .. }
            | Self::Variable { line, .. }
            | Self::InfixOperation { line, .. }
            | Self::List { line, .. }
            | Self::ProcedureCall { line, .. }
            | Self::Conditional { line, .. } => *line,
            Self::ProcedureDefinition(def) => def.line,
        }
    }
}

/// Represents a user-defined procedure definition.
///
/// Written as `to NAME :param1 :param2 ... body ... end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    /// The name of the procedure, lowercased.
    pub name:   String,
    /// The formal parameter names, lowercased and without the colon.
    pub params: Vec<String>,
    /// The instructions run when the procedure is called.
    pub body:   Program,
    /// Line number of the `to` keyword.
    pub line:   usize,
}

/// Distinguishes `if` from `ifelse`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConditionalKind {
    /// `if condition then`
    If,
    /// `ifelse condition then else`
    IfElse,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`<>`)
    NotEqual,
}

impl BinaryOperator {
    /// Binding strength used by the infix loop of the parser.
    ///
    /// Comparisons bind loosest, then `+`/`-`, then `*`/`/`.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div => 20,
            Self::Add | Self::Sub => 10,
            Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual
            | Self::Equal
            | Self::NotEqual => 7,
        }
    }
}

impl std::fmt::Display for ConditionalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::If => write!(f, "if"),
            Self::IfElse => write!(f, "ifelse"),
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "=",
            NotEqual => "<>",
        };
        write!(f, "{operator}")
    }
}

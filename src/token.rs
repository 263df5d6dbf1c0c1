use std::fmt;

/// Built-in type names recognised by the lexer as [`Token::TypeName`].
pub const TYPE_NAMES: [&str; 7] = ["String", "Number", "Boolean", "Array", "Object", "Any", "Void"];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Let,
    Const,
    Function,
    Export,
    Default,

    // Literals and Identifiers
    /// Raw numeric text, kept verbatim so `1.2.3` survives lexing.
    Number(String),
    String(String),
    Ident(String),
    /// One of [`TYPE_NAMES`].
    TypeName(String),

    // Arithmetic Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison Operators
    Eq,
    StrictEq,
    NotEq,
    StrictNotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,

    // Logical Operators
    And,
    Or,
    Bang,

    // Punctuation
    Assign,
    Question,
    Comma,
    Colon,
    Semicolon,
    Dot,
    /// `...`
    Spread,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Eof,
}

impl Token {
    /// Maps an identifier-shaped word onto its keyword, type-name or identifier token.
    pub fn from_word(word: &str) -> Token {
        match word {
            "let" => Token::Let,
            "const" => Token::Const,
            "function" => Token::Function,
            "export" => Token::Export,
            "default" => Token::Default,
            _ if TYPE_NAMES.contains(&word) => Token::TypeName(word.to_string()),
            _ => Token::Ident(word.to_string()),
        }
    }

    /// The source text this token stands for.
    pub fn text(&self) -> &str {
        match self {
            Token::Let => "let",
            Token::Const => "const",
            Token::Function => "function",
            Token::Export => "export",
            Token::Default => "default",
            Token::Number(text)
            | Token::String(text)
            | Token::Ident(text)
            | Token::TypeName(text) => text,
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Eq => "==",
            Token::StrictEq => "===",
            Token::NotEq => "!=",
            Token::StrictNotEq => "!==",
            Token::Less => "<",
            Token::LessEq => "<=",
            Token::Greater => ">",
            Token::GreaterEq => ">=",
            Token::And => "&&",
            Token::Or => "||",
            Token::Bang => "!",
            Token::Assign => "=",
            Token::Question => "?",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Dot => ".",
            Token::Spread => "...",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Eof => "end of input",
        }
    }

    pub fn is_type_name(&self) -> bool {
        matches!(self, Token::TypeName(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::String(text) => write!(f, "string \"{}\"", text),
            Token::Number(text) => write!(f, "number `{}`", text),
            Token::Ident(text) => write!(f, "identifier `{}`", text),
            Token::TypeName(text) => write!(f, "type `{}`", text),
            other => write!(f, "`{}`", other.text()),
        }
    }
}

use crate::ast::{
    ArrayDestructuring, BinaryOp, CallExpr, DeclarationTarget, Expr, FunctionDeclaration, MemberProperty,
    Program, Property, Stmt, TypeAnnotation, VarDeclaration,
};
use crate::diagnostic::{Diagnostic, Label, Span};
use crate::lexer::{numeric_value, tokenize_spanned, LexError};
use crate::token::Token;
use std::fmt;
use std::rc::Rc;

pub use crate::lexer::SpannedToken;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub help: Option<String>,
    pub code: &'static str,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
            help: None,
            code: "E0101",
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg = format!("expected {}", self.expected.join(" or "));
            if let Some(found) = &self.found {
                msg.push_str(&format!(", found {}", found));
            }
        }

        let mut diag = Diagnostic::error(msg)
            .with_code(self.code)
            .with_label(Label::primary(self.span, ""));

        if let Some(help) = &self.help {
            diag = diag.with_help(help.clone());
        } else if self.expected.len() == 1 {
            diag = diag.with_help(format!("expected {} here", self.expected[0]));
        }

        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let mut parse_err = ParseError::new(err.to_string(), err.span());
        parse_err.code = "E0001";
        if let Some(c) = err.character {
            parse_err = parse_err.with_found(format!("`{}`", c));
        }
        parse_err.help = err.help().map(str::to_string);
        parse_err
    }
}

/// Lexes and parses a whole source file. The first error aborts.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize_spanned(source)?;
    TokenParser::new(tokens, source.len()).parse_program()
}

/// Recursive-descent parser over a lexed token stream.
pub struct TokenParser {
    tokens: Vec<SpannedToken>,
    current: usize,
}

impl TokenParser {
    pub fn new(mut tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        if !matches!(tokens.last(), Some(SpannedToken { token: Token::Eof, .. })) {
            tokens.push(SpannedToken {
                token: Token::Eof,
                span: Span::new(source_len, source_len),
            });
        }
        Self { tokens, current: 0 }
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)].token
    }

    /// Token `offset` places past the current one.
    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|st| &st.token)
    }

    fn current_span(&self) -> Span {
        self.tokens[self.current.min(self.tokens.len() - 1)].span
    }

    fn at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    fn advance(&mut self) -> SpannedToken {
        let st = self.tokens[self.current.min(self.tokens.len() - 1)].clone();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        st
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.current_token().to_string();
        ParseError::new(format!("expected {}, found {}", expected, found), self.current_span())
            .with_expected(vec![expected.to_string()])
            .with_found(found)
    }

    fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        if std::mem::discriminant(self.current_token()) == std::mem::discriminant(&expected) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<Rc<str>, ParseError> {
        match self.current_token() {
            Token::Ident(name) => {
                let name = Rc::from(name.as_str());
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.current_token() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_statement()?);
        }
        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current_token() {
            Token::Let | Token::Const => self.parse_var_declaration(),
            Token::Function => self.parse_function_declaration(),
            Token::Ident(name) if name == "return" => self.parse_return_statement(),
            _ => {
                let expr = self.parse_expression()?;
                self.eat(&Token::Semicolon);
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        if matches!(self.current_token(), Token::Semicolon | Token::RBrace | Token::Eof) {
            self.eat(&Token::Semicolon);
            return Ok(Stmt::Return(None));
        }
        let value = self.parse_expression()?;
        self.eat(&Token::Semicolon);
        Ok(Stmt::Return(Some(value)))
    }

    fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect(Token::Function)?;
        let name = self.expect_ident("function name")?;

        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        if !matches!(self.current_token(), Token::RParen) {
            loop {
                params.push(self.expect_ident("parameter name")?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;

        self.expect(Token::LBrace)?;
        let mut body = Vec::new();
        while !matches!(self.current_token(), Token::RBrace | Token::Eof) {
            body.push(self.parse_statement()?);
        }
        self.expect(Token::RBrace)?;

        Ok(Stmt::FunctionDeclaration(Rc::new(FunctionDeclaration { name, params, body })))
    }

    fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance();
        let constant = keyword.token == Token::Const;

        if matches!(self.current_token(), Token::LBracket) {
            return self.parse_destructuring_declaration(constant);
        }

        let name = self.expect_ident("identifier")?;

        if matches!(self.current_token(), Token::Semicolon) {
            if constant {
                return Err(ParseError::new(
                    format!("constant `{}` must be initialized", name),
                    keyword.span.merge(self.current_span()),
                ));
            }
            self.advance();
            return Ok(Stmt::VarDeclaration(VarDeclaration {
                constant,
                target: DeclarationTarget::Identifier(name),
                value: None,
            }));
        }

        self.expect(Token::Assign)?;
        let value = self.parse_expression()?;
        self.expect(Token::Semicolon)?;

        Ok(Stmt::VarDeclaration(VarDeclaration {
            constant,
            target: DeclarationTarget::Identifier(name),
            value: Some(value),
        }))
    }

    fn parse_destructuring_declaration(&mut self, constant: bool) -> Result<Stmt, ParseError> {
        self.expect(Token::LBracket)?;
        let mut elements = Vec::new();
        while !matches!(self.current_token(), Token::RBracket) {
            elements.push(self.expect_ident("identifier")?);
            if !self.eat(&Token::Comma) && !matches!(self.current_token(), Token::RBracket) {
                return Err(self.unexpected("`,` or `]`"));
            }
        }
        self.expect(Token::RBracket)?;
        self.expect(Token::Assign)?;
        let value = self.parse_expression()?;
        self.expect(Token::Semicolon)?;

        Ok(Stmt::VarDeclaration(VarDeclaration {
            constant,
            target: DeclarationTarget::Destructuring(ArrayDestructuring { elements }),
            value: Some(value),
        }))
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_object()?;

        if self.eat(&Token::Assign) {
            let value = self.parse_assignment()?;
            return Ok(Expr::Assignment {
                target: Box::new(left),
                value: Box::new(value),
            });
        }

        Ok(left)
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        if !matches!(self.current_token(), Token::LBrace) {
            return self.parse_additive();
        }
        self.advance();

        let mut properties = Vec::new();
        while !matches!(self.current_token(), Token::RBrace | Token::Eof) {
            let key = match self.current_token() {
                Token::Ident(key) | Token::TypeName(key) => key.clone(),
                _ => return Err(self.unexpected("property name")),
            };
            self.advance();

            match self.current_token() {
                Token::Comma => {
                    self.advance();
                    properties.push(Property { key, value: None });
                    continue;
                }
                Token::RBrace => {
                    properties.push(Property { key, value: None });
                    continue;
                }
                _ => {}
            }

            self.expect(Token::Colon)?;
            let value = self.parse_expression()?;
            properties.push(Property {
                key,
                value: Some(value),
            });
            if !matches!(self.current_token(), Token::RBrace) {
                self.expect(Token::Comma)?;
            }
        }
        self.expect(Token::RBrace)?;

        Ok(Expr::Object(properties))
    }

    fn token_to_binary_operator(token: &Token) -> Option<BinaryOp> {
        match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op @ (BinaryOp::Add | BinaryOp::Sub)) =
            Self::token_to_binary_operator(self.current_token())
        {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_postfix()?;
        while let Some(op @ (BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod)) =
            Self::token_to_binary_operator(self.current_token())
        {
            self.advance();
            let right = self.parse_postfix()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.current_token() {
                Token::Dot => {
                    self.advance();
                    let field = self.expect_ident("property name after `.`")?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: MemberProperty::Named(field.to_string()),
                    };
                }
                Token::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(Token::RBracket)?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: MemberProperty::Computed(Box::new(index)),
                    };
                }
                Token::LParen => {
                    let args = self.parse_args()?;
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        type_annotation: None,
                    });
                }
                Token::Colon => {
                    self.advance();
                    let (annotation, inline_args) = self.parse_type_annotation()?;
                    let args = match inline_args {
                        Some(args) if !args.is_empty() => args,
                        _ if matches!(self.current_token(), Token::LParen) => self.parse_args()?,
                        _ => Vec::new(),
                    };
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        type_annotation: Some(annotation),
                    });
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parses `Type` or `Type(T1, T2, ...)` after a `:`.
    ///
    /// Inside the parentheses a comma followed by something other than a type
    /// name ends the generic list; the rest, up to the closing paren, are call
    /// arguments and come back as the second element.
    fn parse_type_annotation(&mut self) -> Result<(TypeAnnotation, Option<Vec<Expr>>), ParseError> {
        let type_name = match self.current_token() {
            Token::TypeName(name) => name.clone(),
            _ => return Err(self.unexpected("type name")),
        };
        self.advance();

        let mut annotation = TypeAnnotation::new(type_name);
        let mut inline_args = None;

        let opens_generics = matches!(self.current_token(), Token::LParen)
            && self.peek(1).is_some_and(Token::is_type_name);
        if !opens_generics {
            return Ok((annotation, inline_args));
        }
        self.advance();

        while self.current_token().is_type_name() {
            let (generic, _) = self.parse_type_annotation()?;
            annotation.generic_types.push(generic);

            match self.current_token() {
                Token::Comma if self.peek(1).is_some_and(Token::is_type_name) => {
                    self.advance();
                }
                Token::Comma => {
                    self.advance();
                    let mut args = Vec::new();
                    while !matches!(self.current_token(), Token::RParen | Token::Eof) {
                        args.push(self.parse_expression()?);
                        if !self.eat(&Token::Comma) {
                            break;
                        }
                    }
                    self.expect(Token::RParen)?;
                    inline_args = Some(args);
                    break;
                }
                _ => {
                    self.expect(Token::RParen)?;
                    break;
                }
            }
        }

        Ok((annotation, inline_args))
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if !matches!(self.current_token(), Token::RParen) {
            loop {
                args.push(self.parse_assignment()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_token().clone() {
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Identifier(Rc::from(name.as_str())))
            }
            Token::Number(text) => {
                self.advance();
                Ok(Expr::NumericLiteral(numeric_value(&text)))
            }
            Token::String(text) => {
                self.advance();
                Ok(Expr::StringLiteral(Rc::from(text.as_str())))
            }
            Token::LParen => {
                self.advance();
                let value = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Token::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                while !matches!(self.current_token(), Token::RBracket) {
                    elements.push(self.parse_expression()?);
                    if !self.eat(&Token::Comma) && !matches!(self.current_token(), Token::RBracket) {
                        return Err(self.unexpected("`,` or `]`"));
                    }
                }
                self.expect(Token::RBracket)?;
                Ok(Expr::Array(elements))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

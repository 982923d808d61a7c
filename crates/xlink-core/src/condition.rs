//! Conditional inclusion.
//!
//! An inclusion tag may carry `data-if="expr"`. The configured [`ProcessIf`]
//! hook decides whether it survives. The built-in [`ExpressionCondition`]
//! evaluates a small boolean language over one free variable, `config`,
//! bound to the active options:
//!
//! ```text
//! expr    := or
//! or      := and ( "||" and )*
//! and     := eq ( "&&" eq )*
//! eq      := unary ( ( "==" | "!=" ) unary )*
//! unary   := "!"* primary
//! primary := literal | "config" ( "." name | "[" string "]" )* | "(" expr ")"
//! literal := true | false | null | number | "string" | 'string'
//! ```
//!
//! `===` and `!==` are accepted as spellings of `==` and `!=`. Equality is
//! strict: values of different types are never equal, so `config.level ==
//! '2'` is false when `level` is the number `2`. Suffix values are typed on
//! the way in (`level=2` is a number, `level=v2` a string). Missing option
//! keys evaluate to `null`. Falsy values: `false`, `null`, `0`, `""`, `[]`.
//! Parentheses nest at most 64 levels deep.

use xlink_config::{Options, SettingValue};

use crate::attrs::AttributeMap;
use crate::{ResolveError, Settings};

/// Maximum parenthesis nesting in a condition.
const MAX_DEPTH: usize = 64;

/// Everything a condition evaluator may look at.
#[derive(Debug)]
pub struct ConditionContext<'a> {
    /// The `data-if` text.
    pub condition: &'a str,
    /// All attributes of the tag.
    pub attrs: &'a AttributeMap,
    /// Resolved identifier of the inclusion.
    pub resource_name: &'a str,
    /// The full tag text.
    pub tag_text: &'a str,
    /// Active settings.
    pub settings: &'a Settings,
}

/// Decides whether a conditional inclusion survives.
pub trait ProcessIf: Send + Sync {
    /// Return `true` to keep the inclusion.
    fn should_include(&self, ctx: &ConditionContext<'_>) -> Result<bool, ResolveError>;
}

impl<F> ProcessIf for F
where
    F: Fn(&ConditionContext<'_>) -> Result<bool, ResolveError> + Send + Sync,
{
    fn should_include(&self, ctx: &ConditionContext<'_>) -> Result<bool, ResolveError> {
        self(ctx)
    }
}

/// Evaluator that keeps every inclusion, ignoring conditions.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysInclude;

impl ProcessIf for AlwaysInclude {
    fn should_include(&self, _ctx: &ConditionContext<'_>) -> Result<bool, ResolveError> {
        Ok(true)
    }
}

/// Built-in evaluator for the expression language described in the module
/// docs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpressionCondition;

impl ProcessIf for ExpressionCondition {
    fn should_include(&self, ctx: &ConditionContext<'_>) -> Result<bool, ResolveError> {
        evaluate(ctx.condition, &ctx.settings.options)
    }
}

/// Evaluate `expression` against `options` and coerce the result to a bool.
pub fn evaluate(expression: &str, options: &Options) -> Result<bool, ResolveError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        expression,
        tokens: &tokens,
        pos: 0,
        depth: 0,
        options,
    };
    let value = parser.or()?;
    if let Some(token) = parser.peek() {
        return Err(ResolveError::condition(
            expression,
            format!("unexpected {token:?}"),
        ));
    }
    Ok(value.truthy())
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Str(String),
    Not,
    Eq,
    NotEq,
    And,
    Or,
    LParen,
    RParen,
    Dot,
    LBracket,
    RBracket,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ResolveError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' | ')' | '.' | '[' | ']' => {
                chars.next();
                tokens.push(match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '.' => Token::Dot,
                    '[' => Token::LBracket,
                    _ => Token::RBracket,
                });
            }
            '!' | '=' => {
                chars.next();
                let followed_by_eq = chars.next_if(|&(_, n)| n == '=').is_some();
                if followed_by_eq {
                    // Accept `===` / `!==` as well.
                    chars.next_if(|&(_, n)| n == '=');
                    tokens.push(if c == '!' { Token::NotEq } else { Token::Eq });
                } else if c == '!' {
                    tokens.push(Token::Not);
                } else {
                    return Err(ResolveError::condition(expression, "assignment is not allowed"));
                }
            }
            '&' | '|' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == c).is_none() {
                    return Err(ResolveError::condition(
                        expression,
                        format!("expected `{c}{c}`"),
                    ));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            '"' | '\'' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, n)) = chars.next() {
                    if n == c {
                        closed = true;
                        break;
                    }
                    if n == '\\' {
                        if let Some((_, escaped)) = chars.next() {
                            value.push(escaped);
                        }
                        continue;
                    }
                    value.push(n);
                }
                if !closed {
                    return Err(ResolveError::condition(expression, "unterminated string"));
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut end = start + c.len_utf8();
                chars.next();
                while let Some((i, n)) = chars.next_if(|&(_, n)| n.is_ascii_digit() || n == '.') {
                    end = i + n.len_utf8();
                }
                let literal = &expression[start..end];
                let number = literal.parse::<f64>().map_err(|_| {
                    ResolveError::condition(expression, format!("invalid number `{literal}`"))
                })?;
                tokens.push(Token::Number(number));
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut end = start;
                while let Some((i, n)) =
                    chars.next_if(|&(_, n)| n.is_alphanumeric() || n == '_' || n == '$' || n == '-')
                {
                    end = i + n.len_utf8();
                }
                tokens.push(Token::Ident(expression[start..end].to_owned()));
            }
            other => {
                return Err(ResolveError::condition(
                    expression,
                    format!("unexpected character `{other}`"),
                ));
            }
        }
    }

    Ok(tokens)
}

#[derive(Clone, Debug, PartialEq)]
enum Operand {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<String>),
}

impl Operand {
    fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }
}

impl From<SettingValue> for Operand {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Bool(b) => Self::Bool(b),
            SettingValue::Number(n) => Self::Number(n),
            SettingValue::String(s) => Self::Str(s),
            SettingValue::List(items) => Self::List(items),
        }
    }
}

struct Parser<'a> {
    expression: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    options: &'a Options,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> ResolveError {
        ResolveError::condition(self.expression, message)
    }

    fn or(&mut self) -> Result<Operand, ResolveError> {
        let mut value = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            if !value.truthy() {
                value = rhs;
            }
        }
        Ok(value)
    }

    fn and(&mut self) -> Result<Operand, ResolveError> {
        let mut value = self.equality()?;
        while self.eat(&Token::And) {
            let rhs = self.equality()?;
            if value.truthy() {
                value = rhs;
            }
        }
        Ok(value)
    }

    fn equality(&mut self) -> Result<Operand, ResolveError> {
        let mut value = self.unary()?;
        loop {
            let negate = if self.eat(&Token::Eq) {
                false
            } else if self.eat(&Token::NotEq) {
                true
            } else {
                return Ok(value);
            };
            let rhs = self.unary()?;
            value = Operand::Bool((value == rhs) != negate);
        }
    }

    fn unary(&mut self) -> Result<Operand, ResolveError> {
        let mut negations = 0_usize;
        while self.eat(&Token::Not) {
            negations += 1;
        }
        let value = self.primary()?;
        if negations == 0 {
            return Ok(value);
        }
        Ok(Operand::Bool(value.truthy() == negations.is_multiple_of(2)))
    }

    fn primary(&mut self) -> Result<Operand, ResolveError> {
        let Some(token) = self.advance().cloned() else {
            return Err(self.error("unexpected end of expression"));
        };
        match token {
            Token::Number(n) => Ok(Operand::Number(n)),
            Token::Str(s) => Ok(Operand::Str(s)),
            Token::LParen => {
                if self.depth == MAX_DEPTH {
                    return Err(self.error("expression nested too deeply"));
                }
                self.depth += 1;
                let value = self.or()?;
                self.depth -= 1;
                if !self.eat(&Token::RParen) {
                    return Err(self.error("expected `)`"));
                }
                Ok(value)
            }
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Operand::Bool(true)),
                "false" => Ok(Operand::Bool(false)),
                "null" | "undefined" => Ok(Operand::Null),
                "config" => self.lookup(),
                other => Err(self.error(format!("unknown name `{other}`"))),
            },
            other => Err(self.error(format!("unexpected {other:?}"))),
        }
    }

    /// Resolve `config.key` / `config["key"]`. A bare `config` is truthy.
    fn lookup(&mut self) -> Result<Operand, ResolveError> {
        let key = if self.eat(&Token::Dot) {
            match self.advance().cloned() {
                Some(Token::Ident(key)) => key,
                _ => return Err(self.error("expected option name after `.`")),
            }
        } else if self.eat(&Token::LBracket) {
            let key = match self.advance().cloned() {
                Some(Token::Str(key)) => key,
                _ => return Err(self.error("expected quoted option name after `[`")),
            };
            if !self.eat(&Token::RBracket) {
                return Err(self.error("expected `]`"));
            }
            key
        } else {
            return Ok(Operand::Bool(true));
        };

        if matches!(self.peek(), Some(Token::Dot | Token::LBracket)) {
            return Err(self.error("nested option lookups are not supported"));
        }

        Ok(self.options.get(&key).map_or(Operand::Null, Operand::from))
    }
}

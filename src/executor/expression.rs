//! Arithmetic expression executor
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr     := term (('+' | '-') term)*
//! term     := unary (('*' | '/' | '%') unary)*
//! unary    := prefixed | power
//! prefixed := ('+' | '-') prefixed | primary
//! power    := primary ('**' unary)?
//! primary  := number | '(' expr ')'
//! ```
//!
//! As in JavaScript, a sign cannot sit directly in front of `**`:
//! `-2**2` is a syntax error, `(-2)**2` and `-(2**2)` are not.
//!
//! Arithmetic is IEEE-754 double precision, and results print the way a
//! JavaScript host prints numbers (`2`, `0.5`, `NaN`, `Infinity`).

use super::{check_length, CommandExecutor, ExecError};

/// Parentheses deeper than this are rejected instead of recursing further
const MAX_DEPTH: usize = 64;

/// Evaluates arithmetic expressions such as `1+1` or `(2**10 - 24) / 1000`
#[derive(Debug, Clone)]
pub struct ExpressionExecutor {
    max_length: usize,
}

impl ExpressionExecutor {
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl CommandExecutor for ExpressionExecutor {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn execute(&self, command: &str) -> Result<String, ExecError> {
        check_length(command, self.max_length)?;
        evaluate(command).map(format_number)
    }
}

/// Evaluate an expression to a number
pub fn evaluate(input: &str) -> Result<f64, ExecError> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.error(format!("unexpected character '{}'", char::from(c)))),
    }
}

/// Render a number the way JavaScript's `String(n)` does for common values
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0
        return "0".to_string();
    }
    if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let s = format!("{value:e}");
        return match s.find('e') {
            Some(i) if !s[i + 1..].starts_with('-') => format!("{}e+{}", &s[..i], &s[i + 1..]),
            _ => s,
        };
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn expr(&mut self) -> Result<f64, ExecError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExecError> {
        let mut value = self.unary()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'*') if self.peek_at(1) != Some(b'*') => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                Some(b'%') => {
                    self.pos += 1;
                    value %= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExecError> {
        self.skip_whitespace();
        if !matches!(self.peek(), Some(b'-' | b'+')) {
            return self.power();
        }
        let value = self.prefixed()?;
        self.skip_whitespace();
        if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'*') {
            return Err(self.error("unary operator before '**' needs parentheses".to_string()));
        }
        Ok(value)
    }

    fn prefixed(&mut self) -> Result<f64, ExecError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                self.nested(|p| p.prefixed().map(|v| -v))
            }
            Some(b'+') => {
                self.pos += 1;
                self.nested(Self::prefixed)
            }
            _ => self.primary(),
        }
    }

    fn power(&mut self) -> Result<f64, ExecError> {
        let base = self.primary()?;
        self.skip_whitespace();
        if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'*') {
            self.pos += 2;
            let exponent = self.nested(Self::unary)?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, ExecError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.nested(Self::expr)?;
                self.skip_whitespace();
                if self.peek() != Some(b')') {
                    return Err(self.error("expected ')'".to_string()));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", char::from(c)))),
            None => Err(self.error("unexpected end of input".to_string())),
        }
    }

    fn number(&mut self) -> Result<f64, ExecError> {
        let start = self.pos;
        self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos = mark;
                return Err(self.error("malformed exponent".to_string()));
            }
            self.eat_digits();
        }

        // The slice is ASCII by construction
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        text.parse::<f64>().map_err(|_| ExecError::Syntax {
            offset: start,
            message: format!("invalid number '{text}'"),
        })
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<f64, ExecError>,
    ) -> Result<f64, ExecError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos + ahead).copied()
    }

    fn error(&self, message: String) -> ExecError {
        ExecError::Syntax {
            offset: self.pos,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        ExpressionExecutor::new(1024).execute(input).unwrap()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(run("1+1"), "2");
        assert_eq!(run("2 * 3 + 4"), "10");
        assert_eq!(run("2 * (3 + 4)"), "14");
        assert_eq!(run("10 - 4 - 3"), "3");
        assert_eq!(run("7 % 3"), "1");
        assert_eq!(run("1/2"), "0.5");
    }

    #[test]
    fn test_power_and_unary() {
        assert_eq!(run("2**10"), "1024");
        assert_eq!(run("2**3**2"), "512");
        assert_eq!(run("-3 + 5"), "2");
        assert_eq!(run("--4"), "4");
        assert_eq!(run("2**-1"), "0.5");
        assert_eq!(run("(-2)**2"), "4");
        assert_eq!(run("-(2**2)"), "-4");
    }

    #[test]
    fn test_sign_before_power_is_rejected() {
        let exec = ExpressionExecutor::new(1024);
        assert_eq!(
            exec.execute("-2**2"),
            Err(ExecError::Syntax {
                offset: 2,
                message: "unary operator before '**' needs parentheses".to_string()
            })
        );
        assert!(matches!(exec.execute("2**-1**2"), Err(ExecError::Syntax { .. })));
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(run(".5 + .5"), "1");
        assert_eq!(run("1e3"), "1000");
        assert_eq!(run("2.5E-1"), "0.25");
    }

    #[test]
    fn test_js_style_formatting() {
        assert_eq!(run("0.1 + 0.2"), "0.30000000000000004");
        assert_eq!(run("1/0"), "Infinity");
        assert_eq!(run("-1/0"), "-Infinity");
        assert_eq!(run("0/0"), "NaN");
        assert_eq!(run("-0"), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(123_456_789_012.0), "123456789012");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(run("1e-7"), "1e-7");
    }

    #[test]
    fn test_syntax_errors() {
        let exec = ExpressionExecutor::new(1024);
        assert!(matches!(exec.execute(""), Err(ExecError::Syntax { .. })));
        assert!(matches!(exec.execute("1 +"), Err(ExecError::Syntax { .. })));
        assert!(matches!(exec.execute("(1 + 2"), Err(ExecError::Syntax { .. })));
        assert!(matches!(exec.execute("1e"), Err(ExecError::Syntax { .. })));
        assert_eq!(
            exec.execute("1 + x"),
            Err(ExecError::Syntax {
                offset: 4,
                message: "unexpected character 'x'".to_string()
            })
        );
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let input = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let result = ExpressionExecutor::new(4096).execute(&input);
        assert!(matches!(result, Err(ExecError::Syntax { .. })));
    }

    #[test]
    fn test_length_limit() {
        let exec = ExpressionExecutor::new(3);
        assert_eq!(exec.execute("1+1"), Ok("2".to_string()));
        assert_eq!(
            exec.execute("1 + 1"),
            Err(ExecError::TooLong { len: 5, max: 3 })
        );
    }
}

//! Counter formatting for enumerate operations
//!
//! Supports the familiar subset of .NET numeric format strings:
//! `D4`-style zero-padded decimals, `X`/`x` hexadecimal, and custom patterns
//! built from `0` (required digit) and `#` (optional digit) placeholders with
//! literal text, `\` escapes and quoted literals.
//!
//! Counters are integers, so `.`, `,` and `%` have no special meaning in
//! custom patterns and are copied as literals: `"v0.0"` formats 12 as
//! `"v1.2"`, where .NET would read `.` as the decimal point and give `"v12.0"`.

/// Upper bound on the precision of `D`/`X` formats
const MAX_PRECISION: usize = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberFormat {
    /// Plain decimal
    General,
    /// Decimal zero-padded to a minimum number of digits
    Decimal { min_digits: usize },
    /// Hexadecimal zero-padded to a minimum number of digits
    Hex { min_digits: usize, uppercase: bool },
    /// Placeholder pattern with literal text
    Custom(Vec<FormatToken>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    Literal(String),
    /// `0`: always produces a digit, padding with zero
    Required,
    /// `#`: produces a digit only when the value has one there
    Optional,
}

impl NumberFormat {
    pub fn parse(format: &str) -> Result<Self, String> {
        if format.is_empty() {
            return Ok(NumberFormat::General);
        }

        let mut chars = format.chars();
        if let Some(specifier) = chars.next().filter(|c| c.is_ascii_alphabetic()) {
            let precision = chars.as_str();
            if precision.chars().all(|c| c.is_ascii_digit()) {
                return Self::parse_standard(specifier, precision, format);
            }
        }

        Self::parse_custom(format)
    }

    fn parse_standard(specifier: char, precision: &str, format: &str) -> Result<Self, String> {
        let min_digits = if precision.is_empty() {
            0
        } else {
            precision
                .parse::<usize>()
                .ok()
                .filter(|p| *p <= MAX_PRECISION)
                .ok_or_else(|| format!("Precision out of range in format '{}'", format))?
        };

        match specifier {
            'D' | 'd' => Ok(NumberFormat::Decimal { min_digits }),
            'X' => Ok(NumberFormat::Hex {
                min_digits,
                uppercase: true,
            }),
            'x' => Ok(NumberFormat::Hex {
                min_digits,
                uppercase: false,
            }),
            _ => Err(format!("Unsupported format specifier '{}'", format)),
        }
    }

    fn parse_custom(format: &str) -> Result<Self, String> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '0' | '#' => {
                    if !literal.is_empty() {
                        tokens.push(FormatToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(if ch == '0' {
                        FormatToken::Required
                    } else {
                        FormatToken::Optional
                    });
                }
                '\\' => match chars.next() {
                    Some(escaped) => literal.push(escaped),
                    None => return Err(format!("Trailing escape in format '{}'", format)),
                },
                '\'' | '"' => {
                    let mut closed = false;
                    for quoted in chars.by_ref() {
                        if quoted == ch {
                            closed = true;
                            break;
                        }
                        literal.push(quoted);
                    }
                    if !closed {
                        return Err(format!("Unterminated quote in format '{}'", format));
                    }
                }
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            tokens.push(FormatToken::Literal(literal));
        }

        Ok(NumberFormat::Custom(tokens))
    }

    pub fn format(&self, value: i64) -> String {
        let sign = if value < 0 { "-" } else { "" };
        let magnitude = value.unsigned_abs();

        match self {
            NumberFormat::General => value.to_string(),
            NumberFormat::Decimal { min_digits } => {
                format!("{}{:0width$}", sign, magnitude, width = *min_digits)
            }
            NumberFormat::Hex {
                min_digits,
                uppercase,
            } => {
                // Negative values print as two's complement, like the .NET formatter
                if *uppercase {
                    format!("{:0width$X}", value, width = *min_digits)
                } else {
                    format!("{:0width$x}", value, width = *min_digits)
                }
            }
            NumberFormat::Custom(tokens) => format_custom(tokens, sign, magnitude),
        }
    }
}

fn format_custom(tokens: &[FormatToken], sign: &str, magnitude: u64) -> String {
    let placeholders = tokens
        .iter()
        .filter(|t| !matches!(t, FormatToken::Literal(_)))
        .count();

    if placeholders == 0 {
        return tokens
            .iter()
            .map(|t| match t {
                FormatToken::Literal(text) => text.as_str(),
                _ => "",
            })
            .collect();
    }

    // Zero has no significant digits, so only `0` placeholders print it
    let digits: Vec<char> = if magnitude == 0 {
        Vec::new()
    } else {
        magnitude.to_string().chars().collect()
    };

    let mut remaining = digits.len();
    let mut seen = 0;
    let mut pieces = Vec::with_capacity(tokens.len());

    for token in tokens.iter().rev() {
        match token {
            FormatToken::Literal(text) => pieces.push(text.clone()),
            FormatToken::Required | FormatToken::Optional => {
                seen += 1;
                let piece = if seen == placeholders {
                    // Leftmost placeholder absorbs every remaining high digit
                    let high: String = digits[..remaining].iter().collect();
                    remaining = 0;
                    high
                } else if remaining > 0 {
                    remaining -= 1;
                    digits[remaining].to_string()
                } else {
                    String::new()
                };

                if piece.is_empty() && *token == FormatToken::Required {
                    pieces.push("0".to_string());
                } else {
                    pieces.push(piece);
                }
            }
        }
    }

    pieces.reverse();
    format!("{}{}", sign, pieces.concat())
}

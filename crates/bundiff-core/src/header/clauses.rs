//! Clause/parameter grammar for structured header values.
//!
//! ```text
//! header    ::= clause ( ',' clause )*
//! clause    ::= key ( ';' key )* ( ';' parameter )*
//! parameter ::= name '=' value          attribute, or typed `name:Type=value`
//!             | name ':=' value         directive, stored under `name:`
//! ```
//!
//! Keys, names and values may be quoted with `"` or `'` to contain
//! separators. A quote closes on the same character, quotes are removed and
//! `\` escapes the next character inside them. A clause with several keys
//! expands into one clause per key sharing the parameters.
//! Repeated keys are kept apart by appending `~`.

/// One parsed clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub key: String,
    /// Parameters in declaration order. A repeated name keeps its first
    /// position and takes the last value.
    pub parameters: Vec<(String, String)>,
}

struct Scanner<'a> {
    rest: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.rest.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn next(&mut self) -> Option<char> {
        self.rest.next()
    }

    /// Read one (possibly quoted) token up to, not including, a stop char.
    fn token(&mut self, stops: &[char]) -> Result<String, String> {
        self.skip_whitespace();
        if let Some(quote) = self.rest.next_if(|c| *c == '"' || *c == '\'') {
            let mut out = String::new();
            loop {
                match self.rest.next() {
                    Some(c) if c == quote => break,
                    Some('\\') => match self.rest.next() {
                        Some(c) => out.push(c),
                        None => return Err("unterminated quoted string".to_string()),
                    },
                    Some(c) => out.push(c),
                    None => return Err("unterminated quoted string".to_string()),
                }
            }
            self.skip_whitespace();
            return Ok(out);
        }

        let mut out = String::new();
        while let Some(c) = self.rest.next_if(|c| !stops.contains(c)) {
            out.push(c);
        }
        Ok(out.trim_end().to_string())
    }
}

fn put(parameters: &mut Vec<(String, String)>, name: String, value: String) {
    match parameters.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = value,
        None => parameters.push((name, value)),
    }
}

/// Parse a structured header value.
///
/// An empty or blank value yields no clauses.
///
/// # Errors
///
/// Returns a description of the first grammar violation: an unterminated
/// quote, an empty key or parameter name, a key following parameters, or
/// trailing characters after a quoted token.
pub fn parse_clauses(value: &str) -> Result<Vec<Clause>, String> {
    let mut clauses: Vec<Clause> = Vec::new();
    if value.trim().is_empty() {
        return Ok(clauses);
    }

    let mut scanner = Scanner::new(value);
    loop {
        let mut keys: Vec<String> = Vec::new();
        let mut parameters: Vec<(String, String)> = Vec::new();

        let end_of_input = loop {
            let name = scanner.token(&[';', ',', '='])?;
            let delimiter = match scanner.next() {
                Some('=') => {
                    if name.is_empty() {
                        return Err("parameter without a name".to_string());
                    }
                    let value = scanner.token(&[';', ','])?;
                    put(&mut parameters, name, value);
                    scanner.next()
                }
                other => {
                    if name.is_empty() {
                        return Err("empty clause key".to_string());
                    }
                    if !parameters.is_empty() {
                        return Err(format!("key {:?} follows parameters", name));
                    }
                    keys.push(name);
                    other
                }
            };
            match delimiter {
                Some(';') => continue,
                Some(',') => break false,
                None => break true,
                Some(c) => return Err(format!("unexpected character {:?}", c)),
            }
        };

        if keys.is_empty() {
            return Err("clause without a key".to_string());
        }
        for key in keys {
            let mut key = key;
            while clauses.iter().any(|c| c.key == key) {
                key.push('~');
            }
            clauses.push(Clause {
                key,
                parameters: parameters.clone(),
            });
        }

        if end_of_input {
            return Ok(clauses);
        }
    }
}

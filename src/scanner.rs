//! Lexical scanner for Java sources.
//!
//! Finds package, type and method declarations in document order and pairs
//! each with the `/** ... */` block right before it. There is no grammar:
//! the scanner collects the tokens between `;`, `{` and `}` boundaries (the
//! declaration header) and classifies the header when a boundary is reached.
//! A scope stack tracks braces. Type bodies are examined, everything else
//! (method bodies, initializers, anonymous classes) is skipped.

use std::collections::HashMap;

use crate::error::ScanError;
use crate::location::Location;

/// One recognized declaration and its raw documentation block, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub location: Location,
    pub doc: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub declarations: Vec<Declaration>,
    /// Set when scanning stopped early. Declarations found before that point are kept.
    pub abandoned: Option<ScanError>,
}

pub fn scan(source: &str) -> ScanOutcome {
    let mut scanner = Scanner::new(source);
    let abandoned = scanner.run().err();
    ScanOutcome {
        declarations: scanner.declarations,
        abandoned,
    }
}

// -- Lexer --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Doc(String),
    Word(String),
    Literal,
    Symbol(char),
}

struct Spanned {
    token: Token,
    line: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, ScanError> {
        loop {
            let Some(c) = self.peek(0) else {
                return Ok(None);
            };
            let line = self.line;

            let token = match c {
                c if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                '/' if self.peek(1) == Some('/') => {
                    self.skip_line();
                    continue;
                }
                '/' if self.peek(1) == Some('*') => {
                    let is_doc = self.peek(2) == Some('*') && self.peek(3) != Some('/');
                    let text = self.block_comment(line)?;
                    if !is_doc {
                        continue;
                    }
                    Token::Doc(text)
                }
                '"' => {
                    self.string_literal(line)?;
                    Token::Literal
                }
                '\'' => {
                    self.char_literal(line)?;
                    Token::Literal
                }
                c if is_ident_start(c) => Token::Word(self.word()),
                c if c.is_ascii_digit() => {
                    while self
                        .peek(0)
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                    {
                        self.bump();
                    }
                    Token::Literal
                }
                c => {
                    self.bump();
                    Token::Symbol(c)
                }
            };
            return Ok(Some(Spanned { token, line }));
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self, line: usize) -> Result<String, ScanError> {
        let start = self.pos;
        self.pos += 2;
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.pos += 2;
                    break;
                }
                (Some(_), _) => {
                    self.bump();
                }
                (None, _) => {
                    return Err(ScanError::Unterminated {
                        what: "comment",
                        line,
                    });
                }
            }
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn string_literal(&mut self, line: usize) -> Result<(), ScanError> {
        if self.peek(1) == Some('"') && self.peek(2) == Some('"') {
            self.pos += 3;
            loop {
                match self.peek(0) {
                    None => {
                        return Err(ScanError::Unterminated {
                            what: "text block",
                            line,
                        });
                    }
                    Some('\\') => {
                        self.bump();
                        self.bump();
                    }
                    Some('"') if self.peek(1) == Some('"') && self.peek(2) == Some('"') => {
                        self.pos += 3;
                        return Ok(());
                    }
                    Some(_) => {
                        self.bump();
                    }
                }
            }
        }
        self.quoted('"', "string literal", line)
    }

    fn char_literal(&mut self, line: usize) -> Result<(), ScanError> {
        self.quoted('\'', "character literal", line)
    }

    fn quoted(&mut self, quote: char, what: &'static str, line: usize) -> Result<(), ScanError> {
        self.bump();
        loop {
            match self.peek(0) {
                None | Some('\n') => return Err(ScanError::Unterminated { what, line }),
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// An identifier, with following `.segment`s folded into one qualified name.
    fn word(&mut self) -> String {
        let mut word = String::new();
        loop {
            while let Some(c) = self.peek(0).filter(|c| is_ident_part(*c)) {
                word.push(c);
                self.pos += 1;
            }
            if self.peek(0) == Some('.') && self.peek(1).is_some_and(is_ident_start) {
                word.push('.');
                self.pos += 1;
                continue;
            }
            return word;
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

// -- Declarations -------------------------------------------------------------

const TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record"];

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
];

const NOT_METHOD_NAMES: &[&str] = &[
    "if", "for", "while", "switch", "catch", "synchronized", "return", "new", "throw", "else",
    "try", "do", "super", "this", "assert",
];

enum Scope {
    Type(String),
    Opaque,
}

struct Scanner {
    lexer: Lexer,
    scopes: Vec<Scope>,
    header: Vec<Token>,
    header_line: usize,
    header_doc: Option<String>,
    paren_depth: usize,
    package: Option<String>,
    imports: HashMap<String, String>,
    declarations: Vec<Declaration>,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            scopes: Vec::new(),
            header: Vec::new(),
            header_line: 1,
            header_doc: None,
            paren_depth: 0,
            package: None,
            imports: HashMap::new(),
            declarations: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), ScanError> {
        while let Some(Spanned { token, line }) = self.lexer.next_token()? {
            if matches!(self.scopes.last(), Some(Scope::Opaque)) {
                match token {
                    Token::Symbol('{') => self.scopes.push(Scope::Opaque),
                    Token::Symbol('}') => {
                        self.scopes.pop();
                    }
                    _ => {}
                }
                continue;
            }

            match token {
                Token::Symbol('(') => {
                    self.paren_depth += 1;
                    self.push_header(token, line);
                }
                Token::Symbol(')') => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    self.push_header(token, line);
                }
                // Array-valued annotation arguments and lambda arguments.
                Token::Symbol('{' | '}' | ';') if self.paren_depth > 0 => {
                    self.push_header(token, line);
                }
                Token::Doc(text) => {
                    if is_annotations_only(&self.header) {
                        self.header_doc = Some(text);
                    }
                }
                Token::Symbol('{') => self.open_block(),
                Token::Symbol(';') => self.end_statement(),
                Token::Symbol('}') => {
                    if self.scopes.pop().is_none() {
                        return Err(ScanError::UnbalancedBrace { line });
                    }
                    self.header.clear();
                    self.header_doc = None;
                }
                other => self.push_header(other, line),
            }
        }

        if !self.scopes.is_empty() {
            return Err(ScanError::UnclosedBraces {
                open: self.scopes.len(),
            });
        }
        Ok(())
    }

    fn push_header(&mut self, token: Token, line: usize) {
        if self.header.is_empty() {
            self.header_line = line;
        }
        self.header.push(token);
    }

    fn enclosing_type(&self) -> Option<String> {
        match self.scopes.last() {
            Some(Scope::Type(name)) => Some(name.clone()),
            _ => None,
        }
    }

    fn package_name(&self) -> String {
        self.package.clone().unwrap_or_default()
    }

    fn declare(&mut self, location: Location, doc: Option<String>) {
        self.declarations.push(Declaration {
            location,
            doc,
            line: self.header_line,
        });
    }

    fn open_block(&mut self) {
        let header = std::mem::take(&mut self.header);
        let doc = self.header_doc.take();
        let tokens = strip_annotations(&header);
        let enclosing = self.enclosing_type();

        if let Some(name) = type_name(&tokens) {
            let qualified = match enclosing {
                Some(outer) => format!("{outer}.{name}"),
                None => name,
            };
            self.declare(Location::class(self.package_name(), qualified.clone()), doc);
            self.scopes.push(Scope::Type(qualified));
            return;
        }

        if let Some(class_name) = enclosing
            && let Some((method_name, parameters)) = method_signature(&tokens, &self.imports)
        {
            let location =
                Location::method(self.package_name(), class_name, method_name, parameters);
            self.declare(location, doc);
        }
        self.scopes.push(Scope::Opaque);
    }

    fn end_statement(&mut self) {
        let header = std::mem::take(&mut self.header);
        let doc = self.header_doc.take();
        let tokens = strip_annotations(&header);

        match self.enclosing_type() {
            Some(class_name) => {
                if let Some((method_name, parameters)) = method_signature(&tokens, &self.imports)
                {
                    let location =
                        Location::method(self.package_name(), class_name, method_name, parameters);
                    self.declare(location, doc);
                }
            }
            None => self.top_level_statement(&tokens, doc),
        }
    }

    fn top_level_statement(&mut self, tokens: &[Token], doc: Option<String>) {
        match tokens {
            [Token::Word(keyword), Token::Word(name)] if keyword == "package" => {
                let types_seen = self
                    .declarations
                    .iter()
                    .any(|d| !matches!(d.location, Location::Package { .. }));
                if self.package.is_none() && !types_seen {
                    self.package = Some(name.clone());
                    self.declare(Location::package(name.clone()), doc);
                }
            }
            [Token::Word(keyword), Token::Word(name)] if keyword == "import" => {
                let simple = name.rsplit('.').next().unwrap_or(name);
                self.imports.insert(simple.to_string(), name.clone());
            }
            _ => {}
        }
    }
}

// -- Header classification ----------------------------------------------------

fn is_word(token: &Token, text: &str) -> bool {
    matches!(token, Token::Word(w) if w == text)
}

/// Index just past the `)` that closes the `(` at `open`.
fn skip_balanced(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Symbol('(') => depth += 1,
            Token::Symbol(')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// `@Name` or `@Name(...)` at `i`, returning the index after it.
fn annotation_end(tokens: &[Token], i: usize) -> Option<usize> {
    if tokens.get(i) != Some(&Token::Symbol('@')) {
        return None;
    }
    match tokens.get(i + 1) {
        Some(Token::Word(w)) if w != "interface" => {}
        _ => return None,
    }
    if tokens.get(i + 2) == Some(&Token::Symbol('(')) {
        return Some(skip_balanced(tokens, i + 2).unwrap_or(tokens.len()));
    }
    Some(i + 2)
}

fn is_annotations_only(tokens: &[Token]) -> bool {
    let mut i = 0;
    while i < tokens.len() {
        match annotation_end(tokens, i) {
            Some(next) => i = next,
            None => return false,
        }
    }
    true
}

fn strip_annotations(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some(next) = annotation_end(tokens, i) {
            i = next;
            continue;
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

/// Name of the type declared by this header, if it declares one.
fn type_name(tokens: &[Token]) -> Option<String> {
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Symbol('=' | '(') => return None,
            Token::Word(w) if w == "new" => return None,
            Token::Word(w) if TYPE_KEYWORDS.contains(&w.as_str()) => {
                let Some(Token::Word(name)) = tokens.get(i + 1) else {
                    continue;
                };
                if name.contains('.') {
                    return None;
                }
                if w == "record" && !record_has_components(tokens, i + 2) {
                    continue;
                }
                return Some(name.clone());
            }
            _ => {}
        }
    }
    None
}

fn record_has_components(tokens: &[Token], mut i: usize) -> bool {
    if tokens.get(i) == Some(&Token::Symbol('<')) {
        let mut depth = 0usize;
        while let Some(token) = tokens.get(i) {
            match token {
                Token::Symbol('<') => depth += 1,
                Token::Symbol('>') => {
                    depth -= 1;
                    if depth == 0 {
                        i += 1;
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }
    tokens.get(i) == Some(&Token::Symbol('('))
}

/// Method name and rendered parameter list, or `None` when the header is not
/// a method (constructors, fields, enum constants, initializers).
fn method_signature(
    tokens: &[Token],
    imports: &HashMap<String, String>,
) -> Option<(String, String)> {
    let open = tokens.iter().position(|t| *t == Token::Symbol('('))?;
    let Token::Word(name) = tokens.get(open.checked_sub(1)?)? else {
        return None;
    };
    if name.contains('.') || NOT_METHOD_NAMES.contains(&name.as_str()) {
        return None;
    }

    let prefix: Vec<&Token> = tokens[..open - 1]
        .iter()
        .filter(|t| !matches!(t, Token::Word(w) if MODIFIERS.contains(&w.as_str())))
        .collect();
    let return_type = skip_type_parameters(&prefix);
    if return_type.is_empty() || !is_type_text(return_type) {
        return None;
    }

    let close = skip_balanced(tokens, open)? - 1;
    let trailer = &tokens[close + 1..];
    if !is_annotation_default(trailer)
        && trailer
            .iter()
            .any(|t| matches!(t, Token::Symbol('=' | '-' | '(')))
    {
        return None;
    }

    let parameters = parameter_types(&tokens[open + 1..close], imports);
    Some((name.clone(), format!("({})", parameters.join(","))))
}

/// `default <value>` after an annotation element's parameter list.
fn is_annotation_default(trailer: &[Token]) -> bool {
    trailer.first().is_some_and(|t| is_word(t, "default"))
}

/// Drops a leading generic method type parameter list (`<T extends X>`).
fn skip_type_parameters<'a>(prefix: &'a [&'a Token]) -> &'a [&'a Token] {
    if prefix.first() != Some(&&Token::Symbol('<')) {
        return prefix;
    }
    let mut depth = 0usize;
    for (i, token) in prefix.iter().enumerate() {
        match token {
            Token::Symbol('<') => depth += 1,
            Token::Symbol('>') => {
                depth -= 1;
                if depth == 0 {
                    return &prefix[i + 1..];
                }
            }
            _ => {}
        }
    }
    prefix
}

/// Tokens that can only spell a type: words and generic/array punctuation,
/// with no top-level comma.
fn is_type_text(tokens: &[&Token]) -> bool {
    let mut angle = 0i32;
    for token in tokens {
        match token {
            Token::Word(w) if w == "new" => return false,
            Token::Word(_) => {}
            Token::Symbol('<') => angle += 1,
            Token::Symbol('>') => angle -= 1,
            Token::Symbol(',') if angle <= 0 => return false,
            Token::Symbol(',' | '?' | '[' | ']' | '.' | '&') => {}
            _ => return false,
        }
    }
    true
}

fn parameter_types(tokens: &[Token], imports: &HashMap<String, String>) -> Vec<String> {
    let mut params: Vec<&[Token]> = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Symbol('<' | '(') => depth += 1,
            Token::Symbol('>' | ')') => depth -= 1,
            Token::Symbol(',') if depth == 0 => {
                params.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&tokens[start..]);

    params
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| parameter_type(p, imports))
        .collect()
}

fn parameter_type(param: &[Token], imports: &HashMap<String, String>) -> String {
    let tokens: Vec<Token> = strip_annotations(param)
        .into_iter()
        .filter(|t| !is_word(t, "final"))
        .collect();

    let Some(name_at) = tokens.iter().rposition(|t| matches!(t, Token::Word(_))) else {
        return join_type(&tokens, imports);
    };
    if name_at == 0 {
        return join_type(&tokens, imports);
    }
    // `int values[]` declares an `int[]`.
    let mut rendered = join_type(&tokens[..name_at], imports);
    rendered.push_str(&join_type(&tokens[name_at + 1..], imports));
    rendered
}

/// Re-joins type tokens, spacing only between adjacent words.
fn join_type(tokens: &[Token], imports: &HashMap<String, String>) -> String {
    let mut out = String::new();
    let mut prev_wordish = false;
    for token in tokens {
        let (text, wordish) = match token {
            Token::Word(w) => (qualify(w, imports), true),
            Token::Symbol('?') => ("?".to_string(), true),
            Token::Symbol(c) => (c.to_string(), false),
            Token::Literal | Token::Doc(_) => continue,
        };
        if prev_wordish && wordish {
            out.push(' ');
        }
        out.push_str(&text);
        prev_wordish = wordish;
    }
    out
}

/// Replaces an imported simple name with its qualified import.
fn qualify(word: &str, imports: &HashMap<String, String>) -> String {
    let (first, rest) = match word.find('.') {
        Some(dot) => (&word[..dot], &word[dot..]),
        None => (word, ""),
    };
    match imports.get(first) {
        Some(qualified) => format!("{qualified}{rest}"),
        None => word.to_string(),
    }
}

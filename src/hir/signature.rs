//! Type signatures: lexing, parsing and resolution against a graph.
//!
//! Accepted grammar (resolved signatures only):
//!
//! ```text
//! type     := base | '[' type | class | 'T' ident ';'
//! base     := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' | 'V'
//! class    := 'L' name ('<' argument+ '>')? ';'
//! argument := '*' | '+' type | '-' type | type
//! ```
//!
//! Package separators may be written as `/` or `.`; nested types use `$`.

use logos::Logos;
use thiserror::Error;
use tracing::trace;

use super::bindings::{PrimitiveKind, TypeArgument, TypeOrigin};
use super::graph::BindingGraph;
use super::ids::TypeId;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed type signature `{signature}` at offset {offset}")]
    Malformed { signature: String, offset: usize },

    #[error("invalid identifier `{0}` in type signature")]
    InvalidIdentifier(String),

    #[error("unresolved type `{0}`")]
    Unresolved(String),

    /// The lookup hit a type that is referenced but not available.
    #[error("lookup aborted on missing type `{0}`")]
    Aborted(String),

    #[error("no enclosing class to resolve a signature in")]
    NoEnclosingClass,
}

// ============================================================================
// LEXER
// ============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SigToken {
    #[regex(r"[BCDFIJSZV]")]
    Base,

    #[token("[")]
    Array,

    /// `L` plus the class name, up to `;` or `<`.
    #[regex(r"L[^;<>\[\]*+\-]+")]
    Class,

    /// `T`, the variable name and the terminating `;`.
    #[regex(r"T[^;<>\[\]*+\-]+;")]
    Variable,

    #[token("<")]
    Open,

    #[token(">")]
    Close,

    #[token(";")]
    Semi,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: SigToken,
    text: &'a str,
    offset: usize,
}

fn tokenize(signature: &str) -> Result<Vec<Token<'_>>, SignatureError> {
    let mut lexer = SigToken::lexer(signature);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let offset = lexer.span().start;
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                offset,
            }),
            Err(()) => {
                return Err(SignatureError::Malformed {
                    signature: signature.to_string(),
                    offset,
                });
            }
        }
    }
    Ok(tokens)
}

// ============================================================================
// PARSER
// ============================================================================

/// A parsed, not yet resolved, type signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    Base(PrimitiveKind),
    Array(Box<TypeSignature>),
    Class {
        /// Dotted binary name, e.g. `java.util.Map$Entry`.
        name: String,
        arguments: Vec<ArgumentSignature>,
    },
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSignature {
    Exact(TypeSignature),
    Unbounded,
    Extends(TypeSignature),
    Super(TypeSignature),
}

struct Parser<'a> {
    signature: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn error(&self) -> SignatureError {
        let offset = self
            .peek()
            .map(|t| t.offset)
            .unwrap_or(self.signature.len());
        SignatureError::Malformed {
            signature: self.signature.to_string(),
            offset,
        }
    }

    fn expect(&mut self, kind: SigToken) -> Result<Token<'a>, SignatureError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error()),
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature, SignatureError> {
        let token = self.bump().ok_or_else(|| self.error())?;
        match token.kind {
            SigToken::Base => token
                .text
                .chars()
                .next()
                .and_then(PrimitiveKind::from_descriptor)
                .map(TypeSignature::Base)
                .ok_or_else(|| self.error()),
            SigToken::Array => Ok(TypeSignature::Array(Box::new(self.parse_type()?))),
            SigToken::Variable => {
                let name = &token.text[1..token.text.len() - 1];
                validate_identifier(name)?;
                Ok(TypeSignature::Variable(name.to_string()))
            }
            SigToken::Class => {
                let name = token.text[1..].replace('/', ".");
                for segment in name.split('.') {
                    validate_identifier(segment)?;
                }
                let mut arguments = Vec::new();
                if self.peek().map(|t| t.kind) == Some(SigToken::Open) {
                    self.pos += 1;
                    while self.peek().map(|t| t.kind) != Some(SigToken::Close) {
                        arguments.push(self.parse_argument()?);
                    }
                    self.expect(SigToken::Close)?;
                    if arguments.is_empty() {
                        return Err(self.error());
                    }
                }
                self.expect(SigToken::Semi)?;
                Ok(TypeSignature::Class { name, arguments })
            }
            _ => {
                self.pos -= 1;
                Err(self.error())
            }
        }
    }

    fn parse_argument(&mut self) -> Result<ArgumentSignature, SignatureError> {
        match self.peek().map(|t| t.kind) {
            Some(SigToken::Star) => {
                self.pos += 1;
                Ok(ArgumentSignature::Unbounded)
            }
            Some(SigToken::Plus) => {
                self.pos += 1;
                Ok(ArgumentSignature::Extends(self.parse_type()?))
            }
            Some(SigToken::Minus) => {
                self.pos += 1;
                Ok(ArgumentSignature::Super(self.parse_type()?))
            }
            Some(_) => Ok(ArgumentSignature::Exact(self.parse_type()?)),
            None => Err(self.error()),
        }
    }
}

fn validate_identifier(identifier: &str) -> Result<(), SignatureError> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(first) => {
            (unicode_ident::is_xid_start(first) || first == '_' || first == '$')
                && chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SignatureError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Parse one complete type signature.
pub fn parse_type_signature(signature: &str) -> Result<TypeSignature, SignatureError> {
    let mut parser = Parser {
        signature,
        tokens: tokenize(signature)?,
        pos: 0,
    };
    let parsed = parser.parse_type()?;
    if parser.peek().is_some() {
        return Err(parser.error());
    }
    Ok(parsed)
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Where a signature is resolved: the enclosing class of the cursor and the
/// type variables of the enclosing method, if any.
#[derive(Debug, Clone, Copy)]
pub struct SignatureScope<'a> {
    pub enclosing_type: TypeId,
    pub type_variables: &'a [TypeId],
}

/// Turns a textual type signature into a type of the graph.
pub trait SignatureResolver {
    fn resolve(
        &self,
        graph: &BindingGraph,
        signature: &str,
        scope: SignatureScope<'_>,
    ) -> Result<TypeId, SignatureError>;
}

/// Resolves signatures against types already present in the graph; it
/// never creates new instantiations or array types.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphSignatureResolver;

impl SignatureResolver for GraphSignatureResolver {
    fn resolve(
        &self,
        graph: &BindingGraph,
        signature: &str,
        scope: SignatureScope<'_>,
    ) -> Result<TypeId, SignatureError> {
        let parsed = parse_type_signature(signature)?;
        resolve_signature(graph, &parsed, scope)
    }
}

fn resolve_signature(
    graph: &BindingGraph,
    signature: &TypeSignature,
    scope: SignatureScope<'_>,
) -> Result<TypeId, SignatureError> {
    match signature {
        TypeSignature::Base(kind) => Ok(graph.primitive(*kind)),
        TypeSignature::Array(component) => {
            let component = resolve_signature(graph, component, scope)?;
            graph
                .find_array(component)
                .ok_or_else(|| SignatureError::Unresolved(format!("{}[]", graph.ty(component).qualified_name)))
        }
        TypeSignature::Variable(name) => resolve_variable(graph, name, scope)
            .ok_or_else(|| SignatureError::Unresolved(name.clone())),
        TypeSignature::Class { name, arguments } => {
            let ty = graph
                .type_named(name)
                .ok_or_else(|| SignatureError::Unresolved(name.clone()))?;
            if graph.ty(ty).origin == TypeOrigin::Missing {
                return Err(SignatureError::Aborted(name.clone()));
            }
            if arguments.is_empty() {
                return Ok(ty);
            }
            let resolved = arguments
                .iter()
                .map(|argument| {
                    Ok(match argument {
                        ArgumentSignature::Exact(t) => TypeArgument::Type(resolve_signature(graph, t, scope)?),
                        ArgumentSignature::Unbounded => TypeArgument::Unbounded,
                        ArgumentSignature::Extends(t) => TypeArgument::Extends(resolve_signature(graph, t, scope)?),
                        ArgumentSignature::Super(t) => TypeArgument::Super(resolve_signature(graph, t, scope)?),
                    })
                })
                .collect::<Result<Vec<_>, SignatureError>>()?;
            Ok(graph.find_instantiation(ty, &resolved).unwrap_or_else(|| {
                trace!("[SIGNATURE] no instantiation of {} for {:?}, using raw type", name, resolved);
                ty
            }))
        }
    }
}

/// Method type variables shadow those of the enclosing types.
fn resolve_variable(graph: &BindingGraph, name: &str, scope: SignatureScope<'_>) -> Option<TypeId> {
    let named = |variable: TypeId| graph.text(graph.ty(variable).name) == name;
    if let Some(found) = scope.type_variables.iter().find(|v| named(**v)) {
        return Some(*found);
    }
    let mut current = Some(scope.enclosing_type);
    while let Some(ty) = current {
        let binding = graph.ty(graph.erasure(ty));
        if let Some(found) = binding.type_variables.iter().find(|v| named(**v)) {
            return Some(*found);
        }
        current = binding.enclosing;
    }
    None
}

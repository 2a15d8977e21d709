//! The tightest-binding level: a single element chosen by its leading token

use crate::abnf::error::{CompileError, Result};
use crate::abnf::expression::{
    Expression, Group, Literal, Optional, ParseContext, Prose, Reference,
};
use crate::abnf::source::{TokenKind, INLINE_TRIVIA};

pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Expression> {
    context.stream.skip(INLINE_TRIVIA);
    let token = context.stream.peek().ok_or(CompileError::UnexpectedEof)?;

    match token.kind {
        kind if kind.is_literal() => Literal::parse(context.stream).map(Expression::Literal),
        TokenKind::Ident => Reference::parse(context.stream).map(Expression::Reference),
        TokenKind::LParen => Group::parse(context).map(Expression::Group),
        TokenKind::LBracket => Optional::parse(context).map(Expression::Option),
        TokenKind::Prose => Prose::parse(context.stream).map(Expression::Prose),
        kind => Err(CompileError::UnsupportedToken {
            kind,
            offset: token.offset,
        }),
    }
}

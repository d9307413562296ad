use super::ast::*;
use super::*;

mod lex_test;

//! AST-Based Type Resolution
//!
//! This crate resolves the type, declaring type, and declaration of a single
//! AST node against a variable scope, using nothing but the node's shape and
//! the class model in [`gvy_model`]. It implements:
//!
//! - **Declaration resolution**: precedence search over accessors,
//!   properties, fields, interface constants, and methods
//! - **Overload selection**: arity plus a three-valued compatibility test,
//!   with a first-candidate fallback so a call never resolves to nothing
//! - **Expression evaluation**: per-node-kind typing rules, including the
//!   class-literal vs static-receiver heuristic
//!
//! Every query answers; uncertainty is reported through [`TypeConfidence`]
//! rather than through failure.
pub mod accessors;
pub mod compat;
pub mod confidence;
pub mod declarations;
pub mod hierarchy;
pub mod overloads;
mod resolver;
mod result;

pub use accessors::{AccessorKind, READER, WRITER, find_accessor_for_property};
pub use compat::{Compat, arg_compat, args_compat};
pub use confidence::TypeConfidence;
pub use declarations::find_declaration;
pub use hierarchy::{class_hierarchy, collect_interfaces};
pub use overloads::{find_method_declaration, select_best_overload};
pub use resolver::TypeResolver;
pub use result::TypeLookupResult;

// Test modules: declaration_tests is loaded by declarations.rs via a
// #[path = "tests/..."] declaration; the resolver-level suites live in
// tests/ and are included here.
#[cfg(test)]
#[path = "../tests/expression_tests.rs"]
mod expression_tests;
#[cfg(test)]
#[path = "../tests/member_tests.rs"]
mod member_tests;
#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "../tests/call_tests.rs"]
mod call_tests;
#[cfg(test)]
#[path = "../tests/class_literal_tests.rs"]
mod class_literal_tests;

//! Common-method promotion.
//!
//! Decides which accessor methods every subtype of an interface declares
//! identically, and which return type the interface can declare for them.
//! Failing to promote a method is never an error: the method simply stays
//! on each subtype.

mod common;
mod method;
mod return_type;


pub use common::{InterfaceHierarchy, promote_common_methods};
pub(crate) use method::quantifier;
pub use method::{GeneratedMethod, MethodKind, PromotedMethod, Signature, TypeRef};
pub use return_type::{CommonReturn, NoSupertypes, SupertypesResolver, common_return_type};

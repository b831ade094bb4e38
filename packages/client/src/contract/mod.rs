//! Declarative endpoint contracts
//!
//! The declaration types callers use to describe an API endpoint, and the
//! immutable descriptor they are parsed into on first dispatch.

pub mod decl;
pub mod descriptor;

pub use decl::{ArgValue, ContentType, EndpointDecl, MethodAnnotation, ParamBinding, RequestMethod};
pub use descriptor::MethodDescriptor;

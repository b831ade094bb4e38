//! Request and response types

pub mod body;
pub mod request;
pub mod response;

pub use body::form_body;
pub use request::ResolvedRequest;
pub use response::{HttpResponse, ResponseBody};

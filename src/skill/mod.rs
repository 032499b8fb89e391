// Voice platform surface: wire types, handlers and the request router.

pub mod handlers;
pub mod request;
pub mod response;
pub mod router;

pub use request::RequestEnvelope;
pub use response::ResponseEnvelope;
pub use router::{IntentKind, Skill};

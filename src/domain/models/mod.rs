mod completion;
mod message;
mod query;
mod response;

pub use completion::*;
pub use message::*;
pub use query::*;
pub use response::*;

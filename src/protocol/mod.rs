// JSON-RPC protocol module
// Request construction, response decoding, and the error taxonomy

mod parse;
mod types;

pub use parse::{decode_body, split_response};
pub use types::{RpcError, RpcOutcome, RpcRequest};

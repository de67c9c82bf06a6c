// HTTP transport adapter
//
// One HTTP POST per logical call to one daemon instance, with basic-auth
// credentials. Resolves with the raw response body or a classified RpcError;
// no retries, and no timeout beyond platform defaults (callers needing
// timeouts layer them externally).

mod http;

pub use http::HttpTransport;

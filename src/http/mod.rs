pub mod invoker;
pub mod transport;

pub use invoker::{Invoker, RetryPolicy, Sleeper, ThreadSleeper};
pub use transport::{
    parse_method, HttpReply, HttpRequest, HttpTransport, ReqwestTransport, RequestBody,
};

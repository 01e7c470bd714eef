//! Concrete content producers shipped with the binary.
//!
//! - [`CountLines`]: a fixed `line 1..N` artifact, handy for trying the workflow out
//! - [`ExecProducer`]: the standard output of an external program
//! - [`RoutesProducer`]: a frozen listing of URL routes from a route manifest

mod count_lines;
mod exec;
pub mod routes;

pub use count_lines::CountLines;
pub use exec::ExecProducer;
pub use routes::RoutesProducer;

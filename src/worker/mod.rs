// Cache worker module
// Author: kelexine (https://github.com/kelexine)

pub mod fetch;
pub mod lifecycle;
pub mod manager;
pub mod messages;

pub use fetch::{FetchOutcome, FetchResult, FetchedResponse, HttpFetcher, RemoteFetch};
pub use lifecycle::{activation_plan, WorkerState};
pub use manager::CacheWorker;
pub use messages::{ControlMessage, MessageAck};

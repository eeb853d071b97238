// X (Twitter) API access: search, reply, user lookup.
//
// The engine only ever talks to the `Platform` trait; `XClient` is the real
// implementation and `DryRunPlatform` wraps it for no-write runs.

pub mod client;
pub mod search;
pub mod traits;

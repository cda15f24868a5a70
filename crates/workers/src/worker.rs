use async_trait::async_trait;
use storage::Database;

use crate::outcome::WorkerOutcome;

/// One-shot idempotent pipeline stage. Unlike the recurring, polled
/// collectors elsewhere in this codebase, a `Worker` has no tick/backoff
/// schedule of its own — it is invoked once per trigger and reports whether
/// there was anything left to do.
#[async_trait]
pub trait Worker<D: Database>: Send + Sync {
    fn id(&self) -> &'static str;

    async fn can_run(&self, database: &D) -> crate::error::Result<bool>;

    async fn run(&self, database: &D) -> WorkerOutcome;
}

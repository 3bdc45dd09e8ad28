//! One-line call-site wrapper over the process-wide registry

use std::future::Future;

use super::registry::global;
use super::types::CircuitBreakerError;

/// Run `operation` through the global breaker for `name`.
///
/// The breaker is created with the registry defaults if it does not exist yet.
///
/// ```ignore
/// let rates = with_circuit_breaker(
///     "exchange-rates",
///     || client.fetch_rates(),
///     Some(|| async { Ok(cached_rates()) }),
/// )
/// .await?;
/// ```
pub async fn with_circuit_breaker<T, E, F, Fut, FB, FbFut>(
    name: &str,
    operation: F,
    fallback: Option<FB>,
) -> Result<T, CircuitBreakerError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    FB: FnOnce() -> FbFut,
    FbFut: Future<Output = Result<T, E>>,
{
    global().execute(name, operation, fallback).await
}

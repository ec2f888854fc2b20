//! Async generation - one blocking task per password.

use std::sync::Arc;

use rand::rngs::OsRng;
use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{GeneratorError, Result};
use crate::generator::{GenerationMode, Generator};

async fn spawn_one(
    generator: Arc<Generator>,
    mode: GenerationMode,
    token: CancellationToken,
) -> Result<SecretString> {
    tokio::task::spawn_blocking(move || {
        generator.generate_with_cancel(mode, &mut OsRng, &|| token.is_cancelled())
    })
    .await
    .map_err(|e| GeneratorError::TaskFailed(e.to_string()))?
}

/// Generates `count` passwords (at least one) concurrently.
///
/// Each task owns its random source; the generator is shared read-only.
/// Results keep request order. The first failure is returned and the
/// remaining tasks are cancelled through a child of `token`; the caller's
/// token itself is never cancelled here.
pub async fn generate_concurrent(
    generator: Arc<Generator>,
    mode: GenerationMode,
    count: usize,
    token: CancellationToken,
) -> Result<Vec<SecretString>> {
    let tasks = token.child_token();
    let handles: Vec<_> = (0..count.max(1))
        .map(|_| tokio::spawn(spawn_one(generator.clone(), mode, tasks.clone())))
        .collect();

    let mut passwords = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| GeneratorError::TaskFailed(e.to_string()))
            .and_then(|r| r);
        match result {
            Ok(password) => passwords.push(password),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Concurrent generation failed: {}", e);
                tasks.cancel();
                return Err(e);
            }
        }
    }
    Ok(passwords)
}

/// Generates one password and sends the result through `tx`.
pub async fn generate_password_tx(
    generator: Arc<Generator>,
    mode: GenerationMode,
    token: CancellationToken,
    tx: mpsc::Sender<Result<SecretString>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("generation is about to start...");

    let result = spawn_one(generator, mode, token).await;

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send generated password: {}", _e);
    }
}

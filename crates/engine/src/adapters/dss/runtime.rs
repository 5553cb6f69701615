use crate::domain::error::{EngineError, EngineResult};

/// Drives an engine future to completion from synchronous code (FFI, CLI).
pub fn run_on_current_thread<F, T>(fut: F) -> EngineResult<T>
where
  F: std::future::Future<Output = EngineResult<T>>,
{
  // Inside a multi-thread runtime, block in place instead of nesting one.
  if let Ok(handle) = tokio::runtime::Handle::try_current() {
    if handle.runtime_flavor() != tokio::runtime::RuntimeFlavor::MultiThread {
      return Err(EngineError::Config(
        "cannot block inside a current-thread runtime; await the async API instead".into(),
      ));
    }
    return tokio::task::block_in_place(|| handle.block_on(fut));
  }

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .map_err(|e| EngineError::Config(format!("Failed to create tokio runtime: {}", e)))?;
  rt.block_on(fut)
}

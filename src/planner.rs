//! Cache of [`FftEngine`]s keyed by size.

use alloc::sync::Arc;
use hashbrown::HashMap;

use crate::error::FftError;
use crate::fft::FftEngine;
use crate::num::Float;

/// Builds engines on first use and hands out shared handles afterwards, so
/// callers transforming many buffers of a few sizes pay for each twiddle
/// table once.
///
/// Engines are shared: changing the normalization on a returned handle is
/// visible to every other holder of the same size.
pub struct FftPlanner<T: Float> {
    cache: HashMap<usize, Arc<FftEngine<T>>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Return the engine for `size`, building it if needed. Invalid sizes
    /// are reported and nothing is cached for them.
    pub fn plan(&mut self, size: usize) -> Result<Arc<FftEngine<T>>, FftError> {
        if let Some(engine) = self.cache.get(&size) {
            return Ok(Arc::clone(engine));
        }
        let engine = Arc::new(FftEngine::new(size)?);
        self.cache.insert(size, Arc::clone(&engine));
        Ok(engine)
    }

    /// Number of cached sizes.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached engine. Handles already given out stay valid.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

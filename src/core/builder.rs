use std::sync::Arc;

use crate::args::Args;
use crate::core::{Config, Emitter};
use crate::event::EventKey;
use crate::hooks::{ErrorHook, Reraise};

/// Builder for constructing an [`Emitter`] with a custom failure policy.
pub struct EmitterBuilder<E: EventKey, A: Args> {
    cfg: Config,
    hook: Arc<dyn ErrorHook<E, A>>,
}

impl<E: EventKey, A: Args> EmitterBuilder<E, A> {
    /// Creates a new builder with the given configuration and the [`Reraise`] hook.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            hook: Arc::new(Reraise),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the hook invoked when a listener fails.
    pub fn with_error_hook(mut self, hook: impl ErrorHook<E, A>) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Sets a hook that is shared with other emitters.
    pub fn with_shared_error_hook(mut self, hook: Arc<dyn ErrorHook<E, A>>) -> Self {
        self.hook = hook;
        self
    }

    /// Builds the emitter.
    pub fn build(self) -> Emitter<E, A> {
        Emitter::from_parts(self.cfg, self.hook)
    }
}

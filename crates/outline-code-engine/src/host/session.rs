use std::collections::HashMap;
use std::sync::Arc;

use super::{ActivationHook, Buffer, BufferId, Promotability, baseline_definitions};
use crate::pattern::OutlineDefinitions;

/// Owner of every open buffer and of the host's baseline behaviour.
pub struct Session {
    baseline: OutlineDefinitions,
    promotability: Promotability,
    hooks: Vec<Arc<dyn ActivationHook>>,
    pub(crate) buffers: HashMap<BufferId, Buffer>,
}

impl Session {
    /// Session with star headlines and the default promotability rule.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_baseline(
            baseline_definitions()?,
            Promotability::default(),
        ))
    }

    pub fn with_baseline(baseline: OutlineDefinitions, promotability: Promotability) -> Self {
        Self {
            baseline,
            promotability,
            hooks: Vec::new(),
            buffers: HashMap::new(),
        }
    }

    pub fn baseline(&self) -> &OutlineDefinitions {
        &self.baseline
    }

    /// Register a hook run for every buffer opened from now on.
    pub fn add_activation_hook(&mut self, hook: Arc<dyn ActivationHook>) {
        self.hooks.push(hook);
    }

    /// Open a buffer with the baseline definitions, then run the activation
    /// hooks on it.
    ///
    /// A failing hook is logged and skipped; the buffer still opens with
    /// whatever the hook left in place.
    pub fn open_buffer(&mut self, name: &str, mode: &str, text: &str) -> BufferId {
        let mut buffer = Buffer::new(
            name,
            mode,
            text,
            self.baseline.clone(),
            self.promotability.clone(),
        );
        log::debug!("Opening buffer {name} ({mode})");

        for hook in &self.hooks {
            if let Err(e) = hook.on_activate(&mut buffer) {
                log::warn!("Activation hook {} failed for {name}: {e:#}", hook.name());
            }
        }

        let id = buffer.id();
        self.buffers.insert(id, buffer);
        id
    }

    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    pub fn buffer_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.get_mut(&id)
    }

    /// Close a buffer, handing it back to the caller
    pub fn close_buffer(&mut self, id: BufferId) -> Option<Buffer> {
        self.buffers.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

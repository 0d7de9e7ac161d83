/// Why a programmatic re-scroll was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollReason {
    /// The initial value changed and the wheel must re-center on it.
    Reinitialize,
    /// A settle landed below the minimum and is being rejected.
    BounceBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTask {
    /// Virtual index that must end up centered.
    pub center_index: i64,
    pub reason: ScrollReason,
}

/// Deferred re-scroll slot of one wheel.
///
/// Tasks never run inside the layout pass that schedules them; the owner
/// drains the slot afterwards. Scheduling again before the drain replaces the
/// pending task.
#[derive(Debug, Default, Clone)]
pub struct DeferredScroll {
    pending: Option<ScrollTask>,
}

impl DeferredScroll {
    pub fn schedule(&mut self, task: ScrollTask) -> Option<ScrollTask> {
        self.pending.replace(task)
    }

    pub fn take(&mut self) -> Option<ScrollTask> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&ScrollTask> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Lifecycle of the per-frame update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created but never started.
    Idle,
    /// Frames are being advanced.
    Running,
    /// Stopped explicitly; can be started again.
    Stopped,
}

/// Restartable, cancellable frame loop state.
///
/// The host's scheduler (e.g. `requestAnimationFrame`) decides *when* a frame
/// happens; this only decides *whether* it should advance and counts the
/// frames that did.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Begin (or resume) advancing frames. The frame count is kept across restarts.
    pub fn start(&mut self) {
        self.state = LoopState::Running;
    }

    /// Stop advancing frames. Pending host callbacks become no-ops.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Called at the start of every host frame callback.
    /// Returns whether the frame should run; counts it if so.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_does_not_advance() {
        let mut frames = FrameLoop::new();
        assert_eq!(frames.state(), LoopState::Idle);
        assert!(!frames.begin_frame());
        assert_eq!(frames.frames(), 0);
    }

    #[test]
    fn running_loop_counts_frames() {
        let mut frames = FrameLoop::new();
        frames.start();
        for _ in 0..3 {
            assert!(frames.begin_frame());
        }
        assert_eq!(frames.frames(), 3);
    }

    #[test]
    fn stop_makes_frames_no_ops() {
        let mut frames = FrameLoop::new();
        frames.start();
        frames.begin_frame();
        frames.stop();
        assert_eq!(frames.state(), LoopState::Stopped);
        assert!(!frames.begin_frame());
        assert_eq!(frames.frames(), 1);
    }

    #[test]
    fn restart_keeps_count() {
        let mut frames = FrameLoop::new();
        frames.start();
        frames.begin_frame();
        frames.stop();
        frames.start();
        assert!(frames.begin_frame());
        assert_eq!(frames.frames(), 2);
    }

    #[test]
    fn stop_before_start_stays_idle() {
        let mut frames = FrameLoop::new();
        frames.stop();
        assert_eq!(frames.state(), LoopState::Idle);
    }
}

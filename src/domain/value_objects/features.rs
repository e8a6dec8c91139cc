//! Generic pipeline passes an engine may opt out of

use bitflags::bitflags;

bitflags! {
    /// Text passes the orchestrator may run over a file's content before the
    /// engine generates output. Engines that hand their files to an external
    /// compiler clear these so the source reaches the compiler untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PipelineFeatures: u8 {
        /// Data/main template tags
        const TEMPLATE_TAGS = 1 << 0;
        /// Output-path tags
        const OUTPUT_TAGS = 1 << 1;
        /// Static variable substitution
        const VARIABLES = 1 << 2;
        /// Variables resolved at output time
        const LIVE_VARIABLES = 1 << 3;
    }
}

impl Default for PipelineFeatures {
    fn default() -> Self {
        Self::all()
    }
}

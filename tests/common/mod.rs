//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use lsp_types::{Color, ColorInformation, Position, Range};

use swatch::buffer::BufferSet;
use swatch::config::SwatchConfig;
use swatch::messages::ColorsMsg;
use swatch::model::ColorModel;
use swatch::runtime::{dispatch, QueuedColorProvider, RecordingSink};
use swatch::ScopeId;

/// Everything needed to drive the update loop end to end
pub struct Harness {
    pub model: ColorModel,
    pub buffers: BufferSet,
    pub sink: RecordingSink,
    pub provider: QueuedColorProvider,
}

impl Harness {
    pub fn new(config: SwatchConfig) -> Self {
        Self {
            model: ColorModel::new(config),
            buffers: BufferSet::new(),
            sink: RecordingSink::default(),
            provider: QueuedColorProvider::new(),
        }
    }

    /// Harness that merges locally without a language server
    pub fn local_only() -> Self {
        Self::new(SwatchConfig {
            protocol: false,
            ..SwatchConfig::default()
        })
    }

    /// Open a buffer and attach it
    pub fn open(&mut self, text: &str) -> ScopeId {
        let scope = self.buffers.open(text);
        self.send(ColorsMsg::Attach { scope });
        scope
    }

    pub fn send(&mut self, msg: ColorsMsg) {
        dispatch(
            &mut self.model,
            msg,
            &self.buffers,
            &mut self.sink,
            &mut self.provider,
        );
    }

    /// Deliver every queued protocol response
    pub fn answer_requests(&mut self) {
        for msg in self.provider.drain() {
            self.send(msg);
        }
    }
}

/// Single-line color range
pub fn color_info(line: u32, start: u32, end: u32, rgb: (f32, f32, f32)) -> ColorInformation {
    ColorInformation {
        range: Range::new(Position::new(line, start), Position::new(line, end)),
        color: Color {
            red: rgb.0,
            green: rgb.1,
            blue: rgb.2,
            alpha: 1.0,
        },
    }
}

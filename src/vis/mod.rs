//! Interface consumed by an external rendering collaborator.
//!
//! The engine hands a finished [`Table`] and a [`PlotConfig`] to a
//! caller-owned [`Renderer`]; no rendering happens here and no global
//! plotting state exists.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::Table;

/// Kind of chart the collaborator should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    Line,
    Bar,
    Pie,
    Histogram,
    Scatter,
    Box,
    Violin,
}

/// Chart description handed to the renderer alongside the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub kind: PlotKind,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Width in renderer-defined units.
    pub width: u32,
    /// Height in renderer-defined units.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            kind: PlotKind::Line,
            title: None,
            x_label: None,
            y_label: None,
            width: 640,
            height: 480,
        }
    }
}

impl PlotConfig {
    pub fn new(kind: PlotKind) -> Self {
        PlotConfig {
            kind,
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Output collaborator seam. Implementations read finished columns
/// and draw; they perform no computation on the data.
pub trait Renderer {
    fn render(&mut self, table: &Table, config: &PlotConfig) -> Result<()>;
}

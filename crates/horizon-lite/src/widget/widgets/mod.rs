//! Concrete widgets.

mod label;

pub use label::{HorizontalAlign, Label, LabelPaint, LabelStyle, MarqueeSlot, PaintLine, VerticalAlign};

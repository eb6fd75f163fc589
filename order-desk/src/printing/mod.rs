//! Order summary printing
//!
//! - [`types`]: serializable snapshot of a stored order
//! - [`renderer`]: fixed-width plain text

pub mod renderer;
pub mod types;

pub use renderer::{OrderSummaryRenderer, money};
pub use types::{PrintChargeLine, PrintContext, PrintLensLine, PrintPathColumn};

/// Render an order summary at the given width
pub fn render_text(ctx: &PrintContext, width: usize) -> String {
    OrderSummaryRenderer::new(width).render(ctx)
}

// Export: pure projection into a print layout, and the printable HTML rendering
// handed to the browser's print dialog.

pub mod handlers;
pub mod html;
pub mod projection;

pub use html::render_html;
pub use projection::{display_name, project, PreviewMode, PrintLayout};

pub mod assembler;
pub mod palette;
pub mod render;

pub use assembler::ReportAssembler;
pub use palette::LabelColor;
pub use render::render_html;

pub mod render_data;
pub mod template;

pub use render_data::RenderData;
pub use template::{TemplateOrigin, TemplateSettings, TemplateText};

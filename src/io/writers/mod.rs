pub mod declarations;
pub mod json;
pub mod text;

pub use declarations::{render_declarations, DeclarationWriter, EmitOptions};
pub use json::JsonWriter;
pub use text::TextWriter;

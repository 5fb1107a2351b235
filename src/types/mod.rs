pub mod generation_input;
pub mod rendered_block;
pub mod table_field;

pub use generation_input::{GenerationInput, TableNames};
pub use rendered_block::RenderedBlock;
pub use table_field::{field_map, FieldMap, TableField};

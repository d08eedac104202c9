pub mod element;
pub mod store;

pub use element::{
    picture_data_url, ElementCounts, ElementId, FieldElement, FieldType, TextField,
};
pub use store::ElementStore;

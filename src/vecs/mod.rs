pub mod dynamic_array;
pub mod static_array;

pub use dynamic_array::DynamicArray;
pub use static_array::StaticArray;

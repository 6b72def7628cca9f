pub mod in_memory;
pub mod interface;
pub mod model_trait;

pub use in_memory::InMemoryModel;
pub use interface::ModelInterface;
pub use model_trait::Predictor;

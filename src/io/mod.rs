pub mod batch_csv;

pub use batch_csv::{read_batch_csv, read_batch_csv_with_config, BatchData, BatchReaderConfig};

pub mod sheets;
pub mod traits;
pub mod types;

pub use sheets::SheetsSource;
pub use traits::TableSource;
pub use types::{FetchError, RawTable};

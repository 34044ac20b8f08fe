pub mod item;
pub mod preference;
pub mod record;
pub mod verdict;

pub use item::*;
pub use preference::*;
pub use record::*;
pub use verdict::*;

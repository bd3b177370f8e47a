pub mod assembly;
pub mod catalog;
pub mod conditions;
pub mod evaluation;
pub mod forecast;
pub mod insight;
pub mod risk;
pub mod schedule;
pub mod work_log;

pub use assembly::*;
pub use catalog::*;
pub use conditions::*;
pub use evaluation::*;
pub use forecast::*;
pub use insight::*;
pub use risk::*;
pub use schedule::*;
pub use work_log::*;

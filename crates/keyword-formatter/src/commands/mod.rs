pub mod format;
pub mod keywords;
pub mod run;

pub use format::*;
pub use keywords::*;
pub use run::*;

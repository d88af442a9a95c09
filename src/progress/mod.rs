// Paper progress: stage catalog, payload record and timeline resolution

pub mod catalog;
pub mod record;
pub mod resolver;

pub use catalog::*;
pub use record::*;
pub use resolver::*;

mod common;
pub use self::common::Query;

mod status;
pub use self::status::StatusQuery;

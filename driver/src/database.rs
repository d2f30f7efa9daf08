pub use self::mongo::*;

mod mongo;
